use dioxus::prelude::*;
use shared_ui::{
    BadgeVariant, Button, ButtonVariant, Card, CardContent, PageHeader, PageTitle, Skeleton,
};

use super::{RecentProperties, StatCard};
use crate::routes::Route;

/// Admin dashboard: portfolio totals plus account counts, with a shortcut
/// into the user management console.
#[component]
pub fn AdminDashboard() -> Element {
    let nav = use_navigator();

    let stats = use_resource(move || async move {
        server::api::get_dashboard_stats().await.ok()
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }
        PageHeader {
            PageTitle { "Administration Overview" }
        }

        match &*stats.read() {
            Some(Some(s)) => rsx! {
                div { class: "dashboard-stats-grid",
                    StatCard { label: "Properties", value: s.total_properties.to_string(), variant: BadgeVariant::Primary }
                    StatCard { label: "Units", value: s.total_units.to_string(), variant: BadgeVariant::Secondary }
                    StatCard { label: "Occupancy", value: format!("{}%", s.occupancy_pct()), variant: BadgeVariant::Outline }
                    StatCard { label: "Accounts", value: s.total_users.to_string(), variant: BadgeVariant::Destructive }
                }

                RecentProperties { properties: s.recent_properties.clone() }

                div { class: "dashboard-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| { nav.push(Route::Users {}); },
                        "Manage Users"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| { nav.push(Route::PropertyList {}); },
                        "View Properties"
                    }
                }
            },
            Some(None) => rsx! {
                Card {
                    CardContent {
                        p { class: "dashboard-empty-title", "Failed to load portfolio statistics." }
                    }
                }
            },
            None => rsx! {
                div { class: "dashboard-stats-grid",
                    for _ in 0..4 {
                        Card {
                            CardContent {
                                Skeleton { style: "height: 2.5rem; width: 100%;" }
                            }
                        }
                    }
                }
            },
        }
    }
}

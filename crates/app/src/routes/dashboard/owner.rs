use dioxus::prelude::*;
use shared_ui::{BadgeVariant, Card, CardContent, PageHeader, PageTitle, Skeleton};

use super::{RecentProperties, StatCard};
use crate::routes::Route;

/// Owner dashboard: occupancy-centric portfolio summary with a pointer to
/// the financial overview.
#[component]
pub fn OwnerDashboard() -> Element {
    let stats = use_resource(move || async move {
        server::api::get_dashboard_stats().await.ok()
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }
        PageHeader {
            PageTitle { "Portfolio Overview" }
        }

        match &*stats.read() {
            Some(Some(s)) => rsx! {
                div { class: "dashboard-stats-grid",
                    StatCard { label: "Properties", value: s.total_properties.to_string(), variant: BadgeVariant::Primary }
                    StatCard { label: "Occupied Units", value: s.occupied_units.to_string(), variant: BadgeVariant::Secondary }
                    StatCard { label: "Vacant Units", value: (s.total_units - s.occupied_units).max(0).to_string(), variant: BadgeVariant::Destructive }
                    StatCard { label: "Occupancy", value: format!("{}%", s.occupancy_pct()), variant: BadgeVariant::Outline }
                }

                RecentProperties { properties: s.recent_properties.clone() }

                p { class: "dashboard-footnote",
                    "Rent collection and expense reports live under "
                    Link { to: Route::Financial {}, "Financial" }
                    "."
                }
            },
            _ => rsx! {
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

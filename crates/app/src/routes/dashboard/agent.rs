use dioxus::prelude::*;
use shared_ui::{BadgeVariant, Card, CardContent, PageHeader, PageTitle, Skeleton};

use super::{RecentProperties, StatCard};
use crate::routes::Route;

/// Agent dashboard: vacancy-focused view of the portfolio. Vacant units are
/// the agent's work queue.
#[component]
pub fn AgentDashboard() -> Element {
    let stats = use_resource(move || async move {
        server::api::get_dashboard_stats().await.ok()
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }
        PageHeader {
            PageTitle { "Leasing Overview" }
        }

        match &*stats.read() {
            Some(Some(s)) => rsx! {
                div { class: "dashboard-stats-grid",
                    StatCard { label: "Properties", value: s.total_properties.to_string(), variant: BadgeVariant::Primary }
                    StatCard { label: "Units to Fill", value: (s.total_units - s.occupied_units).max(0).to_string(), variant: BadgeVariant::Destructive }
                    StatCard { label: "Occupancy", value: format!("{}%", s.occupancy_pct()), variant: BadgeVariant::Outline }
                }

                RecentProperties { properties: s.recent_properties.clone() }

                p { class: "dashboard-footnote",
                    "Prospect outreach and announcements live under "
                    Link { to: Route::Communications {}, "Communications" }
                    "."
                }
            },
            _ => rsx! {
                div { class: "dashboard-stats-grid",
                    for _ in 0..3 {
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

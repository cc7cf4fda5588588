pub mod admin;
pub mod agent;
pub mod owner;
pub mod tenant;

use dioxus::prelude::*;
use shared_types::{Property, Role};
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::auth::use_role;
use crate::routes::Route;

/// Role-adaptive dashboard. Every signed-in user lands here; what they see
/// depends on their role, not on extra route policies.
#[component]
pub fn Dashboard() -> Element {
    let role = use_role();

    match role {
        Some(Role::Admin) => rsx! { admin::AdminDashboard {} },
        Some(Role::Owner) => rsx! { owner::OwnerDashboard {} },
        Some(Role::Agent) => rsx! { agent::AgentDashboard {} },
        Some(Role::Tenant) | None => rsx! { tenant::TenantDashboard {} },
    }
}

/// A single stat card shared by the staff dashboards.
#[component]
pub(crate) fn StatCard(label: String, value: String, variant: BadgeVariant) -> Element {
    rsx! {
        Card {
            CardContent {
                div { class: "dashboard-stat-card",
                    span { class: "dashboard-stat-value", "{value}" }
                    Badge { variant: variant, "{label}" }
                }
            }
        }
    }
}

/// Recent additions to the portfolio, linking into the property detail page.
#[component]
pub(crate) fn RecentProperties(properties: Vec<Property>) -> Element {
    rsx! {
        Card {
            CardHeader {
                CardTitle { "Recent Properties" }
                CardDescription { "Latest additions to the portfolio" }
            }
            CardContent {
                if properties.is_empty() {
                    div { class: "dashboard-empty-state",
                        p { class: "dashboard-empty-title", "No properties yet" }
                        p { class: "dashboard-empty-description", "Properties show up here as they are added." }
                    }
                } else {
                    div { class: "dashboard-recent-list",
                        for property in properties.iter() {
                            Link {
                                to: Route::PropertyDetail { id: property.id.to_string() },
                                class: "dashboard-recent-item",
                                div { class: "dashboard-recent-main",
                                    span { class: "dashboard-recent-name", "{property.name}" }
                                    span { class: "dashboard-recent-address", "{property.short_address()}" }
                                }
                                div { class: "dashboard-recent-meta",
                                    Badge { variant: BadgeVariant::Secondary, "{property.property_type}" }
                                    span { class: "dashboard-recent-units",
                                        "{property.occupied_count}/{property.unit_count} occupied"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

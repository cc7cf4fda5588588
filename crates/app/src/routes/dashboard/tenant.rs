use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader, PageTitle};

use crate::auth::use_auth;
use crate::routes::Route;

/// Tenant dashboard. Renders entirely from session state; portfolio
/// statistics are staff-only and are never requested here.
#[component]
pub fn TenantDashboard() -> Element {
    let auth = use_auth();
    let name = auth
        .current_user
        .read()
        .as_ref()
        .map(|u| u.display_name.clone())
        .unwrap_or_else(|| "there".to_string());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }
        PageHeader {
            PageTitle { "Welcome, {name}" }
        }

        div { class: "dashboard-tenant-grid",
            Link { to: Route::Leases {}, class: "dashboard-tenant-link",
                Card {
                    CardHeader {
                        CardTitle { "My Lease" }
                        CardDescription { "Terms, renewal dates, and rent amount" }
                    }
                }
            }
            Link { to: Route::Maintenance {}, class: "dashboard-tenant-link",
                Card {
                    CardHeader {
                        CardTitle { "Maintenance" }
                        CardDescription { "Report an issue or track an open request" }
                    }
                }
            }
            Link { to: Route::Documents {}, class: "dashboard-tenant-link",
                Card {
                    CardHeader {
                        CardTitle { "Documents" }
                        CardDescription { "Lease agreements, notices, and receipts" }
                    }
                }
            }
            Link { to: Route::Messages {}, class: "dashboard-tenant-link",
                Card {
                    CardHeader {
                        CardTitle { "Messages" }
                        CardDescription { "Reach your property manager" }
                    }
                }
            }
            Link { to: Route::Schedule {}, class: "dashboard-tenant-link",
                Card {
                    CardHeader {
                        CardTitle { "Schedule" }
                        CardDescription { "Inspections, showings, and building events" }
                    }
                }
            }
        }

        Card {
            CardContent {
                p { class: "dashboard-footnote",
                    "Need something not listed here? Your property manager can help through Messages."
                }
            }
        }
    }
}

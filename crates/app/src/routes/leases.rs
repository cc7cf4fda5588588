use dioxus::prelude::*;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Lease management placeholder, open to every signed-in user. Tenants will
/// see their own lease here; staff will see the full book.
#[component]
pub fn Leases() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./stub.css") }

        div { class: "stub-page",
            Card {
                CardHeader {
                    CardTitle {
                        "Leases "
                        Badge { variant: BadgeVariant::Outline, "Coming Soon" }
                    }
                    CardDescription { "Agreements, renewals, and move-in / move-out tracking" }
                }
                CardContent {
                    p { class: "stub-lead", "Planned for this page:" }
                    ul { class: "stub-list",
                        li { "Active lease terms with start and end dates" }
                        li { "Renewal offers and countersigning" }
                        li { "Security deposit records" }
                        li { "Move-in and move-out checklists" }
                    }
                }
            }
        }
    }
}

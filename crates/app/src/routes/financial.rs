use dioxus::prelude::*;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Financial overview placeholder. Reachable by admins and owners only;
/// the route policy does the gating, this page just renders.
#[component]
pub fn Financial() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./stub.css") }

        div { class: "stub-page",
            Card {
                CardHeader {
                    CardTitle {
                        "Financial Overview "
                        Badge { variant: BadgeVariant::Outline, "Coming Soon" }
                    }
                    CardDescription { "Rent collection, expenses, and owner statements" }
                }
                CardContent {
                    p { class: "stub-lead",
                        "Accounting features are under construction. This page will show:"
                    }
                    ul { class: "stub-list",
                        li { "Monthly rent roll with payment status per unit" }
                        li { "Operating expenses broken down by property" }
                        li { "Owner disbursement statements and year-end summaries" }
                        li { "Late balance tracking with configurable grace periods" }
                    }
                }
            }
        }
    }
}

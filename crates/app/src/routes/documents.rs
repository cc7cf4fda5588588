use dioxus::prelude::*;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Document library placeholder.
#[component]
pub fn Documents() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./stub.css") }

        div { class: "stub-page",
            Card {
                CardHeader {
                    CardTitle {
                        "Documents "
                        Badge { variant: BadgeVariant::Outline, "Coming Soon" }
                    }
                    CardDescription { "Shared files for each lease and property" }
                }
                CardContent {
                    p { class: "stub-lead",
                        "A document library is planned: signed leases, building notices, inspection reports, and payment receipts, scoped so each tenant sees only their own paperwork."
                    }
                }
            }
        }
    }
}

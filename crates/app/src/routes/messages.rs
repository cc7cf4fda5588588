use dioxus::prelude::*;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Direct messaging placeholder.
#[component]
pub fn Messages() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./stub.css") }

        div { class: "stub-page",
            Card {
                CardHeader {
                    CardTitle {
                        "Messages "
                        Badge { variant: BadgeVariant::Outline, "Coming Soon" }
                    }
                    CardDescription { "Direct conversations between tenants and management" }
                }
                CardContent {
                    p { class: "stub-lead",
                        "An in-app inbox is planned so requests and replies stay attached to the lease instead of scattered across email and phone calls."
                    }
                    ul { class: "stub-list",
                        li { "Threaded conversations per unit" }
                        li { "Read receipts for time-sensitive notices" }
                        li { "Attachment support for photos and forms" }
                    }
                }
            }
        }
    }
}

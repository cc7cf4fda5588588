use dioxus::prelude::*;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Schedule placeholder.
#[component]
pub fn Schedule() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./stub.css") }

        div { class: "stub-page",
            Card {
                CardHeader {
                    CardTitle {
                        "Schedule "
                        Badge { variant: BadgeVariant::Outline, "Coming Soon" }
                    }
                    CardDescription { "Inspections, showings, and building events" }
                }
                CardContent {
                    p { class: "stub-lead",
                        "A shared calendar is planned. Tenants will see inspections and events for their building; staff will manage showings and vendor visits across the portfolio."
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Maintenance request placeholder.
#[component]
pub fn Maintenance() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./stub.css") }

        div { class: "stub-page",
            Card {
                CardHeader {
                    CardTitle {
                        "Maintenance "
                        Badge { variant: BadgeVariant::Outline, "Coming Soon" }
                    }
                    CardDescription { "Work orders from report to resolution" }
                }
                CardContent {
                    p { class: "stub-lead",
                        "Tenants will file requests here with photos and preferred access times. Staff will triage, assign vendors, and track each work order through completion."
                    }
                    div { class: "stub-steps",
                        span { class: "stub-step", "Reported" }
                        span { class: "stub-step-arrow", "\u{2192}" }
                        span { class: "stub-step", "Scheduled" }
                        span { class: "stub-step-arrow", "\u{2192}" }
                        span { class: "stub-step", "In Progress" }
                        span { class: "stub-step-arrow", "\u{2192}" }
                        span { class: "stub-step", "Resolved" }
                    }
                }
            }
        }
    }
}

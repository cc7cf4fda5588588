use dioxus::prelude::*;
use shared_ui::{Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// Outreach placeholder. Reachable by admins and agents; owners and tenants
/// are turned away by the route policy before this renders.
#[component]
pub fn Communications() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./stub.css") }

        div { class: "stub-page",
            Card {
                CardHeader {
                    CardTitle {
                        "Communications "
                        Badge { variant: BadgeVariant::Outline, "Coming Soon" }
                    }
                    CardDescription { "Announcements and prospect outreach" }
                }
                CardContent {
                    p { class: "stub-lead", "Tools planned for leasing agents:" }
                    ul { class: "stub-list",
                        li { "Building-wide announcements with delivery tracking" }
                        li { "Prospect follow-up sequences for vacant units" }
                        li { "Showing reminders and application nudges" }
                    }
                }
            }
        }
    }
}

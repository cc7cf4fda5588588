use dioxus::prelude::*;

use crate::routes::Route;

/// Catch-all for unmatched paths. Shown to everyone regardless of
/// session state; guessing URLs reveals nothing about which pages
/// exist behind the guard.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        main { class: "not-found-page",
            section { class: "not-found-card",
                p { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "Page Not Found" }
                p { class: "not-found-message",
                    "There is nothing at "
                    code { "{path}" }
                    ". Check the address, or head back to safer ground."
                }
                Link {
                    to: Route::Dashboard {},
                    class: "not-found-link",
                    "Back to Dashboard"
                }
            }
        }
    }
}

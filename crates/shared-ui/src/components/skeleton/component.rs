use dioxus::prelude::*;

use crate::components::themed;

/// Pulsing placeholder shown while a page waits on a server call.
/// Size it per use with an extra class or inline style.
#[component]
pub fn Skeleton(#[props(extends = GlobalAttributes)] attributes: Vec<Attribute>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { ..themed("skeleton", &[], attributes) }
    }
}

use dioxus::prelude::*;
use dioxus_primitives::label as prim;

use crate::components::with_class;

/// Form label tied to its control via `html_for`. The login, register
/// and property forms pair one of these with each input.
#[component]
pub fn Label(mut props: prim::LabelProps) -> Element {
    props.attributes = with_class(props.attributes, "label");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Label { ..props }
    }
}

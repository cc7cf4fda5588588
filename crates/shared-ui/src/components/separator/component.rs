use dioxus::prelude::*;
use dioxus_primitives::separator as prim;

use crate::components::with_class;

/// Thin rule between sections. Horizontal unless the caller sets
/// `horizontal: false`.
#[component]
pub fn Separator(mut props: prim::SeparatorProps) -> Element {
    props.attributes = with_class(props.attributes, "separator");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Separator { ..props }
    }
}

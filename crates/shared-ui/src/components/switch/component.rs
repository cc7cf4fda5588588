use dioxus::prelude::*;
use dioxus_primitives::switch as prim;

use crate::components::with_class;

/// On/off toggle. The profile page uses it for notification
/// preferences; pass a [`SwitchThumb`] as the child.
#[component]
pub fn Switch(mut props: prim::SwitchProps) -> Element {
    props.attributes = with_class(props.attributes, "switch");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Switch { ..props }
    }
}

#[component]
pub fn SwitchThumb(mut props: prim::SwitchThumbProps) -> Element {
    props.attributes = with_class(props.attributes, "switch-thumb");

    rsx! {
        prim::SwitchThumb { ..props }
    }
}

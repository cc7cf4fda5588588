use dioxus::prelude::*;
use dioxus_primitives::avatar as prim;

use crate::components::with_class;

/// Circular identity marker. Accounts have no profile photos, so
/// callers render initials through [`AvatarFallback`].
#[component]
pub fn Avatar(mut props: prim::AvatarProps) -> Element {
    props.attributes = with_class(props.attributes, "avatar");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Avatar { ..props }
    }
}

#[component]
pub fn AvatarFallback(mut props: prim::AvatarFallbackProps) -> Element {
    props.attributes = with_class(props.attributes, "avatar-fallback");

    rsx! {
        prim::AvatarFallback { ..props }
    }
}

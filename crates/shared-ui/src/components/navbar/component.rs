use dioxus::prelude::*;
use dioxus_primitives::navbar as prim;

use crate::components::with_class;

/// Top bar of the app shell. The layout fills it with the brand link,
/// the signed-in user's menu and the sign-out control, so only the
/// container lives here.
#[component]
pub fn Navbar(mut props: prim::NavbarProps) -> Element {
    props.attributes = with_class(props.attributes, "navbar");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Navbar { ..props }
    }
}

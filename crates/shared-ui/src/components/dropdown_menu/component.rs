use dioxus::prelude::*;
use dioxus_primitives::dropdown_menu as prim;

use crate::components::{themed, with_class};

/// Click-to-open menu, used for the account menu in the top bar.
/// Compose trigger, content and items from the pieces below.
#[component]
pub fn DropdownMenu(mut props: prim::DropdownMenuProps) -> Element {
    props.attributes = with_class(props.attributes, "dropdown-menu");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::DropdownMenu { ..props }
    }
}

#[component]
pub fn DropdownMenuTrigger(mut props: prim::DropdownMenuTriggerProps) -> Element {
    props.attributes = with_class(props.attributes, "dropdown-menu-trigger");

    rsx! {
        prim::DropdownMenuTrigger { ..props }
    }
}

#[component]
pub fn DropdownMenuContent(mut props: prim::DropdownMenuContentProps) -> Element {
    props.attributes = with_class(props.attributes, "dropdown-menu-content");

    rsx! {
        prim::DropdownMenuContent { ..props }
    }
}

#[component]
pub fn DropdownMenuItem<T: Clone + PartialEq + 'static>(
    mut props: prim::DropdownMenuItemProps<T>,
) -> Element {
    props.attributes = with_class(props.attributes, "dropdown-menu-item");

    rsx! {
        prim::DropdownMenuItem { ..props }
    }
}

#[component]
pub fn DropdownMenuSeparator(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let attrs = themed("dropdown-menu-separator", &[("role", "separator")], attributes);

    rsx! {
        div { ..attrs }
    }
}

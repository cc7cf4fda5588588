use dioxus::prelude::*;

use crate::components::themed;

/// Header strip at the top of a page body. Holds a [`PageTitle`] on
/// the left and, when the viewer's role allows it, a [`PageActions`]
/// group on the right.
#[component]
pub fn PageHeader(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { ..themed("page-header", &[], attributes), {children} }
    }
}

/// Renders as the page's `h1`.
#[component]
pub fn PageTitle(children: Element) -> Element {
    rsx! {
        h1 { class: "page-title", {children} }
    }
}

#[component]
pub fn PageActions(children: Element) -> Element {
    rsx! {
        div { class: "page-actions", {children} }
    }
}

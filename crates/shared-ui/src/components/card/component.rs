use dioxus::prelude::*;

use crate::components::themed;

/// Surface container used across the dashboards. Compose with
/// [`CardHeader`], [`CardContent`] and [`CardFooter`]; only the root
/// pulls in the stylesheet.
#[component]
pub fn Card(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { ..themed("card", &[], attributes), {children} }
    }
}

#[component]
pub fn CardHeader(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("card-header", &[], attributes), {children} }
    }
}

/// Renders as an `h3` so card titles land in the document outline.
#[component]
pub fn CardTitle(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        h3 { ..themed("card-title", &[], attributes), {children} }
    }
}

#[component]
pub fn CardDescription(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        p { ..themed("card-description", &[], attributes), {children} }
    }
}

#[component]
pub fn CardContent(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("card-content", &[], attributes), {children} }
    }
}

#[component]
pub fn CardFooter(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("card-footer", &[], attributes), {children} }
    }
}

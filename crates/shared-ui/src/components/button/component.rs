use dioxus::prelude::*;

use crate::components::themed;

/// Style variant for [`Button`]. Destructive is reserved for actions
/// that remove data (deleting a property, removing a user).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Destructive,
    Outline,
}

impl ButtonVariant {
    fn data_style(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Destructive => "destructive",
            ButtonVariant::Outline => "outline",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = false)] disabled: bool,
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let attrs = themed("button", &[("data-style", variant.data_style())], attributes);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        button {
            disabled,
            onclick: move |evt| {
                if let Some(cb) = &onclick {
                    cb.call(evt);
                }
            },
            ..attrs,
            {children}
        }
    }
}

use dioxus::prelude::*;

use crate::components::themed;

/// Text input with an optional stacked label. `input_type` passes
/// straight through, so password and email fields use the same
/// component.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let attrs = themed("input", &[], attributes);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "input-wrapper",
            if !label.is_empty() {
                label { class: "input-label", "{label}" }
            }
            input {
                r#type: "{input_type}",
                value,
                placeholder,
                disabled,
                oninput: move |evt| on_input.call(evt),
                ..attrs,
            }
        }
    }
}

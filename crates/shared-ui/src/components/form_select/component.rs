use dioxus::prelude::*;

/// Native `<select>` with the app theme applied. Covers every dropdown
/// in Keystead (role pickers, property type and status fields, list
/// filters) without reaching for a compound primitive.
///
/// Children are plain `option { value: "...", "Label" }` elements.
#[component]
pub fn FormSelect(
    /// Value of the selected option.
    #[props(default)]
    value: String,
    /// Fires when the user picks a different option.
    #[props(default)]
    onchange: Option<EventHandler<Event<FormData>>>,
    /// Optional label rendered above the select.
    #[props(default)]
    label: String,
    #[props(default = false)] disabled: bool,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "form-select-wrapper",
            if !label.is_empty() {
                label { class: "form-select-label", "{label}" }
            }
            select {
                class: "form-select",
                value,
                disabled,
                onchange: move |evt| {
                    if let Some(cb) = &onchange {
                        cb.call(evt);
                    }
                },
                {children}
            }
        }
    }
}

use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Input, Label};
use std::collections::HashMap;

/// One labelled input plus its server-side validation message. The id
/// doubles as the field key the server reports errors under. Shared
/// with the register page.
#[component]
pub(crate) fn FormField(
    id: &'static str,
    label: &'static str,
    #[props(default = "text")] input_type: &'static str,
    placeholder: &'static str,
    mut value: Signal<String>,
    errors: ReadOnlySignal<HashMap<String, String>>,
) -> Element {
    rsx! {
        div { class: "form-field",
            Label { html_for: id, "{label}" }
            Input {
                id,
                input_type: input_type.to_string(),
                placeholder: placeholder.to_string(),
                value: value(),
                on_input: move |e: FormEvent| value.set(e.value()),
            }
            if let Some(err) = errors().get(id) {
                div { class: "form-field-error", "{err}" }
            }
        }
    }
}

/// Email/password sign-in. The optional `next` query parameter carries the
/// path a signed-out visitor originally asked for; a successful login lands
/// there instead of on the dashboard.
#[component]
pub fn Login(next: Option<String>) -> Element {
    let mut auth = use_auth();
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let mut form_error = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut busy = use_signal(|| false);

    // Parked in a signal so the closures below can read it freely
    let destination = use_signal(move || next);

    let continue_on = move || {
        match &*destination.read() {
            Some(path) => navigator().push(NavigationTarget::<Route>::External(path.clone())),
            None => navigator().push(Route::Dashboard {}),
        };
    };

    if auth.is_authenticated() {
        continue_on();
    }

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        busy.set(true);
        form_error.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(email(), password()).await {
            Ok(user) => {
                auth.set_user(user);
                continue_on();
            }
            Err(e) => {
                let raw = e.to_string();
                match shared_types::AppError::parse_field_errors(&raw) {
                    fe if fe.is_empty() => {
                        form_error.set(Some(shared_types::AppError::friendly_message(&raw)));
                    }
                    fe => field_errors.set(fe),
                }
            }
        }
        busy.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "entry-page",
            Card {
                class: "entry-card",

                CardHeader {
                    CardTitle { "Sign In" }
                    CardDescription { "Enter your credentials to access the portal" }
                }

                CardContent {
                    if let Some(err) = form_error() {
                        div { class: "form-banner-error", "{err}" }
                    }

                    form { onsubmit: submit,
                        FormField {
                            id: "email",
                            label: "Email",
                            input_type: "email",
                            placeholder: "you@example.com",
                            value: email,
                            errors: field_errors,
                        }
                        FormField {
                            id: "password",
                            label: "Password",
                            input_type: "password",
                            placeholder: "Enter your password",
                            value: password,
                            errors: field_errors,
                        }
                        button {
                            r#type: "submit",
                            class: "entry-submit button",
                            disabled: busy(),
                            if busy() { "Signing in..." } else { "Sign In" }
                        }
                    }
                }

                CardFooter {
                    p { class: "entry-switch",
                        "New to Keystead? "
                        Link { to: Route::Register {}, "Create an account" }
                    }
                }
            }
        }
    }
}

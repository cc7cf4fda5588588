use crate::auth::use_auth;
use crate::routes::login::FormField;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle};
use std::collections::HashMap;

/// Sign-up page. Every new account starts as a tenant; staff roles
/// are granted later from the user administration page.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let username = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let display_name = use_signal(String::new);
    let mut form_error = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut busy = use_signal(|| false);

    // Signed-in users have no business here
    if auth.is_authenticated() {
        navigator().push(Route::Dashboard {});
    }

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        busy.set(true);
        form_error.set(None);
        field_errors.set(HashMap::new());

        match server::api::register(username(), email(), password(), display_name()).await {
            Ok(user) => {
                auth.set_user(user);
                navigator().push(Route::Dashboard {});
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
                    CardTitle { "Create Account" }
                    CardDescription { "Create an account to get started" }
                }

                CardContent {
                    if let Some(err) = form_error() {
                        div { class: "form-banner-error", "{err}" }
                    }

                    form { onsubmit: submit,
                        FormField {
                            id: "display_name",
                            label: "Display Name",
                            placeholder: "Your display name",
                            value: display_name,
                            errors: field_errors,
                        }
                        FormField {
                            id: "username",
                            label: "Username",
                            placeholder: "Choose a username",
                            value: username,
                            errors: field_errors,
                        }
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
                            placeholder: "At least 8 characters",
                            value: password,
                            errors: field_errors,
                        }
                        button {
                            r#type: "submit",
                            class: "entry-submit button",
                            disabled: busy(),
                            if busy() { "Creating account..." } else { "Create Account" }
                        }
                    }
                }

                CardFooter {
                    p { class: "entry-switch",
                        "Already have an account? "
                        Link { to: Route::Login { next: None }, "Sign in" }
                    }
                }
            }
        }
    }
}

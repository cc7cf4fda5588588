use crate::auth::use_auth;
use dioxus::prelude::*;
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    Input, Label, ToastOptions,
};
use std::collections::HashMap;

/// Account settings: profile details and password change.
#[component]
pub fn Profile() -> Element {
    let mut auth = use_auth();
    let toast = use_toast();

    let user = auth.current_user.read().clone();
    let mut display_name = use_signal({
        let user = user.clone();
        move || user.as_ref().map(|u| u.display_name.clone()).unwrap_or_default()
    });
    let mut email =
        use_signal(move || user.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    let mut saving = use_signal(|| false);
    let mut profile_error = use_signal(|| Option::<String>::None);
    let mut profile_field_errors = use_signal(HashMap::<String, String>::new);

    let mut current_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut changing = use_signal(|| false);
    let mut password_field_errors = use_signal(HashMap::<String, String>::new);

    let handle_save = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        profile_error.set(None);
        profile_field_errors.set(HashMap::new());

        match server::api::update_profile(display_name(), email()).await {
            Ok(user) => {
                auth.set_user(user);
                toast.success("Profile updated".to_string(), ToastOptions::new());
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = shared_types::AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    profile_error.set(Some(shared_types::AppError::friendly_message(&err_str)));
                } else {
                    profile_field_errors.set(fe);
                }
            }
        }
        saving.set(false);
    };

    let handle_change_password = move |evt: FormEvent| async move {
        evt.prevent_default();
        if new_password() != confirm_password() {
            toast.error("Passwords do not match".to_string(), ToastOptions::new());
            return;
        }
        changing.set(true);
        password_field_errors.set(HashMap::new());

        match server::api::change_password(current_password(), new_password()).await {
            Ok(_) => {
                current_password.set(String::new());
                new_password.set(String::new());
                confirm_password.set(String::new());
                toast.success("Password changed".to_string(), ToastOptions::new());
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = shared_types::AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    toast.error(
                        shared_types::AppError::friendly_message(&err_str),
                        ToastOptions::new(),
                    );
                } else {
                    password_field_errors.set(fe);
                }
            }
        }
        changing.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./profile.css") }

        div { class: "profile-page",
            Card {
                CardHeader {
                    CardTitle { "Profile" }
                    CardDescription { "How you appear to other users" }
                }
                CardContent {
                    if let Some(err) = profile_error() {
                        div { class: "form-banner-error", "{err}" }
                    }

                    form { class: "profile-form", onsubmit: handle_save,
                        div { class: "profile-field",
                            Label { html_for: "display-name", "Display Name" }
                            Input {
                                id: "display-name",
                                value: display_name(),
                                placeholder: "Enter your name",
                                on_input: move |evt: FormEvent| display_name.set(evt.value()),
                            }
                            if let Some(err) = profile_field_errors().get("display_name") {
                                div { class: "profile-field-error", "{err}" }
                            }
                        }
                        div { class: "profile-field",
                            Label { html_for: "email", "Email Address" }
                            Input {
                                id: "email",
                                value: email(),
                                placeholder: "Enter your email",
                                on_input: move |evt: FormEvent| email.set(evt.value()),
                            }
                            if let Some(err) = profile_field_errors().get("email") {
                                div { class: "profile-field-error", "{err}" }
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: saving(),
                            if saving() { "Saving..." } else { "Save Profile" }
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle { "Change Password" }
                    CardDescription { "You stay signed in on this device" }
                }
                CardContent {
                    form { class: "profile-form", onsubmit: handle_change_password,
                        div { class: "profile-field",
                            Label { html_for: "current-password", "Current Password" }
                            Input {
                                input_type: "password",
                                id: "current-password",
                                value: current_password(),
                                on_input: move |evt: FormEvent| current_password.set(evt.value()),
                            }
                            if let Some(err) = password_field_errors().get("current_password") {
                                div { class: "profile-field-error", "{err}" }
                            }
                        }
                        div { class: "profile-field",
                            Label { html_for: "new-password", "New Password" }
                            Input {
                                input_type: "password",
                                id: "new-password",
                                value: new_password(),
                                placeholder: "At least 8 characters",
                                on_input: move |evt: FormEvent| new_password.set(evt.value()),
                            }
                            if let Some(err) = password_field_errors().get("new_password") {
                                div { class: "profile-field-error", "{err}" }
                            }
                        }
                        div { class: "profile-field",
                            Label { html_for: "confirm-password", "Confirm New Password" }
                            Input {
                                input_type: "password",
                                id: "confirm-password",
                                value: confirm_password(),
                                on_input: move |evt: FormEvent| confirm_password.set(evt.value()),
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: changing(),
                            if changing() { "Changing..." } else { "Change Password" }
                        }
                    }
                }
            }
        }
    }
}

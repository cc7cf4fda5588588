use crate::auth::use_auth;
use dioxus::prelude::*;
use shared_types::Role;
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, FormSelect, Skeleton, ToastOptions,
};

/// Admin console: every account with inline role assignment and removal.
///
/// The server rejects role changes and deletes aimed at the caller's own
/// account; the table disables those controls up front as well.
#[component]
pub fn Users() -> Element {
    let auth = use_auth();
    let toast = use_toast();

    let mut users_resource =
        use_resource(move || async move { server::api::list_users().await });

    let my_id = auth.current_user.read().as_ref().map(|u| u.id);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./users.css") }

        div { class: "users-page",
            div { class: "users-header",
                h2 { "User Management" }
                p { class: "users-subtitle", "Assign roles to control which pages each account can reach." }
            }

            match &*users_resource.read_unchecked() {
                Some(Ok(users)) => rsx! {
                    table { class: "users-table",
                        thead {
                            tr {
                                th { "Username" }
                                th { "Display Name" }
                                th { "Email" }
                                th { "Role" }
                                th { "Joined" }
                                th { "" }
                            }
                        }
                        tbody {
                            for user in users.iter() {
                                {
                                    let user_id = user.id;
                                    let is_me = my_id == Some(user_id);
                                    rsx! {
                                        tr { key: "{user_id}",
                                            td { class: "users-username",
                                                "{user.username}"
                                                if is_me {
                                                    span { class: "users-self-marker", " (you)" }
                                                }
                                            }
                                            td { "{user.display_name}" }
                                            td { "{user.email}" }
                                            td {
                                                div { class: "users-role-cell",
                                                    Badge { variant: role_badge_variant(user.role), "{user.role.label()}" }
                                                    FormSelect {
                                                        value: user.role.as_str().to_string(),
                                                        disabled: is_me,
                                                        onchange: move |evt: Event<FormData>| {
                                                            let next = Role::from_str_or_default(&evt.value());
                                                            spawn(async move {
                                                                match server::api::set_user_role(user_id, next).await {
                                                                    Ok(updated) => {
                                                                        toast.success(
                                                                            format!("{} is now {}", updated.username, updated.role.label()),
                                                                            ToastOptions::new(),
                                                                        );
                                                                        users_resource.restart();
                                                                    }
                                                                    Err(e) => {
                                                                        toast.error(
                                                                            shared_types::AppError::friendly_message(&e.to_string()),
                                                                            ToastOptions::new(),
                                                                        );
                                                                        users_resource.restart();
                                                                    }
                                                                }
                                                            });
                                                        },
                                                        for role in Role::ALL {
                                                            option { value: role.as_str(), selected: role == user.role, "{role.label()}" }
                                                        }
                                                    }
                                                }
                                            }
                                            td { class: "users-joined", "{user.created_at}" }
                                            td {
                                                if !is_me {
                                                    Button {
                                                        variant: ButtonVariant::Destructive,
                                                        onclick: move |_| {
                                                            spawn(async move {
                                                                match server::api::delete_user(user_id).await {
                                                                    Ok(resp) => {
                                                                        toast.success(resp.message, ToastOptions::new());
                                                                        users_resource.restart();
                                                                    }
                                                                    Err(e) => {
                                                                        toast.error(
                                                                            shared_types::AppError::friendly_message(&e.to_string()),
                                                                            ToastOptions::new(),
                                                                        );
                                                                    }
                                                                }
                                                            });
                                                        },
                                                        "Delete"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! {
                    div { class: "users-error",
                        "Failed to load users: {shared_types::AppError::friendly_message(&e.to_string())}"
                    }
                },
                None => rsx! {
                    div { class: "users-loading",
                        Skeleton { style: "height: 2.5rem; margin-bottom: 0.5rem;" }
                        Skeleton { style: "height: 2.5rem; margin-bottom: 0.5rem;" }
                        Skeleton { style: "height: 2.5rem;" }
                    }
                },
            }
        }
    }
}

fn role_badge_variant(role: Role) -> BadgeVariant {
    match role {
        Role::Admin => BadgeVariant::Destructive,
        Role::Owner => BadgeVariant::Primary,
        Role::Agent => BadgeVariant::Secondary,
        Role::Tenant => BadgeVariant::Outline,
    }
}

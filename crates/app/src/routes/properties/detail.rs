use dioxus::prelude::*;
use shared_types::{Property, UpdatePropertyRequest, PROPERTY_TYPES};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, FormSelect, Input, Label, PageActions, PageHeader, PageTitle, Separator,
    Skeleton, ToastOptions,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::list::property_type_label;
use crate::require_roles::RequireRoles;
use crate::routes::{Route, MANAGERS};

/// Detail view for one property. Editing and removal are manager actions;
/// agents see the read-only card.
#[component]
pub fn PropertyDetailPage(id: String) -> Element {
    let toast = use_toast();
    let nav = use_navigator();

    let parsed = Uuid::parse_str(&id).ok();
    let mut property = use_resource(move || async move {
        match parsed {
            Some(pid) => server::api::get_property(pid).await.ok(),
            None => None,
        }
    });

    let mut editing = use_signal(|| false);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./properties.css") }

        match &*property.read_unchecked() {
            Some(Some(p)) => {
                let p = p.clone();
                let pid = p.id;
                rsx! {
                    PageHeader {
                        PageTitle { "{p.name}" }
                        PageActions {
                            RequireRoles { policy: MANAGERS,
                                Button {
                                    variant: ButtonVariant::Outline,
                                    onclick: move |_| editing.set(!editing()),
                                    if editing() { "Cancel" } else { "Edit" }
                                }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    onclick: move |_| {
                                        spawn(async move {
                                            match server::api::delete_property(pid).await {
                                                Ok(resp) => {
                                                    toast.success(resp.message, ToastOptions::new());
                                                    nav.push(Route::PropertyList {});
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
                                    "Remove"
                                }
                            }
                        }
                    }

                    if editing() {
                        EditPropertyForm {
                            property: p.clone(),
                            on_saved: move |_| {
                                editing.set(false);
                                property.restart();
                            },
                        }
                    } else {
                        Card {
                            CardHeader {
                                CardTitle { "Details" }
                                CardDescription { "{p.short_address()} {p.postal_code}" }
                            }
                            CardContent {
                                div { class: "property-detail-grid",
                                    div { class: "property-detail-item",
                                        span { class: "property-detail-label", "Type" }
                                        Badge { variant: BadgeVariant::Secondary, "{property_type_label(&p.property_type)}" }
                                    }
                                    div { class: "property-detail-item",
                                        span { class: "property-detail-label", "Status" }
                                        Badge {
                                            variant: if p.status == "active" { BadgeVariant::Primary } else { BadgeVariant::Outline },
                                            "{p.status}"
                                        }
                                    }
                                    div { class: "property-detail-item",
                                        span { class: "property-detail-label", "Units" }
                                        span { "{p.unit_count}" }
                                    }
                                    div { class: "property-detail-item",
                                        span { class: "property-detail-label", "Occupied" }
                                        span { "{p.occupied_count}" }
                                    }
                                    div { class: "property-detail-item",
                                        span { class: "property-detail-label", "Vacant" }
                                        span { "{p.vacancy()}" }
                                    }
                                }
                                Separator {}
                                p { class: "property-detail-added",
                                    {format!("Added {}", p.created_at.format("%B %e, %Y"))}
                                }
                            }
                        }
                    }
                }
            }
            Some(None) => rsx! {
                Card {
                    CardContent {
                        div { class: "property-empty-state",
                            p { class: "property-empty-title", "Property not found" }
                            Link { to: Route::PropertyList {}, "Back to Properties" }
                        }
                    }
                }
            },
            None => rsx! {
                div { class: "property-loading",
                    Skeleton { style: "height: 2rem; width: 40%; margin-bottom: 1rem;" }
                    Skeleton { style: "height: 12rem; width: 100%;" }
                }
            },
        }
    }
}

/// Manager-only edit form, pre-filled from the loaded property.
#[component]
fn EditPropertyForm(property: Property, on_saved: EventHandler<()>) -> Element {
    let toast = use_toast();
    let pid = property.id;

    let mut name = use_signal({
        let v = property.name.clone();
        move || v.clone()
    });
    let mut address_line = use_signal({
        let v = property.address_line.clone();
        move || v.clone()
    });
    let mut city = use_signal({
        let v = property.city.clone();
        move || v.clone()
    });
    let mut state = use_signal({
        let v = property.state.clone();
        move || v.clone()
    });
    let mut postal_code = use_signal({
        let v = property.postal_code.clone();
        move || v.clone()
    });
    let mut property_type = use_signal({
        let v = property.property_type.clone();
        move || v.clone()
    });
    let mut status = use_signal({
        let v = property.status.clone();
        move || v.clone()
    });
    let mut unit_count = use_signal(move || property.unit_count.to_string());
    let occupied = property.occupied_count;
    let mut occupied_count = use_signal(move || occupied.to_string());

    let mut saving = use_signal(|| false);
    let mut form_error = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);

    let handle_save = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        form_error.set(None);
        field_errors.set(HashMap::new());

        let request = UpdatePropertyRequest {
            name: name(),
            address_line: address_line(),
            city: city(),
            state: state(),
            postal_code: postal_code(),
            property_type: property_type(),
            unit_count: unit_count().parse().unwrap_or(0),
            occupied_count: occupied_count().parse().unwrap_or(0),
            status: status(),
        };

        match server::api::update_property(pid, request).await {
            Ok(updated) => {
                toast.success(format!("Saved {}", updated.name), ToastOptions::new());
                on_saved.call(());
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = shared_types::AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    form_error.set(Some(shared_types::AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        saving.set(false);
    };

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Edit Property" }
            }
            CardContent {
                if let Some(err) = form_error() {
                    div { class: "form-banner-error", "{err}" }
                }

                form { class: "property-form", onsubmit: handle_save,
                    div { class: "property-form-row",
                        div { class: "property-field",
                            Label { html_for: "edit-name", "Name" }
                            Input {
                                id: "edit-name",
                                value: name(),
                                on_input: move |e: FormEvent| name.set(e.value()),
                            }
                            if let Some(err) = field_errors().get("name") {
                                div { class: "property-field-error", "{err}" }
                            }
                        }
                        div { class: "property-field",
                            Label { html_for: "edit-type", "Type" }
                            FormSelect {
                                value: property_type(),
                                onchange: move |e: Event<FormData>| property_type.set(e.value()),
                                for t in PROPERTY_TYPES {
                                    option { value: t, selected: t == property_type(), "{property_type_label(t)}" }
                                }
                            }
                        }
                        div { class: "property-field",
                            Label { html_for: "edit-status", "Status" }
                            FormSelect {
                                value: status(),
                                onchange: move |e: Event<FormData>| status.set(e.value()),
                                option { value: "active", selected: status() == "active", "Active" }
                                option { value: "archived", selected: status() == "archived", "Archived" }
                            }
                        }
                    }
                    div { class: "property-form-row",
                        div { class: "property-field",
                            Label { html_for: "edit-address", "Street Address" }
                            Input {
                                id: "edit-address",
                                value: address_line(),
                                on_input: move |e: FormEvent| address_line.set(e.value()),
                            }
                            if let Some(err) = field_errors().get("address_line") {
                                div { class: "property-field-error", "{err}" }
                            }
                        }
                        div { class: "property-field",
                            Label { html_for: "edit-city", "City" }
                            Input {
                                id: "edit-city",
                                value: city(),
                                on_input: move |e: FormEvent| city.set(e.value()),
                            }
                            if let Some(err) = field_errors().get("city") {
                                div { class: "property-field-error", "{err}" }
                            }
                        }
                        div { class: "property-field property-field-narrow",
                            Label { html_for: "edit-state", "State" }
                            Input {
                                id: "edit-state",
                                value: state(),
                                on_input: move |e: FormEvent| state.set(e.value()),
                            }
                            if let Some(err) = field_errors().get("state") {
                                div { class: "property-field-error", "{err}" }
                            }
                        }
                        div { class: "property-field property-field-narrow",
                            Label { html_for: "edit-postal", "Postal Code" }
                            Input {
                                id: "edit-postal",
                                value: postal_code(),
                                on_input: move |e: FormEvent| postal_code.set(e.value()),
                            }
                            if let Some(err) = field_errors().get("postal_code") {
                                div { class: "property-field-error", "{err}" }
                            }
                        }
                    }
                    div { class: "property-form-row",
                        div { class: "property-field property-field-narrow",
                            Label { html_for: "edit-units", "Units" }
                            Input {
                                input_type: "number",
                                id: "edit-units",
                                value: unit_count(),
                                on_input: move |e: FormEvent| unit_count.set(e.value()),
                            }
                            if let Some(err) = field_errors().get("unit_count") {
                                div { class: "property-field-error", "{err}" }
                            }
                        }
                        div { class: "property-field property-field-narrow",
                            Label { html_for: "edit-occupied", "Occupied" }
                            Input {
                                input_type: "number",
                                id: "edit-occupied",
                                value: occupied_count(),
                                on_input: move |e: FormEvent| occupied_count.set(e.value()),
                            }
                            if let Some(err) = field_errors().get("occupied_count") {
                                div { class: "property-field-error", "{err}" }
                            }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save Changes" }
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use shared_types::{CreatePropertyRequest, PROPERTY_TYPES};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, FormSelect, Input, Label, PageActions, PageHeader, PageTitle, Skeleton,
    ToastOptions,
};
use std::collections::HashMap;

use crate::require_roles::RequireRoles;
use crate::routes::{Route, MANAGERS};

/// Portfolio listing for staff. The add-property form only exists for
/// managers; agents get the read-only table.
#[component]
pub fn PropertyListPage() -> Element {
    let toast = use_toast();
    let mut properties = use_resource(move || async move { server::api::list_properties().await });

    let mut show_form = use_signal(|| false);
    let mut name = use_signal(String::new);
    let mut address_line = use_signal(String::new);
    let mut city = use_signal(String::new);
    let mut state = use_signal(String::new);
    let mut postal_code = use_signal(String::new);
    let mut property_type = use_signal(|| "apartment".to_string());
    let mut unit_count = use_signal(|| "1".to_string());
    let mut saving = use_signal(|| false);
    let mut form_error = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);

    let handle_create = move |evt: FormEvent| async move {
        evt.prevent_default();
        saving.set(true);
        form_error.set(None);
        field_errors.set(HashMap::new());

        let request = CreatePropertyRequest {
            name: name(),
            address_line: address_line(),
            city: city(),
            state: state(),
            postal_code: postal_code(),
            property_type: property_type(),
            unit_count: unit_count().parse().unwrap_or(0),
        };

        match server::api::create_property(request).await {
            Ok(property) => {
                toast.success(format!("Added {}", property.name), ToastOptions::new());
                show_form.set(false);
                name.set(String::new());
                address_line.set(String::new());
                city.set(String::new());
                state.set(String::new());
                postal_code.set(String::new());
                unit_count.set("1".to_string());
                properties.restart();
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
        document::Link { rel: "stylesheet", href: asset!("./properties.css") }

        PageHeader {
            PageTitle { "Properties" }
            PageActions {
                RequireRoles { policy: MANAGERS,
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_form.set(!show_form()),
                        if show_form() { "Cancel" } else { "Add Property" }
                    }
                }
            }
        }

        if show_form() {
            Card {
                CardHeader {
                    CardTitle { "New Property" }
                }
                CardContent {
                    if let Some(err) = form_error() {
                        div { class: "form-banner-error", "{err}" }
                    }

                    form { class: "property-form", onsubmit: handle_create,
                        div { class: "property-form-row",
                            div { class: "property-field",
                                Label { html_for: "prop-name", "Name" }
                                Input {
                                    id: "prop-name",
                                    placeholder: "Maple Court Apartments",
                                    value: name(),
                                    on_input: move |e: FormEvent| name.set(e.value()),
                                }
                                if let Some(err) = field_errors().get("name") {
                                    div { class: "property-field-error", "{err}" }
                                }
                            }
                            div { class: "property-field",
                                Label { html_for: "prop-type", "Type" }
                                FormSelect {
                                    value: property_type(),
                                    onchange: move |e: Event<FormData>| property_type.set(e.value()),
                                    for t in PROPERTY_TYPES {
                                        option { value: t, "{property_type_label(t)}" }
                                    }
                                }
                            }
                            div { class: "property-field",
                                Label { html_for: "prop-units", "Units" }
                                Input {
                                    input_type: "number",
                                    id: "prop-units",
                                    value: unit_count(),
                                    on_input: move |e: FormEvent| unit_count.set(e.value()),
                                }
                                if let Some(err) = field_errors().get("unit_count") {
                                    div { class: "property-field-error", "{err}" }
                                }
                            }
                        }
                        div { class: "property-form-row",
                            div { class: "property-field",
                                Label { html_for: "prop-address", "Street Address" }
                                Input {
                                    id: "prop-address",
                                    placeholder: "12 Maple St",
                                    value: address_line(),
                                    on_input: move |e: FormEvent| address_line.set(e.value()),
                                }
                                if let Some(err) = field_errors().get("address_line") {
                                    div { class: "property-field-error", "{err}" }
                                }
                            }
                            div { class: "property-field",
                                Label { html_for: "prop-city", "City" }
                                Input {
                                    id: "prop-city",
                                    value: city(),
                                    on_input: move |e: FormEvent| city.set(e.value()),
                                }
                                if let Some(err) = field_errors().get("city") {
                                    div { class: "property-field-error", "{err}" }
                                }
                            }
                            div { class: "property-field property-field-narrow",
                                Label { html_for: "prop-state", "State" }
                                Input {
                                    id: "prop-state",
                                    placeholder: "OR",
                                    value: state(),
                                    on_input: move |e: FormEvent| state.set(e.value()),
                                }
                                if let Some(err) = field_errors().get("state") {
                                    div { class: "property-field-error", "{err}" }
                                }
                            }
                            div { class: "property-field property-field-narrow",
                                Label { html_for: "prop-postal", "Postal Code" }
                                Input {
                                    id: "prop-postal",
                                    value: postal_code(),
                                    on_input: move |e: FormEvent| postal_code.set(e.value()),
                                }
                                if let Some(err) = field_errors().get("postal_code") {
                                    div { class: "property-field-error", "{err}" }
                                }
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: saving(),
                            if saving() { "Adding..." } else { "Add to Portfolio" }
                        }
                    }
                }
            }
        }

        match &*properties.read_unchecked() {
            Some(Ok(list)) => rsx! {
                if list.is_empty() {
                    Card {
                        CardContent {
                            div { class: "property-empty-state",
                                p { class: "property-empty-title", "No properties yet" }
                                p { class: "property-empty-description", "The portfolio is empty." }
                            }
                        }
                    }
                } else {
                    table { class: "property-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Address" }
                                th { "Type" }
                                th { "Units" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for property in list.iter() {
                                tr { key: "{property.id}",
                                    td {
                                        Link {
                                            to: Route::PropertyDetail { id: property.id.to_string() },
                                            class: "property-name-link",
                                            "{property.name}"
                                        }
                                    }
                                    td { class: "property-address", "{property.short_address()}" }
                                    td {
                                        Badge { variant: BadgeVariant::Secondary, "{property_type_label(&property.property_type)}" }
                                    }
                                    td { "{property.occupied_count}/{property.unit_count}" }
                                    td {
                                        Badge {
                                            variant: if property.status == "active" { BadgeVariant::Primary } else { BadgeVariant::Outline },
                                            "{property.status}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            Some(Err(e)) => rsx! {
                Card {
                    CardContent {
                        p { class: "property-empty-title",
                            "Failed to load properties: {shared_types::AppError::friendly_message(&e.to_string())}"
                        }
                    }
                }
            },
            None => rsx! {
                div { class: "property-loading",
                    for _ in 0..4 {
                        Skeleton { style: "height: 3rem; width: 100%; margin-bottom: 0.5rem;" }
                    }
                }
            },
        }
    }
}

/// Display label for a stored property type tag.
pub(crate) fn property_type_label(t: &str) -> &str {
    match t {
        "apartment" => "Apartment",
        "single_family" => "Single Family",
        "duplex" => "Duplex",
        "commercial" => "Commercial",
        other => other,
    }
}

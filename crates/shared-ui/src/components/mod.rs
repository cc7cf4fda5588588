use dioxus::prelude::*;

// Standalone components (no primitives)
pub mod badge;
pub mod button;
pub mod card;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod skeleton;

// Simple primitive wrappers
pub mod label;
pub mod separator;
pub mod switch;

// Overlay/popup wrappers
pub mod dropdown_menu;

// Navigation & special
pub mod avatar;
pub mod navbar;
pub mod toast;

// Depends on button and separator
pub mod sidebar;

// Re-exports for convenience
pub use avatar::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use dropdown_menu::*;
pub use form_select::*;
pub use input::*;
pub use label::*;
pub use navbar::*;
pub use page_header::*;
pub use separator::*;
pub use sidebar::*;
pub use skeleton::*;
pub use switch::*;
pub use toast::*;

/// Base class plus `data-*` variant attributes, merged ahead of the
/// caller's attributes so callers can extend the class list or override
/// individual attributes.
pub(crate) fn themed(
    class: &'static str,
    data: &[(&'static str, &'static str)],
    attributes: Vec<Attribute>,
) -> Vec<Attribute> {
    let mut base = Vec::with_capacity(data.len() + 1);
    base.push(Attribute::new("class", class, None, false));
    for (name, value) in data {
        base.push(Attribute::new(*name, *value, None, false));
    }
    dioxus_primitives::merge_attributes(vec![base, attributes])
}

/// Append our styling class to a primitive's attribute list before
/// spreading the props back into the primitive.
pub(crate) fn with_class(mut attributes: Vec<Attribute>, class: &'static str) -> Vec<Attribute> {
    attributes.push(Attribute::new("class", class, None, false));
    attributes
}

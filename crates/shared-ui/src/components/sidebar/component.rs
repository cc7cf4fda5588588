use dioxus::prelude::*;

use crate::components::themed;

// ─── Open/closed state ─────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct SidebarCtx {
    open: Signal<bool>,
}

impl SidebarCtx {
    fn is_open(self) -> bool {
        (self.open)()
    }

    fn toggle(mut self) {
        let flipped = !(self.open)();
        self.open.set(flipped);
    }

    fn close(mut self) {
        self.open.set(false);
    }
}

fn use_sidebar() -> SidebarCtx {
    use_context::<SidebarCtx>()
}

/// Owns the open/closed signal and shares it with every piece below.
/// The app shell wraps the sidebar and the page inset in one of these
/// so the trigger in the top bar can reach the same state.
#[component]
pub fn SidebarProvider(#[props(default = true)] default_open: bool, children: Element) -> Element {
    let ctx = SidebarCtx {
        open: use_signal(|| default_open),
    };
    use_context_provider(|| ctx);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "sidebar-provider",
            "data-sidebar-open": if ctx.is_open() { "true" } else { "false" },
            {children}
        }
    }
}

// ─── Frame ─────────────────────────────────────────────────────────────

/// Navigation column. Desktop keeps it docked; narrow viewports turn
/// it into an overlay with a tap-to-dismiss backdrop.
#[component]
pub fn Sidebar(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let ctx = use_sidebar();
    let state = if ctx.is_open() { "open" } else { "closed" };
    let attrs = themed("sidebar", &[("data-state", state)], attributes);

    rsx! {
        if ctx.is_open() {
            div {
                class: "sidebar-backdrop",
                onclick: move |_| ctx.close(),
            }
        }
        aside { ..attrs, {children} }
    }
}

#[component]
pub fn SidebarHeader(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("sidebar-header", &[], attributes), {children} }
    }
}

/// Scrollable middle of the column, between header and footer.
#[component]
pub fn SidebarContent(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("sidebar-content", &[], attributes), {children} }
    }
}

#[component]
pub fn SidebarFooter(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("sidebar-footer", &[], attributes), {children} }
    }
}

/// Page area beside the sidebar. Rendered as `main`; its margin
/// follows the open/closed state through CSS.
#[component]
pub fn SidebarInset(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        main { ..themed("sidebar-inset", &[], attributes), {children} }
    }
}

// ─── Groups and menus ──────────────────────────────────────────────────

/// One labelled cluster of links. The shell builds a group per
/// audience: Workspace for everyone, Management for staff roles,
/// Administration for admins.
#[component]
pub fn SidebarGroup(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("sidebar-group", &[], attributes), {children} }
    }
}

#[component]
pub fn SidebarGroupLabel(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("sidebar-group-label", &[], attributes), {children} }
    }
}

#[component]
pub fn SidebarGroupContent(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        div { ..themed("sidebar-group-content", &[], attributes), {children} }
    }
}

#[component]
pub fn SidebarMenu(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        ul { ..themed("sidebar-menu", &[], attributes), {children} }
    }
}

#[component]
pub fn SidebarMenuItem(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        li { ..themed("sidebar-menu-item", &[], attributes), {children} }
    }
}

/// Link body inside a menu item. `active` marks the entry matching
/// the current route. Clicking closes the sidebar so the overlay gets
/// out of the way after navigating on mobile.
#[component]
pub fn SidebarMenuButton(
    #[props(default = false)] active: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let ctx = use_sidebar();
    let attrs = themed(
        "sidebar-menu-button",
        &[("data-active", if active { "true" } else { "false" })],
        attributes,
    );

    rsx! {
        button {
            onclick: move |_| ctx.close(),
            ..attrs,
            {children}
        }
    }
}

#[component]
pub fn SidebarSeparator(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        hr { ..themed("sidebar-separator", &[], attributes) }
    }
}

// ─── Toggles ───────────────────────────────────────────────────────────

/// Hamburger-style toggle. The shell places one in the top bar.
#[component]
pub fn SidebarTrigger(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let ctx = use_sidebar();

    rsx! {
        button {
            r#type: "button",
            "aria-label": "Toggle sidebar",
            onclick: move |_| ctx.toggle(),
            ..themed("sidebar-trigger", &[], attributes),
            {children}
        }
    }
}

/// Invisible strip along the sidebar edge; clicking it toggles the
/// column without needing the top-bar trigger.
#[component]
pub fn SidebarRail() -> Element {
    let ctx = use_sidebar();

    rsx! {
        button {
            class: "sidebar-rail",
            r#type: "button",
            "aria-label": "Toggle sidebar",
            tabindex: -1,
            onclick: move |_| ctx.toggle(),
        }
    }
}

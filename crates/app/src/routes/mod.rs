pub mod communications;
pub mod dashboard;
pub mod documents;
pub mod financial;
pub mod leases;
pub mod login;
pub mod maintenance;
pub mod messages;
pub mod not_found;
pub mod profile;
pub mod properties;
pub mod register;
pub mod schedule;
pub mod users;

use crate::auth::{use_auth, use_role, use_nav_sections};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBell, LdBriefcase, LdCalendar, LdFileText, LdFolder, LdLayoutDashboard, LdScale, LdSettings,
    LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{evaluate, AccessDecision, AccessPolicy, FeatureFlags, Role, Session};
use shared_ui::{
    Avatar, AvatarFallback, Badge, BadgeVariant, DropdownMenu, DropdownMenuContent,
    DropdownMenuItem, DropdownMenuSeparator, DropdownMenuTrigger, Navbar, Separator, Sidebar,
    SidebarContent, SidebarFooter, SidebarGroup, SidebarGroupContent, SidebarGroupLabel,
    SidebarHeader, SidebarInset, SidebarMenu, SidebarMenuButton, SidebarMenuItem, SidebarProvider,
    SidebarRail, SidebarSeparator, SidebarTrigger, Switch, SwitchThumb,
};

use communications::Communications;
use dashboard::Dashboard;
use documents::Documents;
use financial::Financial;
use leases::Leases;
use login::Login;
use maintenance::Maintenance;
use messages::Messages;
use not_found::NotFound;
use profile::Profile;
use register::Register;
use schedule::Schedule;
use users::Users;

/// Page table for the router.
///
/// The two `#[layout]` markers wrap every page between them in the access
/// check and the app chrome; login, register and the catch-all render bare.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login?:next")]
    Login { next: Option<String> },
    #[route("/register")]
    Register {},
    #[layout(AccessGuard)]
    #[layout(Shell)]
    #[route("/")]
    Dashboard {},
    #[route("/properties")]
    PropertyList {},
    #[route("/properties/:id")]
    PropertyDetail { id: String },
    #[route("/financial")]
    Financial {},
    #[route("/leases")]
    Leases {},
    #[route("/maintenance")]
    Maintenance {},
    #[route("/documents")]
    Documents {},
    #[route("/messages")]
    Messages {},
    #[route("/communications")]
    Communications {},
    #[route("/schedule")]
    Schedule {},
    #[route("/users")]
    Users {},
    #[route("/profile")]
    Profile {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Portfolio pages: everyone who works the portfolio.
pub const STAFF: AccessPolicy = AccessPolicy::roles(&[Role::Admin, Role::Owner, Role::Agent]);
/// Money pages: roles allowed to see and change the books.
pub const MANAGERS: AccessPolicy = AccessPolicy::roles(&[Role::Admin, Role::Owner]);
/// Outbound announcements: admins and field agents.
pub const OUTREACH: AccessPolicy = AccessPolicy::roles(&[Role::Admin, Role::Agent]);
/// The user admin console.
pub const ADMINS: AccessPolicy = AccessPolicy::roles(&[Role::Admin]);

impl Route {
    /// The roles allowed to view each page, declared route by route.
    ///
    /// Total over the enum: the public entry pages answer too, even though
    /// they sit outside the guard layout and are never evaluated. An added
    /// route therefore cannot forget its policy; the match stops compiling.
    pub fn policy(&self) -> AccessPolicy {
        match self {
            Route::Login { .. } | Route::Register {} | Route::NotFound { .. } => {
                AccessPolicy::authenticated()
            }
            Route::Dashboard {}
            | Route::Leases {}
            | Route::Maintenance {}
            | Route::Documents {}
            | Route::Messages {}
            | Route::Schedule {}
            | Route::Profile {} => AccessPolicy::authenticated(),
            Route::PropertyList {} | Route::PropertyDetail { .. } => STAFF,
            Route::Financial {} => MANAGERS,
            Route::Communications {} => OUTREACH,
            Route::Users {} => ADMINS,
        }
    }

    /// Heading the top bar shows while the page is open.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard {} => "Dashboard",
            Route::PropertyList {} | Route::PropertyDetail { .. } => "Properties",
            Route::Financial {} => "Financial",
            Route::Leases {} => "Leases",
            Route::Maintenance {} => "Maintenance",
            Route::Documents {} => "Documents",
            Route::Messages {} => "Messages",
            Route::Communications {} => "Communications",
            Route::Schedule {} => "Schedule",
            Route::Users {} => "Users",
            Route::Profile {} => "Profile",
            // Rendered outside the chrome, so no heading to show.
            Route::Login { .. } | Route::Register {} | Route::NotFound { .. } => "",
        }
    }
}

/// Access guard layout: decides what a guarded page renders.
///
/// The identity check runs through `use_server_future`, so on the server the
/// component suspends until the session resolves and the HTML ships with the
/// answer baked in; hydration then reads the same answer without a second
/// round trip. The `SuspenseBoundary` in `App` owns the spinner for that
/// window.
///
/// The decision itself is [`shared_types::evaluate`] over the session and
/// the route's declared policy: loading view while the session is pending,
/// redirect to login when signed out, a static denial view when the role
/// is outside the policy, and the page otherwise. An auth source error is
/// an identity we could not resolve, treated as signed out and never as a
/// failure page.
#[component]
fn AccessGuard() -> Element {
    let mut auth = use_auth();
    let route: Route = use_route();

    // The `?` surfaces the suspension to Dioxus; dropping it would render
    // the Pending arm forever on first load.
    let identity = use_server_future(move || async move { server::api::get_current_user().await })?;

    let session = match identity.read().as_ref() {
        None => Session::Pending,
        Some(Ok(user)) => Session::resolved(user.clone()),
        Some(Err(_)) => Session::resolved(None),
    };

    // Keep the shared auth context in step with the resolved session so the
    // layout chrome and in-page role checks see the same user the guard saw.
    match &session {
        Session::Authenticated(user) if !auth.is_authenticated() => auth.set_user(user.clone()),
        Session::Authenticated(_) | Session::Pending => {}
        Session::Anonymous => auth.clear_user(),
    }

    let policy = route.policy();

    match evaluate(&session, &policy) {
        AccessDecision::Pending => rsx! {
            div { class: "access-guard-loading",
                p { "Checking your session..." }
            }
        },
        AccessDecision::Unauthenticated => {
            navigator().push(Route::Login {
                next: Some(route.to_string()),
            });
            rsx! {
                div { class: "access-guard-loading",
                    p { "Taking you to sign-in..." }
                }
            }
        }
        AccessDecision::Forbidden => rsx! {
            AccessDenied { policy }
        },
        AccessDecision::Authorized => rsx! { Outlet::<Route> {} },
    }
}

/// Static denial view for a signed-in user whose role is outside the
/// page's allowed set. Fetches nothing and names the restriction.
#[component]
fn AccessDenied(policy: AccessPolicy) -> Element {
    let restriction = policy.describe();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./access_denied.css") }

        div { class: "access-denied-page",
            div { class: "access-denied-card",
                div { class: "access-denied-code", "403" }
                h1 { class: "access-denied-title", "Access Restricted" }
                p { class: "access-denied-message",
                    "This page is limited to: "
                    strong { "{restriction}" }
                    "."
                }
                Link { to: Route::Dashboard {},
                    class: "access-denied-link",
                    "Back to Dashboard"
                }
            }
        }
    }
}

/// App chrome around every guarded page: sidebar, top bar, theme switch.
#[component]
fn Shell() -> Element {
    let route: Route = use_route();
    let flags: FeatureFlags = use_context();

    let nav = use_nav_sections();

    let mut theme = use_context_provider(|| shared_ui::theme::ThemeState {
        is_dark: Signal::new(true),
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        SidebarProvider { default_open: true,
            Sidebar {
                SidebarHeader {
                    div {
                        class: "brand-block",
                        span {
                            class: "brand-name",
                            "Keystead"
                        }
                    }
                }

                SidebarSeparator {}

                SidebarContent {
                    // Overview: every signed-in role
                    SidebarGroup {
                        SidebarGroupLabel { "Overview" }
                        SidebarGroupContent {
                            SidebarMenu {
                                SidebarMenuItem {
                                    Link { to: Route::Dashboard {},
                                        SidebarMenuButton { active: matches!(route, Route::Dashboard {}),
                                            Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 16, height: 16 }
                                            "Dashboard"
                                        }
                                    }
                                }
                                SidebarMenuItem {
                                    Link { to: Route::Profile {},
                                        SidebarMenuButton { active: matches!(route, Route::Profile {}),
                                            Icon::<LdSettings> { icon: LdSettings, width: 16, height: 16 }
                                            "Profile"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    SidebarSeparator {}

                    // Residence: the tenant-facing pages, open to everyone
                    SidebarGroup {
                        SidebarGroupLabel { "Residence" }
                        SidebarGroupContent {
                            SidebarMenu {
                                SidebarMenuItem {
                                    Link { to: Route::Leases {},
                                        SidebarMenuButton { active: matches!(route, Route::Leases {}),
                                            Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 }
                                            "Leases"
                                        }
                                    }
                                }
                                SidebarMenuItem {
                                    Link { to: Route::Maintenance {},
                                        SidebarMenuButton { active: matches!(route, Route::Maintenance {}),
                                            "Maintenance"
                                        }
                                    }
                                }
                                SidebarMenuItem {
                                    Link { to: Route::Documents {},
                                        SidebarMenuButton { active: matches!(route, Route::Documents {}),
                                            Icon::<LdFolder> { icon: LdFolder, width: 16, height: 16 }
                                            "Documents"
                                        }
                                    }
                                }
                                SidebarMenuItem {
                                    Link { to: Route::Messages {},
                                        SidebarMenuButton { active: matches!(route, Route::Messages {}),
                                            "Messages"
                                        }
                                    }
                                }
                                SidebarMenuItem {
                                    Link { to: Route::Schedule {},
                                        SidebarMenuButton { active: matches!(route, Route::Schedule {}),
                                            Icon::<LdCalendar> { icon: LdCalendar, width: 16, height: 16 }
                                            "Schedule"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    // Management: hidden from tenants entirely
                    if nav.management {
                        SidebarSeparator {}
                        SidebarGroup {
                            SidebarGroupLabel { "Management" }
                            SidebarGroupContent {
                                SidebarMenu {
                                    SidebarMenuItem {
                                        Link { to: Route::PropertyList {},
                                            SidebarMenuButton { active: matches!(route, Route::PropertyList {} | Route::PropertyDetail { .. }),
                                                Icon::<LdBriefcase> { icon: LdBriefcase, width: 16, height: 16 }
                                                "Properties"
                                            }
                                        }
                                    }
                                    if nav.financial {
                                        SidebarMenuItem {
                                            Link { to: Route::Financial {},
                                                SidebarMenuButton { active: matches!(route, Route::Financial {}),
                                                    Icon::<LdScale> { icon: LdScale, width: 16, height: 16 }
                                                    "Financial"
                                                }
                                            }
                                        }
                                    }
                                    if nav.communications {
                                        SidebarMenuItem {
                                            Link { to: Route::Communications {},
                                                SidebarMenuButton { active: matches!(route, Route::Communications {}),
                                                    Icon::<LdBell> { icon: LdBell, width: 16, height: 16 }
                                                    "Communications"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    // Administration: admins only
                    if nav.administration {
                        SidebarSeparator {}
                        SidebarGroup {
                            SidebarGroupLabel { "Administration" }
                            SidebarGroupContent {
                                SidebarMenu {
                                    SidebarMenuItem {
                                        Link { to: Route::Users {},
                                            SidebarMenuButton { active: matches!(route, Route::Users {}),
                                                Icon::<LdUsers> { icon: LdUsers, width: 16, height: 16 }
                                                "Users"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                SidebarFooter {
                    RoleBadge {}
                    div {
                        class: "footer-row",
                        span {
                            class: "footer-row-label",
                            "Dark Mode"
                        }
                        Switch {
                            checked: Some((theme.is_dark)()),
                            on_checked_change: move |checked: bool| {
                                theme.is_dark.set(checked);
                                theme.apply();
                            },
                            SwitchThumb {}
                        }
                    }
                }

                SidebarRail {}
            }

            SidebarInset {
                Navbar {
                    div {
                        class: "topbar",

                        SidebarTrigger {
                            span { class: "topbar-menu-glyph", "☰" }
                        }

                        Separator { horizontal: false }

                        span {
                            class: "topbar-heading",
                            {route.title()}
                        }

                        if flags.demo_data {
                            Badge { variant: BadgeVariant::Outline, "Demo" }
                        }

                        div { class: "topbar-flex" }

                        UserMenu {}
                    }
                }

                div {
                    class: "route-body",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

/// Avatar dropdown at the right edge of the navbar.
#[component]
fn UserMenu() -> Element {
    let mut auth = use_auth();

    let display_name = auth
        .current_user
        .read()
        .as_ref()
        .map(|u| u.display_name.clone())
        .unwrap_or_else(|| "Guest".to_string());

    rsx! {
        DropdownMenu {
            DropdownMenuTrigger {
                Avatar {
                    AvatarFallback { {initials(&display_name)} }
                }
            }
            DropdownMenuContent {
                DropdownMenuItem::<String> {
                    value: "profile".to_string(),
                    index: 0usize,
                    on_select: move |_: String| {
                        navigator().push(Route::Profile {});
                    },
                    "Profile"
                }
                DropdownMenuSeparator {}
                DropdownMenuItem::<String> {
                    value: "docs".to_string(),
                    index: 1usize,
                    // The docs viewer lives outside the router, so this is a
                    // plain browser navigation rather than a Link.
                    div {
                        onclick: move |_| {
                            navigator().push(
                                NavigationTarget::<Route>::External("/docs".to_string()),
                            );
                        },
                        class: "dropdown-docs-link",
                        "API Docs"
                    }
                }
                DropdownMenuSeparator {}
                DropdownMenuItem::<String> {
                    value: "logout".to_string(),
                    index: 2usize,
                    on_select: move |_: String| {
                        spawn(async move {
                            let _ = server::api::logout().await;
                        });
                        auth.clear_user();
                        navigator().push(Route::Login { next: None });
                    },
                    "Sign Out"
                }
            }
        }
    }
}

/// First letters of up to two name words, uppercased for the avatar circle.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

// Route components backed by page modules

#[component]
fn PropertyList() -> Element {
    rsx! { properties::list::PropertyListPage {} }
}

#[component]
fn PropertyDetail(id: String) -> Element {
    rsx! { properties::detail::PropertyDetailPage { id: id } }
}

/// Shows the signed-in role as a badge in the sidebar footer.
#[component]
fn RoleBadge() -> Element {
    let role = use_role();

    let (variant, label) = match role {
        Some(Role::Admin) => (BadgeVariant::Destructive, "ADMIN"),
        Some(Role::Owner) => (BadgeVariant::Primary, "OWNER"),
        Some(Role::Agent) => (BadgeVariant::Secondary, "AGENT"),
        Some(Role::Tenant) => (BadgeVariant::Outline, "TENANT"),
        None => (BadgeVariant::Outline, "—"),
    };

    rsx! {
        div { class: "footer-row role-row",
            span { class: "footer-row-label", "Role" }
            Badge { variant, "{label}" }
        }
    }
}

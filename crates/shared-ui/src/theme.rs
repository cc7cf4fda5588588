use dioxus::prelude::*;

/// Map the dark flag to the `data-theme` key the stylesheets switch on.
pub fn resolve_mode(is_dark: bool) -> &'static str {
    if is_dark {
        "dark"
    } else {
        "light"
    }
}

/// Theme state shared through context.
///
/// The sidebar's mode toggle owns the only write path. Flipping the signal
/// does nothing visible until [`ThemeState::apply`] pushes it to the document.
#[derive(Clone, Copy)]
pub struct ThemeState {
    pub is_dark: Signal<bool>,
}

impl ThemeState {
    /// Push the current mode onto the document root.
    pub fn apply(&self) {
        set_theme(resolve_mode(*self.is_dark.read()));
    }
}

/// Restore the persisted theme before first paint.
///
/// Mount once at the top of the app. Reads the `theme` cookie and stamps
/// `data-theme` on `<html>` so a returning light-mode user never sees a
/// dark flash.
#[component]
pub fn ThemeSeed() -> Element {
    use_effect(|| {
        document::eval(
            r#"
            (function() {
                var entry = document.cookie.split('; ').find(function (c) {
                    return c.indexOf('theme=') === 0;
                });
                document.documentElement.setAttribute(
                    'data-theme', entry ? entry.slice('theme='.length) : 'dark');
            })();
            "#,
        );
    });

    rsx! {}
}

/// Activate a theme: stamp the document, persist the cookie for thirty days,
/// and nudge any sibling tabs over a BroadcastChannel.
pub fn set_theme(theme: &str) {
    document::eval(&format!(
        r#"
        (function() {{
            document.documentElement.setAttribute('data-theme', '{theme}');
            document.cookie = 'theme={theme};path=/;max-age=2592000;SameSite=Lax';
            try {{
                var channel = new BroadcastChannel('theme-sync');
                channel.postMessage('{theme}');
                channel.close();
            }} catch (e) {{}}
        }})();
        "#,
    ));
}

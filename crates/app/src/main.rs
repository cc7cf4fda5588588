use dioxus::prelude::*;
use shared_types::FeatureFlags;

mod auth;
mod require_roles;
mod routes;
use auth::AuthState;
use routes::Route;

const THEME_VARS: Asset = asset!("/assets/theme.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_feature_flags();
        let flags = server::config::feature_flags();

        if flags.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();

        let pool = server::db::create_pool();
        server::db::run_migrations(&pool).await;

        if flags.demo_data {
            server::db::seed_demo_data(&pool).await;
        }

        // Hourly sweep of refresh tokens that have passed their expiry
        let sweep_pool = pool.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(3600));
            loop {
                ticker.tick().await;
                let _ = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < NOW()")
                    .execute(&sweep_pool)
                    .await;
            }
        });

        let mut router = dioxus::server::router(App).merge(server::openapi::api_router(pool.clone()));

        if flags.telemetry {
            router = router.layer(server::telemetry::RequestSpanLayer);
        }

        let router = router
            .layer(axum::middleware::from_fn_with_state(
                pool,
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

/// Compile-time platform tag, sent with every server function call so
/// request spans can tell web, desktop and mobile clients apart.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        return "web";
    }
    if cfg!(feature = "desktop") {
        return "desktop";
    }
    if cfg!(feature = "mobile") {
        return "mobile";
    }
    "unknown"
}

#[component]
fn App() -> Element {
    use_hook(|| {
        use dioxus::fullstack::{set_request_headers, HeaderMap, HeaderValue};

        let mut defaults = HeaderMap::new();
        defaults.insert(
            "x-client-platform",
            HeaderValue::from_static(client_platform()),
        );
        set_request_headers(defaults);
    });

    // Flags are fetched once per session; a fetch failure means
    // everything optional stays off
    let fetched =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;
    let flags = match fetched.read().as_ref() {
        Some(Ok(f)) => f.clone(),
        _ => FeatureFlags::default(),
    };
    use_context_provider(|| flags);

    use_context_provider(AuthState::new);

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_VARS }
        shared_ui::theme::ThemeSeed {}
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "access-guard-loading",
                        p { "Loading Keystead..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}

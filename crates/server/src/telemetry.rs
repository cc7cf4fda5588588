use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The LoggerProvider must outlive every batch export, so it parks here
/// for the life of the process.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Dedicated runtime for the OTLP gRPC exporters. Tonic's lazy connect
/// spawns onto the ambient Tokio runtime, and the init closure that
/// `dioxus::serve` runs is not guaranteed to have one.
static EXPORT_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Endpoint, TLS, and collector auth for one OTLP exporter builder.
/// `SIGNOZ_INGESTION_KEY` rides along as gRPC metadata when set; SigNoz
/// Cloud requires it, a local collector ignores it.
fn configure_exporter<B>(builder: B, endpoint: &str) -> B
where
    B: WithExportConfig + WithTonicConfig,
{
    let mut builder = builder.with_endpoint(endpoint);

    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }

    match std::env::var("SIGNOZ_INGESTION_KEY") {
        Ok(key) if !key.is_empty() => {
            let mut metadata = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
            metadata.insert(
                "signoz-ingestion-key",
                key.parse().expect("SIGNOZ_INGESTION_KEY is not valid header metadata"),
            );
            builder.with_metadata(metadata)
        }
        _ => builder,
    }
}

/// Wire up OTLP export for traces and logs.
///
/// Dioxus owns the `tracing` subscriber, so this deliberately does not
/// install one. Spans come from [`RequestSpanLayer`]; log records cross
/// over through the `log` bridge. Without `OTEL_EXPORTER_OTLP_ENDPOINT`
/// in the environment the whole setup is skipped and the app runs with
/// plain stdout logging.
///
/// Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address, e.g.
///     `http://localhost:4317` or an `https://` ingest URL
///   - `OTEL_SERVICE_NAME`: service name tag (default: `keystead`)
///   - `SIGNOZ_INGESTION_KEY`: collector access token, local collectors
///     get by without one
///   - `DEPLOY_ENV`: deployment environment tag (default: `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let rt = EXPORT_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
            .expect("build telemetry runtime")
    });
    let _guard = rt.enter();

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "keystead".to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let span_exporter = configure_exporter(
        opentelemetry_otlp::SpanExporter::builder().with_tonic(),
        &endpoint,
    )
    .build()
    .expect("build OTLP span exporter");

    let traces = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(traces);

    let log_exporter = configure_exporter(
        opentelemetry_otlp::LogExporter::builder().with_tonic(),
        &endpoint,
    )
    .build()
    .expect("build OTLP log exporter");

    let logs = opentelemetry_sdk::logs::SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();
    let _ = LOGGER_PROVIDER.set(logs);

    // `log` crate records -> OpenTelemetry. Separate from the tracing
    // subscriber Dioxus installs, so the two never fight.
    let bridge =
        opentelemetry_appender_log::OpenTelemetryLogBridge::new(LOGGER_PROVIDER.get().unwrap());
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => {
            log::set_max_level(log::LevelFilter::Info);
            eprintln!("Log bridge active, logs exporting to collector");
        }
        Err(_) => {
            eprintln!("Log bridge skipped: log crate logger already set");
        }
    }

    eprintln!("Telemetry initialized v{APP_VERSION}, traces and logs exporting to {endpoint}");
}

/// Platform tags an `X-Client-Platform` header may carry.
const PLATFORM_TAGS: [&str; 5] = ["ios", "android", "desktop", "mobile", "web"];

/// Client platform tag for spans. An explicit `X-Client-Platform`
/// header wins; otherwise the User-Agent is sniffed. Native Dioxus
/// clients send no User-Agent at all and land on "native".
fn detect_platform(ua: &str, explicit: Option<&str>) -> &'static str {
    if let Some(tag) = explicit {
        return PLATFORM_TAGS
            .into_iter()
            .find(|known| *known == tag)
            .unwrap_or("unknown");
    }

    if ua.is_empty() || ua == "unknown" {
        return "native";
    }

    // Phone checks first: a mobile UA names its OS and Mozilla both.
    if ["iPhone", "iPad", "CFNetwork"].iter().any(|m| ua.contains(m)) {
        "ios"
    } else if ua.contains("Android") {
        "android"
    } else if ["Mozilla", "Chrome", "Safari"].iter().any(|m| ua.contains(m)) {
        "web"
    } else {
        "native"
    }
}

/// Collapse resource ids out of a request path so spans group by route.
///
/// `/api/properties/7d9f...` and `/api/users/42` become `/api/properties/:id`
/// and `/api/users/:id`; paths without a trailing id pass through unchanged.
fn normalize_route(path: &str) -> String {
    if let Some((head, tail)) = path.rsplit_once('/') {
        if !tail.is_empty()
            && (tail.chars().all(|c| c.is_ascii_digit()) || Uuid::parse_str(tail).is_ok())
        {
            return format!("{head}/:id");
        }
    }
    path.to_string()
}

/// Span attributes shared by every request: method, route, client
/// platform, request id, and who is calling (or "anonymous").
fn request_attributes(req: &Request<Body>) -> Vec<KeyValue> {
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let explicit_platform = req
        .headers()
        .get("x-client-platform")
        .and_then(|v| v.to_str().ok());
    let platform = detect_platform(&user_agent, explicit_platform);

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let mut attributes = vec![
        KeyValue::new("http.method", req.method().to_string()),
        KeyValue::new("http.target", req.uri().path().to_string()),
        KeyValue::new("http.user_agent", user_agent),
        KeyValue::new("client.platform", platform),
        KeyValue::new("http.request_id", request_id),
    ];

    match req.extensions().get::<Claims>() {
        Some(claims) => attributes.extend([
            KeyValue::new("user.id", claims.sub),
            KeyValue::new("user.email", claims.email.clone()),
            KeyValue::new("user.role", claims.role.clone()),
            KeyValue::new("auth.status", "authenticated"),
        ]),
        None => attributes.push(KeyValue::new("auth.status", "anonymous")),
    }

    attributes
}

/// Tower layer that opens one server span per HTTP request and closes
/// it with the response status.
#[derive(Clone)]
pub struct RequestSpanLayer;

impl<S> Layer<S> for RequestSpanLayer {
    type Service = RequestSpanService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestSpanService { inner }
    }
}

#[derive(Clone)]
pub struct RequestSpanService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestSpanService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer("keystead");
        let name = format!(
            "{} {}",
            req.method(),
            normalize_route(req.uri().path())
        );

        let span = tracer
            .span_builder(name)
            .with_kind(SpanKind::Server)
            .with_attributes(request_attributes(&req))
            .start(&tracer);
        let span_cx = Context::current_with_span(span);

        let mut inner = self.inner.clone();
        let guard = span_cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let status = response.status();
            let span = span_cx.span();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));
            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_platform_header_wins_over_sniffing() {
        assert_eq!(
            detect_platform("Mozilla/5.0 Chrome", Some("android")),
            "android"
        );
        assert_eq!(detect_platform("", Some("desktop")), "desktop");
    }

    #[test]
    fn unrecognized_platform_header_is_unknown() {
        assert_eq!(detect_platform("", Some("watch")), "unknown");
    }

    #[test]
    fn absent_user_agent_means_native_client() {
        assert_eq!(detect_platform("", None), "native");
        assert_eq!(detect_platform("unknown", None), "native");
    }

    #[test]
    fn user_agents_sniff_to_their_platform() {
        assert_eq!(
            detect_platform("Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0", None),
            "web"
        );
        assert_eq!(
            detect_platform("Mozilla/5.0 (iPhone; CPU iPhone OS 18_2)", None),
            "ios"
        );
        assert_eq!(
            detect_platform("Mozilla/5.0 (Linux; Android 15; Pixel 9)", None),
            "android"
        );
        assert_eq!(detect_platform("curl/8.9.1", None), "native");
    }

    #[test]
    fn numeric_and_uuid_ids_collapse() {
        assert_eq!(normalize_route("/api/users/42"), "/api/users/:id");
        assert_eq!(
            normalize_route("/api/properties/8e7b2c94-11d9-4c3e-9f6a-2d0c95a1b7e4"),
            "/api/properties/:id"
        );
    }

    #[test]
    fn plain_routes_pass_through() {
        assert_eq!(normalize_route("/api/properties"), "/api/properties");
        assert_eq!(normalize_route("/health"), "/health");
        assert_eq!(normalize_route("/"), "/");
    }
}

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

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tokio runtime for the OTLP gRPC exporter. Tonic's `connect_lazy()`
/// calls `tokio::spawn`, and `dioxus::serve` may run our init closure
/// before a runtime context is entered.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Set up the OpenTelemetry TracerProvider and register it globally.
///
/// Dioxus owns the tracing subscriber; this only configures the OTLP
/// trace exporter so HTTP spans from `OtelTraceLayer` reach a collector.
/// Does nothing unless the `telemetry` feature flag is on.
///
/// Reads from environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address
///   - `OTEL_SERVICE_NAME`: service name tag (default `hr-pilot`)
///   - `OTEL_INGESTION_KEY`: access token sent as gRPC metadata (optional)
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry(enabled: bool) {
    if !enabled {
        tracing::debug!("telemetry flag off, skipping OTLP exporter");
        return;
    }

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        tracing::warn!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "hr-pilot".to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let rt = match OTEL_RUNTIME.get() {
        Some(rt) => rt,
        None => {
            let built = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .worker_threads(1)
                .build();
            match built {
                Ok(rt) => OTEL_RUNTIME.get_or_init(|| rt),
                Err(e) => {
                    tracing::error!("Failed to create OTEL runtime: {e}");
                    return;
                }
            }
        }
    };
    let _guard = rt.enter();

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);

    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }

    if let Some(key) = std::env::var("OTEL_INGESTION_KEY").ok().filter(|k| !k.is_empty()) {
        match key.parse() {
            Ok(value) => {
                let mut metadata = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
                metadata.insert("ingestion-key", value);
                builder = builder.with_metadata(metadata);
            }
            Err(e) => tracing::warn!("Ignoring invalid OTEL_INGESTION_KEY: {e}"),
        }
    }

    let exporter = match builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!("Failed to create OTLP exporter: {e}");
            return;
        }
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider);
    tracing::info!("Telemetry initialized v{APP_VERSION}, traces exporting to {endpoint}");
}

/// Detect client platform from User-Agent and optional X-Client-Platform header.
///
/// Priority: explicit `X-Client-Platform` header > User-Agent heuristic.
/// Dioxus native clients (desktop/mobile) don't send User-Agent, so they
/// show as "native" unless the app sets X-Client-Platform.
fn detect_platform(ua: &str, explicit: Option<&str>) -> &'static str {
    if let Some(p) = explicit {
        return match p {
            "ios" => "ios",
            "android" => "android",
            "desktop" => "desktop",
            "mobile" => "mobile",
            "web" => "web",
            _ => "unknown",
        };
    }

    if ua == "unknown" || ua.is_empty() {
        return "native";
    }
    if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("CFNetwork") {
        "ios"
    } else if ua.contains("Android") {
        "android"
    } else if ua.contains("Mozilla") || ua.contains("Chrome") || ua.contains("Safari") {
        "web"
    } else {
        "native"
    }
}

/// Collapse numeric path segments so `/employees/42` and `/employees/7`
/// share one span name.
fn route_name(path: &str) -> String {
    path.split('/')
        .map(|seg| {
            if !seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit()) {
                ":id"
            } else {
                seg
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures method, path, user-agent, client platform, request ID,
/// response status and whether a bearer token was presented.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
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
        let tracer = global::tracer("hr-pilot");
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());
        let user_agent = header("user-agent").unwrap_or("unknown").to_string();
        let client_platform = detect_platform(&user_agent, header("x-client-platform"));
        let request_id = header("x-request-id").unwrap_or("").to_string();
        let auth_status = match header("authorization") {
            Some(v) if v.starts_with("Bearer ") => "bearer",
            _ => "anonymous",
        };

        let attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("http.user_agent", user_agent),
            KeyValue::new("client.platform", client_platform),
            KeyValue::new("http.request_id", request_id),
            KeyValue::new("auth.status", auth_status),
        ];

        let span = tracer
            .span_builder(format!("{} {}", &method, route_name(&path)))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
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
    fn explicit_header_takes_priority() {
        assert_eq!(detect_platform("Mozilla/5.0 Chrome", Some("ios")), "ios");
        assert_eq!(detect_platform("", Some("desktop")), "desktop");
        assert_eq!(detect_platform("", Some("smartwatch")), "unknown");
    }

    #[test]
    fn missing_ua_is_native() {
        assert_eq!(detect_platform("", None), "native");
        assert_eq!(detect_platform("unknown", None), "native");
        assert_eq!(detect_platform("curl/8.4.0", None), "native");
    }

    #[test]
    fn browser_and_mobile_user_agents() {
        assert_eq!(
            detect_platform("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", None),
            "ios"
        );
        assert_eq!(
            detect_platform("Mozilla/5.0 (Linux; Android 14; Pixel 8)", None),
            "android"
        );
        assert_eq!(
            detect_platform("Mozilla/5.0 (Macintosh; Intel Mac OS X)", None),
            "web"
        );
    }

    #[test]
    fn route_name_collapses_ids() {
        assert_eq!(route_name("/api/employees/42"), "/api/employees/:id");
        assert_eq!(route_name("/leave/7/approve"), "/leave/:id/approve");
        assert_eq!(route_name("/health"), "/health");
        assert_eq!(route_name("/"), "/");
    }
}

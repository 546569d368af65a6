use api::ApiClient;
use dioxus::prelude::*;
use shared_types::AppConfig;

mod auth;
mod components;
mod download;
mod format_helpers;
mod hooks;
mod routes;
mod storage;
use auth::AuthState;
use routes::Route;

const THEME: Asset = asset!("/assets/theme.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        let config = api::host::config::app_config();
        api::host::telemetry::init_telemetry(config.features.telemetry);
        api::host::health::record_start_time();

        let mut router = dioxus::server::router(App).route(
            "/health",
            axum::routing::get(api::host::health::health_check),
        );

        if config.features.telemetry {
            router = router.layer(api::host::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

/// Detect the client platform from compile-time feature flags.
pub fn client_platform() -> &'static str {
    if cfg!(feature = "web") {
        "web"
    } else if cfg!(feature = "desktop") {
        "desktop"
    } else if cfg!(feature = "mobile") {
        "mobile"
    } else {
        "unknown"
    }
}

#[component]
fn App() -> Element {
    // Set the X-Client-Platform header on all server function calls
    use_hook(|| {
        use dioxus::fullstack::{set_request_headers, HeaderMap, HeaderValue};

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-client-platform",
            HeaderValue::from_static(client_platform()),
        );
        set_request_headers(headers);
    });

    // Config comes from the host once; defaults apply if it is unreachable
    let config_resource =
        use_server_future(move || async move { api::config::load_client_config().await })?;

    let config: AppConfig = config_resource.read().as_ref().cloned().unwrap_or_default();

    use_context_provider({
        let settings = config.api.clone();
        move || ApiClient::new(settings)
    });

    use_context_provider(|| config);
    use_context_provider(AuthState::new);

    rsx! {
        document::Link { rel: "stylesheet", href: THEME }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "auth-guard-loading",
                        p { "Loading..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}

use dioxus::prelude::*;
use shared_types::{AppConfig, AppError};

#[cfg(feature = "server")]
use crate::host::AppErrorExt;

/// Public configuration for the client: API base URL, fallback policy,
/// debounce interval and feature flags. Loaded once by the host.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_client_config() -> Result<AppConfig, ServerFnError> {
    crate::host::config::load_config()
        .cloned()
        .map_err(|err| err.into_server_fn_error())
}

/// Fetch the client configuration, falling back to defaults when the host
/// cannot be reached or its config file is broken.
pub async fn load_client_config() -> AppConfig {
    match get_client_config().await {
        Ok(config) => config,
        Err(err) => {
            let message = AppError::friendly_message(&err.to_string());
            tracing::warn!(error = %message, "using default config");
            AppConfig::default()
        }
    }
}

use shared_types::{AppConfig, AppError};
use std::sync::OnceLock;

static CONFIG: OnceLock<Result<AppConfig, AppError>> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `.env` and `config.toml`, apply environment overrides, and store the
/// result in the global `OnceLock`. Only the first call has effect.
///
/// A missing file yields defaults. A file that does not parse is an error
/// the client sees through `get_client_config`.
pub fn load_config() -> Result<&'static AppConfig, AppError> {
    CONFIG
        .get_or_init(|| {
            let _ = dotenvy::dotenv();
            let contents = std::fs::read_to_string(CONFIG_PATH);
            let mut config = parse_config(contents.ok().as_deref())?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            tracing::info!(
                api = %config.api.base_url,
                fallback = ?config.data.fallback,
                features = ?config.features,
                "config loaded"
            );
            Ok(config)
        })
        .as_ref()
        .map_err(Clone::clone)
}

fn parse_config(contents: Option<&str>) -> Result<AppConfig, AppError> {
    match contents {
        Some(contents) => AppConfig::parse(contents).map_err(|e| {
            tracing::error!("Failed to parse {CONFIG_PATH}: {e}");
            AppError::internal(format!("Invalid {CONFIG_PATH}: {e}"))
        }),
        None => {
            tracing::warn!("{CONFIG_PATH} not found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// The loaded config, or defaults when the file was unusable.
pub fn app_config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    match load_config() {
        Ok(config) => config,
        Err(_) => DEFAULT.get_or_init(AppConfig::default),
    }
}

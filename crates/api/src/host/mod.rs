//! Host process plumbing for the fullstack binary.

pub mod config;
pub mod health;
pub mod telemetry;

use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_fn_error_round_trips_through_friendly_message() {
        let err = AppError::forbidden("Admins only").into_server_fn_error();
        assert_eq!(AppError::friendly_message(&err.to_string()), "Admins only");
        let parsed = AppError::from_server_error(&err.to_string()).unwrap();
        assert_eq!(parsed.kind, shared_types::AppErrorKind::Forbidden);
    }
}

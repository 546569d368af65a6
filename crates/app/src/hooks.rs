use std::collections::HashMap;

use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    resolve, AppConfig, AppError, DebounceGate, ErrorDisposition, FallbackPolicy, FetchOutcome,
};
use shared_ui::{use_toast, ToastOptions, Toasts};

use crate::auth::{sign_out, use_auth, AuthState};

/// Search box state. `input` follows every keystroke; `query` only changes
/// once typing pauses for the configured debounce interval.
#[derive(Clone, Copy, PartialEq)]
pub struct DebouncedSearch {
    pub input: Signal<String>,
    pub query: Signal<String>,
    gate: Signal<DebounceGate>,
    delay_ms: u64,
}

impl DebouncedSearch {
    pub fn on_input(&mut self, value: String) {
        self.input.set(value.clone());
        let ticket = self.gate.write().ticket();
        let gate = self.gate;
        let mut query = self.query;
        let delay_ms = self.delay_ms;
        spawn(async move {
            sleep_ms(delay_ms).await;
            if gate.peek().is_latest(ticket) {
                query.set(value);
            }
        });
    }
}

pub fn use_debounced_search() -> DebouncedSearch {
    let delay_ms = use_context::<AppConfig>().data.search_debounce_ms;
    DebouncedSearch {
        input: use_signal(String::new),
        query: use_signal(String::new),
        gate: use_signal(DebounceGate::default),
        delay_ms,
    }
}

async fn sleep_ms(ms: u64) {
    let script = format!("await new Promise(r => setTimeout(r, {ms})); return true;");
    if let Err(err) = document::eval(&script).join::<bool>().await {
        tracing::debug!(?err, "debounce timer unavailable");
    }
}

pub fn use_fallback_policy() -> FallbackPolicy {
    use_context::<AppConfig>().data.fallback
}

/// Apply the fallback policy to a fetch that has bundled sample data,
/// logging when sample rows stand in for live data.
pub fn outcome<T>(
    result: Result<T, AppError>,
    policy: FallbackPolicy,
    sample: impl Fn() -> T,
) -> FetchOutcome<T> {
    let resolved = resolve(result, policy, Some(&sample));
    if let FetchOutcome::Fallback { error, .. } = &resolved {
        tracing::warn!(%error, "showing sample data");
    }
    resolved
}

/// What a failed save, delete or workflow action turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionFailure {
    /// The session is gone; sign out and go back to the login screen.
    SignIn,
    /// Error toast with this text.
    Toast(String),
}

impl ActionFailure {
    pub fn from_error(err: &AppError) -> Self {
        match err.disposition() {
            ErrorDisposition::ReLogin => ActionFailure::SignIn,
            ErrorDisposition::AccessDenied => {
                ActionFailure::Toast(format!("Access denied. {}", err.message))
            }
            ErrorDisposition::Inline | ErrorDisposition::Retry => {
                ActionFailure::Toast(err.message.clone())
            }
        }
    }
}

/// Reports mutation errors. Fetch errors go through `ErrorPanel` instead.
#[derive(Clone, Copy)]
pub struct ActionFailures {
    toast: Toasts,
    auth: AuthState,
    client: CopyValue<ApiClient>,
}

impl ActionFailures {
    pub fn report(&self, err: AppError) {
        match ActionFailure::from_error(&err) {
            ActionFailure::SignIn => {
                tracing::info!(%err, "session ended during an action");
                let client = self.client.read().clone();
                spawn(sign_out(client, self.auth));
            }
            ActionFailure::Toast(message) => self.toast.error(message, ToastOptions::new()),
        }
    }
}

pub fn use_action_failures() -> ActionFailures {
    let client = use_context::<ApiClient>();
    ActionFailures {
        toast: use_toast(),
        auth: use_auth(),
        client: use_hook(|| CopyValue::new(client)),
    }
}

pub fn field_error(errors: &HashMap<String, String>, field: &str) -> Option<String> {
    errors.get(field).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u32> {
        vec![1]
    }

    #[test]
    fn outcome_uses_sample_only_under_sample_policy() {
        let err = || Err(AppError::network("offline"));
        assert!(outcome(err(), FallbackPolicy::SampleData, sample).is_fallback());
        assert!(matches!(
            outcome(err(), FallbackPolicy::Propagate, sample),
            FetchOutcome::Failed(_)
        ));
        assert!(matches!(
            outcome(Err(AppError::unauthorized("expired")), FallbackPolicy::SampleData, sample),
            FetchOutcome::Failed(_)
        ));
    }

    #[test]
    fn expired_session_signs_out_instead_of_toasting() {
        assert_eq!(
            ActionFailure::from_error(&AppError::unauthorized("Token expired")),
            ActionFailure::SignIn
        );
        assert_eq!(
            ActionFailure::from_error(&AppError::forbidden("Managers only")),
            ActionFailure::Toast("Access denied. Managers only".to_string())
        );
        assert_eq!(
            ActionFailure::from_error(&AppError::network("offline")),
            ActionFailure::Toast("offline".to_string())
        );
    }

    #[test]
    fn field_error_looks_up_by_name() {
        let errors = HashMap::from([("email".to_string(), "invalid".to_string())]);
        assert_eq!(field_error(&errors, "email").as_deref(), Some("invalid"));
        assert_eq!(field_error(&errors, "name"), None);
    }
}

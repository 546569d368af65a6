//! What a page shows when a list fetch fails.

use serde::{Deserialize, Serialize};

use crate::AppError;

/// Whether failed fetches may be replaced with bundled sample data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Show the error.
    #[default]
    Propagate,
    /// Show sample rows plus a notice naming the error.
    #[serde(alias = "sample")]
    SampleData,
}

/// Result of a list fetch after the fallback policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Fallback { data: T, error: AppError },
    Failed(AppError),
}

impl<T> FetchOutcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchOutcome::Loaded(data) | FetchOutcome::Fallback { data, .. } => Some(data),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            FetchOutcome::Loaded(_) => None,
            FetchOutcome::Fallback { error, .. } | FetchOutcome::Failed(error) => Some(error),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback { .. })
    }
}

/// Apply `policy` to a fetch result. `sample` is only consulted on error;
/// pages without sample data pass `None` and always propagate.
///
/// Authorization failures always propagate so that a 401 still reaches
/// the re-login path.
pub fn resolve<T>(
    result: Result<T, AppError>,
    policy: FallbackPolicy,
    sample: Option<&dyn Fn() -> T>,
) -> FetchOutcome<T> {
    match result {
        Ok(data) => FetchOutcome::Loaded(data),
        Err(error) => match (policy, sample) {
            (FallbackPolicy::SampleData, Some(sample))
                if !matches!(
                    error.kind,
                    crate::AppErrorKind::Unauthorized | crate::AppErrorKind::Forbidden
                ) =>
            {
                FetchOutcome::Fallback {
                    data: sample(),
                    error,
                }
            }
            _ => FetchOutcome::Failed(error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        vec![1, 2, 3]
    }

    #[test]
    fn success_is_loaded_regardless_of_policy() {
        let out = resolve(Ok(vec![9u8]), FallbackPolicy::SampleData, Some(&sample));
        assert_eq!(out, FetchOutcome::Loaded(vec![9]));
    }

    #[test]
    fn propagate_policy_never_substitutes() {
        let out = resolve(Err(AppError::network("down")), FallbackPolicy::Propagate, Some(&sample));
        assert!(matches!(out, FetchOutcome::Failed(_)));
        assert!(out.data().is_none());
    }

    #[test]
    fn sample_policy_substitutes_and_keeps_error() {
        let out = resolve(Err(AppError::network("down")), FallbackPolicy::SampleData, Some(&sample));
        assert!(out.is_fallback());
        assert_eq!(out.data(), Some(&vec![1, 2, 3]));
        assert_eq!(out.error().map(|e| e.message.as_str()), Some("down"));
    }

    #[test]
    fn pages_without_samples_always_propagate() {
        let out: FetchOutcome<Vec<u8>> =
            resolve(Err(AppError::internal("boom")), FallbackPolicy::SampleData, None);
        assert!(matches!(out, FetchOutcome::Failed(_)));
    }

    #[test]
    fn unauthorized_is_never_masked() {
        let out = resolve(
            Err(AppError::unauthorized("expired")),
            FallbackPolicy::SampleData,
            Some(&sample),
        );
        assert!(matches!(out, FetchOutcome::Failed(_)));
    }

    #[test]
    fn policy_parses_config_spellings() {
        #[derive(Deserialize)]
        struct Wrap {
            fallback: FallbackPolicy,
        }
        let w: Wrap = toml::from_str(r#"fallback = "sample""#).unwrap();
        assert_eq!(w.fallback, FallbackPolicy::SampleData);
        let w: Wrap = toml::from_str(r#"fallback = "propagate""#).unwrap();
        assert_eq!(w.fallback, FallbackPolicy::Propagate);
    }
}

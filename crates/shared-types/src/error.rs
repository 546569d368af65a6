use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    Unauthorized,
    Forbidden,
    RateLimited,
    InternalError,
    /// The request never produced an HTTP response.
    Network,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::RateLimited => write!(f, "RateLimited"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
            AppErrorKind::Network => write!(f, "Network"),
        }
    }
}

/// How a page should present an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Session is gone; send the user back to the login screen.
    ReLogin,
    /// Inline "access denied" view.
    AccessDenied,
    /// Inline banner with the server's message.
    Inline,
    /// Generic banner with a manual retry button.
    Retry,
}

/// Structured application error used across client and host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::BadRequest, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::InternalError, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Network, message)
    }

    /// Build an error from a non-2xx REST response.
    ///
    /// The backend reports problems in a `detail` member that is either a
    /// plain string or a list of `{loc, msg}` validation issues. The field
    /// name of an issue is the last element of its `loc` path.
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = kind_for_status(status);
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let detail = parsed.as_ref().and_then(|v| v.get("detail"));

        let mut field_errors = HashMap::new();
        let mut messages = Vec::new();

        match detail {
            Some(Value::String(s)) => messages.push(s.clone()),
            Some(Value::Array(issues)) => {
                for issue in issues {
                    let Some(msg) = issue.get("msg").and_then(Value::as_str) else {
                        continue;
                    };
                    messages.push(msg.to_string());
                    let field = issue
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .map(|last| match last {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        });
                    if let Some(field) = field {
                        field_errors.entry(field).or_insert_with(|| msg.to_string());
                    }
                }
            }
            _ => {
                if let Some(msg) = parsed
                    .as_ref()
                    .and_then(|v| v.get("message"))
                    .and_then(Value::as_str)
                {
                    messages.push(msg.to_string());
                }
            }
        }

        let message = if messages.is_empty() {
            default_message(status).to_string()
        } else {
            messages.join("; ")
        };

        Self {
            kind,
            message,
            field_errors,
        }
    }

    /// Parse an AppError from a ServerFnError message string (client-side).
    ///
    /// `ServerFnError::to_string()` wraps the payload like:
    ///   `error running server function: {"kind":"Unauthorized",...} (details: None)`
    pub fn from_server_error(error_message: &str) -> Option<Self> {
        if let Ok(err) = serde_json::from_str::<Self>(error_message) {
            return Some(err);
        }
        let start = error_message.find('{')?;
        let end = error_message.rfind('}')?;
        if end > start {
            serde_json::from_str(&error_message[start..=end]).ok()
        } else {
            None
        }
    }

    /// Extract a user-friendly error message from a `ServerFnError.to_string()`.
    pub fn friendly_message(error_string: &str) -> String {
        if let Some(app_error) = Self::from_server_error(error_string) {
            app_error.message
        } else {
            "Something went wrong. Please try again.".to_string()
        }
    }

    /// How the UI should surface this error.
    pub fn disposition(&self) -> ErrorDisposition {
        match self.kind {
            AppErrorKind::Unauthorized => ErrorDisposition::ReLogin,
            AppErrorKind::Forbidden => ErrorDisposition::AccessDenied,
            AppErrorKind::ValidationError
            | AppErrorKind::BadRequest
            | AppErrorKind::NotFound
            | AppErrorKind::Conflict => ErrorDisposition::Inline,
            AppErrorKind::RateLimited | AppErrorKind::InternalError | AppErrorKind::Network => {
                ErrorDisposition::Retry
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == AppErrorKind::Unauthorized
    }

    pub fn status_code_u16(&self) -> u16 {
        match self.kind {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::Conflict => 409,
            AppErrorKind::Unauthorized => 401,
            AppErrorKind::Forbidden => 403,
            AppErrorKind::RateLimited => 429,
            AppErrorKind::InternalError => 500,
            AppErrorKind::Network => 503,
        }
    }
}

fn kind_for_status(status: u16) -> AppErrorKind {
    match status {
        400 => AppErrorKind::BadRequest,
        401 => AppErrorKind::Unauthorized,
        403 => AppErrorKind::Forbidden,
        404 => AppErrorKind::NotFound,
        409 => AppErrorKind::Conflict,
        422 => AppErrorKind::ValidationError,
        429 => AppErrorKind::RateLimited,
        _ => AppErrorKind::InternalError,
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        401 => "Your session has expired. Please sign in again.",
        403 => "You do not have permission to perform this action.",
        404 => "The requested resource was not found.",
        422 => "Some values are invalid.",
        _ => "Something went wrong. Please try again.",
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Please fix the highlighted fields", field_errors)
    }
}

/// Validate a form payload before it is sent.
#[cfg(feature = "validation")]
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

#[cfg(feature = "validation")]
impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_reads_string_detail() {
        let err = AppError::from_response(404, r#"{"detail":"Employee not found"}"#);
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "Employee not found");
        assert!(err.field_errors.is_empty());
    }

    #[test]
    fn from_response_maps_validation_issues_to_fields() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"invalid"}]}"#;
        let err = AppError::from_response(422, body);
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(err.field_errors.get("email").map(String::as_str), Some("invalid"));
        assert_eq!(err.message, "invalid");
    }

    #[test]
    fn from_response_joins_multiple_issues() {
        let body = r#"{"detail":[
            {"loc":["body","basic_salary"],"msg":"must be positive"},
            {"loc":["body","items",0],"msg":"required"}
        ]}"#;
        let err = AppError::from_response(422, body);
        assert_eq!(err.message, "must be positive; required");
        assert_eq!(err.field_errors.get("basic_salary").unwrap(), "must be positive");
        assert_eq!(err.field_errors.get("0").unwrap(), "required");
    }

    #[test]
    fn from_response_without_body_uses_status_default() {
        let err = AppError::from_response(401, "");
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
        assert_eq!(err.message, "Your session has expired. Please sign in again.");

        let err = AppError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.kind, AppErrorKind::InternalError);
        assert_eq!(err.message, "Something went wrong. Please try again.");
    }

    #[test]
    fn from_response_falls_back_to_message_member() {
        let err = AppError::from_response(409, r#"{"message":"Code already used"}"#);
        assert_eq!(err.kind, AppErrorKind::Conflict);
        assert_eq!(err.message, "Code already used");
    }

    #[test]
    fn disposition_follows_taxonomy() {
        assert_eq!(AppError::from_response(401, "").disposition(), ErrorDisposition::ReLogin);
        assert_eq!(AppError::from_response(403, "").disposition(), ErrorDisposition::AccessDenied);
        assert_eq!(AppError::from_response(422, "").disposition(), ErrorDisposition::Inline);
        assert_eq!(AppError::from_response(404, "").disposition(), ErrorDisposition::Inline);
        assert_eq!(AppError::from_response(500, "").disposition(), ErrorDisposition::Retry);
        assert_eq!(AppError::network("connection refused").disposition(), ErrorDisposition::Retry);
    }

    #[test]
    fn from_server_error_parses_wrapped_json() {
        let wrapped = r#"error running server function: {"kind":"NotFound","message":"Config missing"} (details: None)"#;
        let err = AppError::from_server_error(wrapped).unwrap();
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "Config missing");
    }

    #[test]
    fn from_server_error_returns_none_for_garbage() {
        assert!(AppError::from_server_error("not json at all").is_none());
        assert!(AppError::from_server_error("").is_none());
    }

    #[test]
    fn friendly_message_fallback_for_unparseable() {
        assert_eq!(
            AppError::friendly_message("garbage input"),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn status_code_mapping() {
        assert_eq!(AppError::from_response(404, "").status_code_u16(), 404);
        assert_eq!(AppError::validation("", HashMap::new()).status_code_u16(), 422);
        assert_eq!(AppError::unauthorized("").status_code_u16(), 401);
        assert_eq!(AppError::forbidden("").status_code_u16(), 403);
        assert_eq!(AppError::internal("").status_code_u16(), 500);
    }

    #[test]
    fn display_impl_formats_correctly() {
        let err = AppError::unauthorized("bad credentials");
        assert_eq!(format!("{}", err), "Unauthorized: bad credentials");
    }

    #[test]
    fn error_roundtrip_through_json() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), "too short".to_string());
        let err = AppError::validation("Validation failed", fields);
        let json = serde_json::to_string(&err).unwrap();
        let parsed: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}

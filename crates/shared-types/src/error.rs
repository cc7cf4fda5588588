use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Failure category. Serialized by name, so renaming a variant is a
/// wire format change for every REST consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    DatabaseError,
    Unauthorized,
    Forbidden,
    RateLimited,
    InternalError,
}

impl AppErrorKind {
    fn as_str(&self) -> &'static str {
        match self {
            AppErrorKind::NotFound => "NotFound",
            AppErrorKind::BadRequest => "BadRequest",
            AppErrorKind::ValidationError => "ValidationError",
            AppErrorKind::Conflict => "Conflict",
            AppErrorKind::DatabaseError => "DatabaseError",
            AppErrorKind::Unauthorized => "Unauthorized",
            AppErrorKind::Forbidden => "Forbidden",
            AppErrorKind::RateLimited => "RateLimited",
            AppErrorKind::InternalError => "InternalError",
        }
    }

    /// HTTP status the REST layer answers with for this kind.
    pub fn status(&self) -> u16 {
        match self {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::Conflict => 409,
            AppErrorKind::Unauthorized => 401,
            AppErrorKind::Forbidden => 403,
            AppErrorKind::RateLimited => 429,
            AppErrorKind::DatabaseError | AppErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured application error shared by server and client.
///
/// Server code builds these with the constructor helpers and serializes
/// them into `ServerFnError` payloads or REST responses; client code
/// recovers them with `from_server_error` to show real messages instead
/// of transport noise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
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

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::BadRequest, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Conflict, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::DatabaseError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Forbidden, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::RateLimited, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::InternalError, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    /// Recover an AppError from a `ServerFnError` display string.
    ///
    /// The transport wraps the payload, e.g. `error running server
    /// function: {"kind":"Unauthorized",...} (details: None)`, so this
    /// tries the string as raw JSON first and then falls back to the
    /// outermost brace pair.
    pub fn from_server_error(error_message: &str) -> Option<Self> {
        serde_json::from_str(error_message).ok().or_else(|| {
            let start = error_message.find('{')?;
            let end = error_message.rfind('}')?;
            serde_json::from_str(error_message.get(start..=end)?).ok()
        })
    }

    /// Per-field validation errors embedded in a `ServerFnError` string,
    /// empty when there are none or parsing fails.
    pub fn parse_field_errors(error_string: &str) -> HashMap<String, String> {
        Self::from_server_error(error_string)
            .map(|e| e.field_errors)
            .unwrap_or_default()
    }

    /// User-presentable message from a `ServerFnError` string, with a
    /// generic fallback when no AppError payload can be recovered.
    pub fn friendly_message(error_string: &str) -> String {
        match Self::from_server_error(error_string) {
            Some(app_error) => app_error.message,
            None => "Something went wrong on our end. Please try again.".to_string(),
        }
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
        // One message per field is enough for the form to highlight it.
        let field_errors = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let first = errs.first()?;
                let msg = match &first.message {
                    Some(m) => m.to_string(),
                    None => format!("Invalid value for {field}"),
                };
                Some((field.to_string(), msg))
            })
            .collect();
        AppError::validation("Some fields need attention", field_errors)
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.kind.status())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_payload_from_bare_json() {
        let json = r#"{"kind":"Unauthorized","message":"Session expired"}"#;
        let err = AppError::from_server_error(json).unwrap();
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
        assert_eq!(err.message, "Session expired");
    }

    #[test]
    fn recovers_payload_wrapped_in_transport_noise() {
        let wrapped = r#"error running server function: {"kind":"NotFound","message":"No property with id 9"} (details: None)"#;
        let err = AppError::from_server_error(wrapped).unwrap();
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "No property with id 9");
    }

    #[test]
    fn unparseable_input_recovers_nothing() {
        assert!(AppError::from_server_error("socket closed unexpectedly").is_none());
        assert!(AppError::from_server_error("").is_none());
    }

    #[test]
    fn friendly_message_prefers_the_server_text() {
        let json = r#"{"kind":"Forbidden","message":"This page is limited to: admin, agent"}"#;
        assert_eq!(
            AppError::friendly_message(json),
            "This page is limited to: admin, agent"
        );
    }

    #[test]
    fn friendly_message_falls_back_on_generic_copy() {
        assert_eq!(
            AppError::friendly_message("socket closed unexpectedly"),
            "Something went wrong on our end. Please try again."
        );
    }

    #[test]
    fn validation_error_carries_field_errors() {
        let mut fields = HashMap::new();
        fields.insert("email".to_string(), "invalid format".to_string());
        let err = AppError::validation("Some fields need attention", fields);
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(err.field_errors.get("email").unwrap(), "invalid format");
    }

    #[test]
    fn constructors_set_kind_and_leave_fields_empty() {
        let err = AppError::conflict("email already registered");
        assert_eq!(err.kind, AppErrorKind::Conflict);
        assert_eq!(err.message, "email already registered");
        assert!(err.field_errors.is_empty());
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::not_found("").kind.status(), 404);
        assert_eq!(AppError::bad_request("").kind.status(), 400);
        assert_eq!(AppError::validation("", HashMap::new()).kind.status(), 422);
        assert_eq!(AppError::unauthorized("").kind.status(), 401);
        assert_eq!(AppError::forbidden("").kind.status(), 403);
        assert_eq!(AppError::rate_limited("").kind.status(), 429);
        assert_eq!(AppError::internal("").kind.status(), 500);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = AppError::forbidden("agents only");
        assert_eq!(format!("{}", err), "Forbidden: agents only");
    }

    #[test]
    fn field_errors_survive_serialization() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), "too short".to_string());
        let err = AppError::validation("Some fields need attention", fields);
        let json = serde_json::to_string(&err).unwrap();
        let parsed: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}

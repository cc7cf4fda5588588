use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// `.into_app_error()` on database errors. Collapses the handful of
/// sqlx failure shapes into the [`AppError`] kinds the client knows.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        match &self {
            sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                // Unique violation. The constraint text names the
                // column, which picks the user-facing message.
                let msg = db_err.message();
                let text = if msg.contains("email") {
                    "That email is already registered"
                } else if msg.contains("username") {
                    "That username is taken"
                } else {
                    "Another record already uses this value"
                };
                AppError::conflict(text)
            }
            _ => AppError::database(self.to_string()),
        }
    }
}

/// `.into_server_fn_error()` on [`AppError`]. The error is serialized
/// whole into the message string; the client side digs the JSON back
/// out with [`AppError::from_server_error`].
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        let json = serde_json::to_string(&self).unwrap_or_else(|_| self.message.clone());
        ServerFnError::new(json)
    }
}

/// `.validate_request()` on request DTOs, turning `validator` output
/// into a field-keyed [`AppError`].
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = sqlx::Error::RowNotFound.into_app_error();
        assert_eq!(err.kind, AppErrorKind::NotFound);
    }

    #[test]
    fn server_fn_error_carries_json_payload() {
        let err = AppError::forbidden("This page is limited to: admin");
        let server_err = err.clone().into_server_fn_error();
        let recovered = AppError::from_server_error(&server_err.to_string()).unwrap();
        assert_eq!(recovered, err);
    }
}

use axum::extract::rejection::{JsonRejection, PathRejection};

use crate::{db::dao::DaoLayerError, models::ValidationError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Validation(Vec<ValidationError>),
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn validation(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) | Self::Internal(message) => {
                message.as_str()
            }
            Self::Validation(_) => "Validation failed",
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "{}: {}", self.message(), details.join("; "))
            }
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { .. } => AppError::not_found(err.to_string()),
            DaoLayerError::DateOutOfRange(_) => AppError::bad_request(err.to_string()),
            DaoLayerError::Db(_) => AppError::internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::AppError;
    use crate::{db::dao::DaoLayerError, models::ValidationError};

    #[test]
    fn maps_dao_errors_by_kind() {
        let missing = AppError::from(DaoLayerError::NotFound {
            entity: "Todo",
            id: 4,
        });
        let broken = AppError::from(DaoLayerError::Db(DbErr::Custom("boom".to_string())));

        assert!(matches!(missing, AppError::NotFound(ref message) if message == "Todo not found (id=4)"));
        assert!(matches!(broken, AppError::Internal(ref message) if message.contains("boom")));
    }

    #[test]
    fn validation_display_lists_every_error() {
        let err = AppError::validation(vec![
            ValidationError::field("title", "The Title field is required."),
            ValidationError::field("percentComplete", "Percent Complete must be between 0 and 100."),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation failed: title: The Title field is required.; percentComplete: Percent Complete must be between 0 and 100."
        );
    }
}

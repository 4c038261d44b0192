use serde::Serialize;

/// A single field-level validation failure, serialized as `{ path, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{message}")]
    Duplicate {
        resource: &'static str,
        message: String,
    },

    #[error("Rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure reported by the store.
    #[error("Database operation '{operation}' failed: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Shorthand for a validation failure on a single field.
    pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(path, message)])
    }

    pub fn database(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Database {
            operation,
            message: err.to_string(),
        }
    }

    /// Machine-readable code carried in error responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Duplicate { .. } => "DUPLICATE_ERROR",
            Self::RateLimited { .. } => "RATE_LIMIT_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Database { .. } => "DATABASE_ERROR",
        }
    }

    /// Operational errors are expected domain outcomes. Anything else points
    /// at an infrastructure fault and must not leak to clients.
    pub fn is_operational(&self) -> bool {
        !matches!(self, Self::Database { .. })
    }
}

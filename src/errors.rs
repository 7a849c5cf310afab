//! # Error Handling for List Endpoints
//!
//! Two layers of errors:
//!
//! - [`QueryError`]: everything that can be wrong with a client's query string. These
//!   are detected from the raw query and the resource's [`FieldSchema`](crate::FieldSchema)
//!   alone, before any store is touched.
//! - [`ApiError`]: the HTTP-facing error. Every `QueryError` becomes a `400 Bad Request`
//!   with the validation message; store failures become a sanitized `500` whose details
//!   are only logged.
//!
//! ## Logging
//!
//! Internal errors are logged with the `tracing` crate. Nothing is printed unless the
//! application installs a subscriber:
//!
//! ```rust,ignore
//! tracing_subscriber::fmt()
//!     .with_target(false)
//!     .compact()
//!     .init();
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

use crate::schema::ValueKind;

// Rejected values are echoed back to the client, but never in full
const MAX_ECHOED_VALUE_LENGTH: usize = 64;

fn echo(value: &str) -> String {
    if value.chars().count() <= MAX_ECHOED_VALUE_LENGTH {
        value.to_string()
    } else {
        let mut truncated: String = value.chars().take(MAX_ECHOED_VALUE_LENGTH).collect();
        truncated.push('…');
        truncated
    }
}

/// A client query that cannot be turned into a filter or a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The key names a field that is not declared filterable
    SchemaViolation { field: String },
    /// The value does not parse as the field's declared kind
    TypeCoercion {
        field: String,
        value: String,
        expected: ValueKind,
    },
    /// The operator suffix is unknown or meaningless for the field's kind
    OperatorMismatch {
        field: String,
        operator: String,
        kind: ValueKind,
    },
    /// `page`, the page size or `limit` is out of range
    PaginationRange { parameter: String, value: String },
}

impl QueryError {
    pub(crate) fn schema_violation(field: &str) -> Self {
        Self::SchemaViolation {
            field: field.to_string(),
        }
    }

    pub(crate) fn type_coercion(field: &str, value: &str, expected: ValueKind) -> Self {
        Self::TypeCoercion {
            field: field.to_string(),
            value: echo(value),
            expected,
        }
    }

    pub(crate) fn operator_mismatch(field: &str, operator: &str, kind: ValueKind) -> Self {
        Self::OperatorMismatch {
            field: field.to_string(),
            operator: operator.to_string(),
            kind,
        }
    }

    pub(crate) fn pagination_range(parameter: &str, value: impl fmt::Display) -> Self {
        Self::PaginationRange {
            parameter: parameter.to_string(),
            value: echo(&value.to_string()),
        }
    }

    /// Stable machine-readable name of the error kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SchemaViolation { .. } => "schema_violation",
            Self::TypeCoercion { .. } => "type_coercion",
            Self::OperatorMismatch { .. } => "operator_mismatch",
            Self::PaginationRange { .. } => "pagination_range",
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaViolation { field } => {
                write!(f, "'{field}' is not a filterable field")
            }
            Self::TypeCoercion {
                field,
                value,
                expected,
            } => write!(f, "value '{value}' for '{field}' is not a valid {expected}"),
            Self::OperatorMismatch {
                field,
                operator,
                kind,
            } => write!(
                f,
                "operator '{operator}' is not supported for {kind} field '{field}'"
            ),
            Self::PaginationRange { parameter, value } => {
                write!(f, "'{value}' is not a valid value for '{parameter}'")
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// API error type with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - the query string was rejected before any store access
    BadRequest {
        message: String,
        kind: &'static str,
    },

    /// 500 Internal Server Error - store failure (details logged, not exposed)
    Database {
        message: String,
        internal: DbErr,
    },
}

impl ApiError {
    /// Create a 500 Internal Server Error from a database error
    ///
    /// The database error details are logged but NOT sent to the user.
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } | Self::Database { message, .. } => message,
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::BadRequest { message, kind } => {
                tracing::debug!(error = %message, kind, "Rejected list query");
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let kind = match &self {
            Self::BadRequest { kind, .. } => Some(*kind),
            Self::Database { .. } => None,
        };
        let body = ErrorResponse {
            error: self.user_message(),
            kind,
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::BadRequest {
            message: err.to_string(),
            kind: err.kind(),
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::database(err)
    }
}

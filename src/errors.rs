//! Unified error types for the rental desk.
//!
//! Every fallible operation in `core` returns [`Result`]. The bot layer turns
//! errors into user-facing notices with [`Error::user_message`], so nothing
//! below the store boundary ever reaches an operator as a raw failure.

use crate::core::booking::FieldError;
use thiserror::Error;

/// Broad classes of failure, used to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Field-level problems the operator can fix and resubmit
    Validation,
    /// Store unreachable, misconfigured, or a rejected write; retryable
    Persistence,
    /// A referenced booking, client, or crew member does not exist
    NotFound,
    /// Export and messaging failures outside the booking core
    ExternalService,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{}", format_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    #[error("Booking '{id}' not found")]
    BookingNotFound { id: String },

    #[error("Client '{id}' not found")]
    ClientNotFound { id: String },

    #[error("Crew member '{id}' not found")]
    CrewMemberNotFound { id: String },

    #[error("The data store is not configured; changes cannot be saved")]
    StoreNotConfigured,

    #[error("Client '{name}' has no usable phone number")]
    MissingPhone { name: String },

    #[error("PDF export failed: {message}")]
    Pdf { message: String },

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Classifies this error for display and retry decisions.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::BookingNotFound { .. }
            | Self::ClientNotFound { .. }
            | Self::CrewMemberNotFound { .. } => ErrorKind::NotFound,
            Self::MissingPhone { .. } | Self::Pdf { .. } | Self::FrameworkError(_) => {
                ErrorKind::ExternalService
            }
            Self::Config { .. }
            | Self::Database(_)
            | Self::StoreNotConfigured
            | Self::EnvVar(_)
            | Self::Fmt(_) => ErrorKind::Persistence,
        }
    }

    /// Validation failure on a single field.
    #[must_use]
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Whether the database could not be reached at all, as opposed to a
    /// query that reached it and failed.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::Database(sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_))
        )
    }

    /// Human-readable notice naming the failed operation and its cause.
    #[must_use]
    pub fn user_message(&self, operation: &str) -> String {
        format!("Failed to {operation}: {self}")
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    let parts: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!("Validation failed: {}", parts.join("; "))
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::StoreNotConfigured.kind(), ErrorKind::Persistence);
        assert_eq!(
            Error::BookingNotFound { id: "b1".into() }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            Error::MissingPhone { name: "Ana".into() }.kind(),
            ErrorKind::ExternalService
        );
        assert_eq!(
            Error::invalid_field("name", "Name cannot be empty").kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_unreachable_only_for_connection_failures() {
        let closed = Error::Database(sea_orm::DbErr::ConnectionAcquire(
            sea_orm::ConnAcquireErr::ConnectionClosed,
        ));
        assert!(closed.is_unreachable());
        assert!(!Error::Database(sea_orm::DbErr::RecordNotFound("b1".into())).is_unreachable());
        assert!(!Error::StoreNotConfigured.is_unreachable());
    }

    #[test]
    fn test_user_message_names_operation() {
        let message = Error::StoreNotConfigured.user_message("save booking");
        assert!(message.starts_with("Failed to save booking: "));
        assert!(message.contains("not configured"));
    }
}

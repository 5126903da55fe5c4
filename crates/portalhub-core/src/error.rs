//! The single error type shared by every PortalHub crate.
//!
//! Lower layers classify failures into an [`ErrorKind`]; the HTTP layer
//! turns the kind into a status code. Anything that cannot be measured is an
//! [`ErrorKind::Aggregation`] and must never be read as zero usage.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

type BoxedCause = Box<dyn StdError + Send + Sync>;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    Validation,
    /// A rollup for the same run is already in progress.
    Conflict,
    Internal,
    Database,
    /// Bad settings, or a plan identifier missing from the catalog.
    Configuration,
    /// The usage source failed or did not answer in time.
    Aggregation,
    Serialization,
    /// Notification delivery failed.
    ExternalService,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
            Self::Database => "DATABASE",
            Self::Configuration => "CONFIGURATION",
            Self::Aggregation => "AGGREGATION",
            Self::Serialization => "SERIALIZATION",
            Self::ExternalService => "EXTERNAL_SERVICE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error: a kind, a message safe to show callers and an
/// optional cause kept for logs.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    #[source]
    pub source: Option<BoxedCause>,
}

macro_rules! kind_constructors {
    ($($fn_name:ident => $kind:ident),+ $(,)?) => {
        $(
            pub fn $fn_name(message: impl Into<String>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )+
    };
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Build an error that keeps `source` as its cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(kind, message)
        }
    }

    kind_constructors! {
        not_found => NotFound,
        validation => Validation,
        conflict => Conflict,
        internal => Internal,
        database => Database,
        configuration => Configuration,
        aggregation => Aggregation,
        external_service => ExternalService,
    }
}

// The cause is not cloneable; a clone keeps the classification only.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, format!("Invalid JSON: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Could not load settings: {err}"),
            err,
        )
    }
}

//! API error types.

use super::models::ValidationError;
use derive_more::{Display, Error};

/// What went wrong talking to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ApiErrorKind {
    /// The server could not be reached.
    #[display("Server unavailable: {}", _0)]
    Unavailable(String),
    /// The server answered with an error status.
    #[display("{}", _0)]
    Rejected(String),
    /// The server answered with a body we could not read.
    #[display("Unexpected response: {}", _0)]
    InvalidResponse(String),
    /// Input was rejected before any request was sent.
    #[display("{}", _0)]
    Validation(ValidationError),
    /// Nothing to process.
    #[display("Please enter some text to process.")]
    EmptyText,
}

/// API error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("API error: {} at {}:{}", kind, file, line)]
pub struct ApiError {
    /// Error kind.
    pub kind: ApiErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ApiError {
    /// Creates a new API error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ApiErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Message suitable for the status banner.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// True when the backend could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Unavailable(_))
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::new(ApiErrorKind::InvalidResponse(err.to_string()))
        } else {
            Self::new(ApiErrorKind::Unavailable(err.to_string()))
        }
    }
}

impl From<ValidationError> for ApiError {
    #[track_caller]
    fn from(err: ValidationError) -> Self {
        Self::new(ApiErrorKind::Validation(err))
    }
}

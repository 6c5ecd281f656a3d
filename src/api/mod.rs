//! HTTP client for the authentication and text-processing backends.

mod client;
mod error;
mod models;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind};
pub use models::{Credentials, NewAccount, UserProfile, ValidationError, is_valid_email};

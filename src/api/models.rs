//! Request and response bodies.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Minimum username length accepted at registration.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login form.
#[derive(Clone, Serialize, new, Getters)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form.
#[derive(Clone, Serialize, new, Getters)]
pub struct NewAccount {
    username: String,
    email: String,
    password: String,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl NewAccount {
    /// Checks the form before it is sent.
    ///
    /// Order: required fields, password length, username length, email shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.username.chars().count() < MIN_USERNAME_LEN {
            return Err(ValidationError::UsernameTooShort);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// Registration form problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// A field was left empty.
    #[display("All fields are required")]
    MissingFields,
    /// Password shorter than [`MIN_PASSWORD_LEN`].
    #[display("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    /// Username shorter than [`MIN_USERNAME_LEN`].
    #[display("Username must be at least {} characters", MIN_USERNAME_LEN)]
    UsernameTooShort,
    /// Email is not of the form `name@domain.tld`.
    #[display("Please enter a valid email")]
    InvalidEmail,
}

/// Loose email shape check: `local@domain.tld`.
///
/// No whitespace, exactly one `@`, and the domain contains a dot with at
/// least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let len = domain.len();
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < len)
}

/// Profile returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct UserProfile {
    username: String,
    email: String,
}

impl UserProfile {
    /// Creates a profile.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ProcessRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProcessResponse {
    pub text: String,
}

/// Error body; each endpoint uses a different field name.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, email: &str, password: &str) -> NewAccount {
        NewAccount::new(username.into(), email.into(), password.into())
    }

    #[test]
    fn test_valid_account() {
        assert_eq!(account("ana", "ana@mail.com", "secret").validate(), Ok(()));
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(
            account("", "bad", "x").validate(),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            account("al", "bad", "short").validate(),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            account("al", "bad", "longenough").validate(),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(
            account("alice", "bad", "longenough").validate(),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("a b@c.d"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("ana".into(), "hunter22".into());
        let shown = format!("{:?}", creds);
        assert!(shown.contains("ana"));
        assert!(!shown.contains("hunter22"));
    }
}

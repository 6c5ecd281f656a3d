//! Signed-in user state shared by the screens.

use crate::api::UserProfile;
use tracing::{info, instrument};

/// Who is signed in, if anyone.
///
/// Lives for the whole process; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<UserProfile>,
}

impl Session {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful login.
    #[instrument(skip(self, user), fields(username = %user.username()))]
    pub fn sign_in(&mut self, user: UserProfile) {
        info!("User signed in");
        self.user = Some(user);
    }

    /// Clears the signed-in user.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(username = %user.username(), "User signed out");
        }
    }

    /// True when someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

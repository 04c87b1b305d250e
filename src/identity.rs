//! Who is signed in.
//!
//! The core only sees the [`IdentityProvider`] port; concrete providers are
//! wired in by the front ends.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::IdentityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
}

pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserIdentity>;

    /// Receives the new identity on every sign-in or sign-out.
    fn on_auth_change(&self) -> watch::Receiver<Option<UserIdentity>>;
}

/// Mutable session backed by a watch channel.
pub struct SessionIdentity {
    tx: watch::Sender<Option<UserIdentity>>,
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionIdentity {
    #[must_use]
    pub fn new(initial: Option<UserIdentity>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Identity taken from the `[identity]` config section. A missing display
    /// name falls back to the id.
    #[must_use]
    pub fn from_config(config: &IdentityConfig) -> Self {
        let user = config
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| UserIdentity {
                id: id.to_string(),
                name: config
                    .user_name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| id.to_string()),
            });
        Self::new(user)
    }

    pub fn sign_in(&self, user: UserIdentity) {
        self.tx.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_user(&self) -> Option<UserIdentity> {
        self.tx.borrow().clone()
    }

    fn on_auth_change(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.tx.subscribe()
    }
}

//! Identity
//!
//! Stand-in for the external authentication provider: the only thing the
//! cart core consumes is the presence or absence of a current user, observed
//! over a watch channel.

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use theka_core::uuids::TypedUuid;

use crate::domain::carts::CartSession;

/// User id
pub type UserId = TypedUuid<User>;

/// The signed-in user's identity and display attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl User {
    /// Builds a user whose id is derived from the name, so the same name
    /// always maps to the same identity (and the same stored cart).
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            id: UserId::derived(&Uuid::NAMESPACE_OID, name),
            name: name.to_string(),
            email: String::new(),
            phone: None,
        }
    }
}

/// Publisher half of the identity signal.
#[derive(Debug)]
pub struct IdentityHandle {
    tx: watch::Sender<Option<User>>,
}

impl IdentityHandle {
    /// Creates a handle with no user signed in.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);

        Self { tx }
    }

    /// Publishes a sign-in.
    pub fn sign_in(&self, user: User) {
        self.tx.send_replace(Some(user));
    }

    /// Publishes a sign-out.
    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }

    /// A new subscription to identity changes.
    #[must_use]
    pub fn events(&self) -> IdentityEvents {
        IdentityEvents {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for IdentityHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber half of the identity signal.
#[derive(Debug)]
pub struct IdentityEvents {
    rx: watch::Receiver<Option<User>>,
}

impl IdentityEvents {
    /// The identity as of the latest change, marking it seen.
    pub fn current(&mut self) -> Option<User> {
        self.rx.borrow_and_update().clone()
    }

    /// Waits for the next identity change. Returns `false` once the handle
    /// has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Drives a cart session's persistence binding from identity changes:
/// a user signing in binds the session to their stored cart, signing out
/// unbinds it and resets the local view.
///
/// Runs until the [`IdentityHandle`] is dropped.
pub async fn run_identity_sync(session: Arc<CartSession>, mut events: IdentityEvents) {
    loop {
        match events.current() {
            Some(user) => session.bind(user).await,
            None => session.unbind().await,
        }

        if !events.changed().await {
            break;
        }
    }
}

//! Configured account directory implementing [`LoginService`].
//!
//! Passwords are held only as hex-encoded SHA-256 digests. User ids are
//! derived from the username so they survive restarts and keep matching the
//! owner column of persisted tasks.

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, User, UserId, Username};

fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Identifier assigned to `username` by [`InMemoryAccounts`].
pub fn account_user_id(username: &Username) -> UserId {
    let digest = Sha256::digest(username.as_ref().as_bytes());
    let mut bytes = [0_u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    UserId::from_uuid(uuid::Builder::from_random_bytes(bytes).into_uuid())
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password_digest: String,
}

/// Fixed set of accounts loaded at start-up.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccounts {
    accounts: HashMap<Username, Account>,
}

impl InMemoryAccounts {
    /// Directory with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account with a plain-text password.
    ///
    /// ```
    /// use todo_backend::domain::Username;
    /// use todo_backend::outbound::memory::InMemoryAccounts;
    ///
    /// let accounts = InMemoryAccounts::new()
    ///     .with_account(Username::new("admin").unwrap(), "password");
    /// assert_eq!(accounts.len(), 1);
    /// ```
    #[must_use]
    pub fn with_account(self, username: Username, password: &str) -> Self {
        self.with_password_digest(username, password_digest(password))
    }

    /// Add an account whose password is given as a hex SHA-256 digest.
    #[must_use]
    pub fn with_password_digest(mut self, username: Username, digest: impl Into<String>) -> Self {
        let user = User::new(account_user_id(&username), username.clone());
        self.accounts.insert(
            username,
            Account {
                user,
                password_digest: digest.into().to_ascii_lowercase(),
            },
        );
        self
    }

    /// Number of configured accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account is configured.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl LoginService for InMemoryAccounts {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let supplied = password_digest(credentials.password());
        match self.accounts.get(credentials.username()) {
            Some(account) if account.password_digest == supplied => Ok(account.user.clone()),
            Some(_) => {
                debug!(username = %credentials.username(), "password mismatch");
                Err(Error::unauthorized("invalid credentials"))
            }
            None => {
                debug!(username = %credentials.username(), "unknown username");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}

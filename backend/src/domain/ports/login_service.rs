//! Driving port for authentication.
//!
//! HTTP handlers authenticate through this trait and never see how accounts
//! are stored, so handler tests can swap in a deterministic double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and return the matching account.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// `Unauthorized("invalid credentials")`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TODO_*` environment variables and an optional
//! configuration file, in increasing order of precedence for flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use todo_backend::domain::{UserValidationError, Username};
use todo_backend::outbound::events::DEFAULT_EVENT_CAPACITY;
use todo_backend::outbound::memory::InMemoryAccounts;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ACCOUNT_USERNAME: &str = "admin";
const DEFAULT_ACCOUNT_PASSWORD: &str = "password";

/// Start-up configuration for the task list server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TODO")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
    /// PostgreSQL URL; tasks are kept in memory when absent.
    pub database_url: Option<String>,
    /// Username of the configured account.
    pub account_username: Option<String>,
    /// Password of the configured account.
    pub account_password: Option<String>,
    /// Events buffered per change-feed subscriber.
    #[ortho_config(default = DEFAULT_EVENT_CAPACITY)]
    pub event_capacity: usize,
}

/// Settings that parse but do not make sense.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The account username fails validation.
    #[error("invalid account username: {0}")]
    AccountUsername(#[from] UserValidationError),
}

impl AppSettings {
    /// Parsed listen address; `0.0.0.0:8080` unless configured.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Broadcast buffer size for the change feed.
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Account directory holding the single configured account.
    pub fn accounts(&self) -> Result<InMemoryAccounts, SettingsError> {
        let username = Username::new(
            self.account_username
                .as_deref()
                .unwrap_or(DEFAULT_ACCOUNT_USERNAME),
        )?;
        let password = self
            .account_password
            .as_deref()
            .unwrap_or(DEFAULT_ACCOUNT_PASSWORD);
        Ok(InMemoryAccounts::new().with_account(username, password))
    }
}

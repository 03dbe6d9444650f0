//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use std::net::SocketAddr;
use todo_backend::outbound::events::DEFAULT_EVENT_CAPACITY;
use todo_backend::outbound::memory::InMemoryAccounts;
use todo_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) accounts: InMemoryAccounts,
    pub(crate) event_capacity: usize,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and a bind
    /// address. Tasks live in memory until a pool is attached.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            accounts: InMemoryAccounts::new(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Attach a database connection pool; tasks are then stored in
    /// PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Replace the account directory used by `POST /api/v1/login`.
    #[must_use]
    pub fn with_accounts(mut self, accounts: InMemoryAccounts) -> Self {
        self.accounts = accounts;
        self
    }

    /// Set how many events each change-feed subscriber may fall behind.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

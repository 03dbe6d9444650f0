//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, TaskCommand, TaskQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Task reads.
    pub tasks: Arc<dyn TaskQuery>,
    /// Task mutations.
    pub commands: Arc<dyn TaskCommand>,
}

impl HttpState {
    /// Bundle the ports behind the REST endpoints.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use todo_backend::domain::ports::{FixtureTaskCommand, FixtureTaskQuery};
    /// use todo_backend::inbound::http::state::HttpState;
    /// use todo_backend::outbound::memory::InMemoryAccounts;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryAccounts::new()),
    ///     Arc::new(FixtureTaskQuery),
    ///     Arc::new(FixtureTaskCommand),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        tasks: Arc<dyn TaskQuery>,
        commands: Arc<dyn TaskCommand>,
    ) -> Self {
        Self {
            login,
            tasks,
            commands,
        }
    }
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::NoOpTaskEvents;
use crate::domain::{TaskService, Username};
use crate::outbound::memory::{InMemoryAccounts, InMemoryTaskRepository};

use super::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Clock pinned to a fixed instant, advancing one second per reading so
/// consecutive creations stay strictly ordered.
pub struct SteppingClock {
    next: std::sync::Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: std::sync::Mutex::new(start),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(
            Utc.timestamp_opt(1_750_000_000, 0)
                .single()
                .expect("valid timestamp"),
        )
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<chrono::Local> {
        self.utc().with_timezone(&chrono::Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock");
        let now = *next;
        *next = now + chrono::Duration::seconds(1);
        now
    }
}

/// Accounts `ada` / `lovelace` and `bob` / `builder`.
pub fn test_accounts() -> InMemoryAccounts {
    InMemoryAccounts::new()
        .with_account(Username::new("ada").expect("valid"), "lovelace")
        .with_account(Username::new("bob").expect("valid"), "builder")
}

/// HTTP state over the in-memory adapters with a stepping clock.
pub fn in_memory_state() -> HttpState {
    let service = Arc::new(TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(NoOpTaskEvents),
        Arc::new(SteppingClock::default()),
    ));
    HttpState::new(Arc::new(test_accounts()), service.clone(), service)
}

//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: the signed-in user and the view's
//! hide-completed flag.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, HideCompleted, User, UserId, Username};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const HIDE_COMPLETED_KEY: &str = "hide_completed";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn read_failed(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_failed(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user in the session cookie.
    ///
    /// The session id is renewed so a pre-login cookie cannot be reused.
    pub fn persist_user(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id().as_ref())
            .map_err(write_failed)?;
        self.0
            .insert(USERNAME_KEY, user.username().as_ref())
            .map_err(write_failed)
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A malformed id is treated as signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self.0.get::<String>(USER_ID_KEY).map_err(read_failed)?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require the full signed-in user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<User, Error> {
        let id = self.require_user_id()?;
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(read_failed)?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        let username = Username::new(raw).map_err(|error| {
            warn!("invalid username in session cookie: {error}");
            Error::unauthorized("login required")
        })?;
        Ok(User::new(id, username))
    }

    /// The view's hide-completed flag; off when never set.
    pub fn hide_completed(&self) -> Result<HideCompleted, Error> {
        let flag = self
            .0
            .get::<bool>(HIDE_COMPLETED_KEY)
            .map_err(read_failed)?;
        Ok(flag.map(HideCompleted::from).unwrap_or_default())
    }

    /// Store the hide-completed flag in the session.
    pub fn set_hide_completed(&self, flag: HideCompleted) -> Result<(), Error> {
        self.0
            .insert(HIDE_COMPLETED_KEY, flag.is_enabled())
            .map_err(write_failed)
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

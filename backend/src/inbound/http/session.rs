//! Sessioning: the signed-in user carried in a private cookie.
//!
//! Wraps the Actix session so handlers only deal with domain-friendly
//! operations: start a session for a user, end it, or require one state or
//! the other.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// The signed-in user id, if any. Tampered values count as signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::parse(&raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Fail with `401` unless someone is signed in.
    pub fn is_logged_in(&self) -> Result<(), Error> {
        self.get_user().map(|_| ())
    }

    /// Fail with `403` if someone is already signed in.
    pub fn is_logged_out(&self) -> Result<(), Error> {
        if self.user_id()?.is_some() {
            return Err(Error::forbidden("Must be logged out!"));
        }
        Ok(())
    }

    /// The signed-in user id, or `401 Must be logged in!`.
    pub fn get_user(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("Must be logged in!"))
    }

    /// Sign `user` in. Requires no active session.
    pub fn start(&self, user: &User) -> Result<(), Error> {
        self.is_logged_out()?;
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Sign the current user out. Requires an active session.
    pub fn end(&self) -> Result<(), Error> {
        self.is_logged_in()?;
        self.0.purge();
        Ok(())
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

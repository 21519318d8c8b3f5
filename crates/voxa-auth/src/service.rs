//! Interface to the external auth service.

use futures::future::BoxFuture;
use thiserror::Error;

use voxa_shared::types::{AuthMode, Session};

use crate::flow::Credential;

/// Opaque failure from the auth backend.
///
/// The message is shown to the user verbatim; the flow never retries on
/// its own — recovery is always a fresh user-initiated submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Asynchronous credential backend.
///
/// `authenticate` is called exactly once per accepted submission.  The
/// `Result` is the success/error discriminator: implementations must
/// resolve one way or the other, there is no "no answer means success".
pub trait AuthService: Send + Sync {
    fn authenticate(
        &self,
        mode: AuthMode,
        credential: Credential,
    ) -> BoxFuture<'static, Result<Session, AuthError>>;
}

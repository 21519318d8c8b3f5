//! # voxa-auth
//!
//! The login/signup state machine and the interface to the external auth
//! service.  The flow is a plain command-driven struct: the UI calls a
//! command, then re-reads the state it renders from.  The only async
//! boundary is the credential submission itself, which callers drive via
//! [`flow::AuthFlow::begin_submit`] / [`flow::AuthFlow::finish_submit`]
//! around an [`service::AuthService`] call.

pub mod flow;
pub mod service;

pub use flow::{AuthFlow, AuthFlowError, AuthStep, Credential, CredentialField, SubmitRequest};
pub use service::{AuthError, AuthService};

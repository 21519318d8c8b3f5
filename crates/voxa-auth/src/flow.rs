//! Login / signup state machine.
//!
//! Drives the gate screen: which form is showing, what the user has typed
//! so far, and the transient flags the form renders (busy indicator, terms
//! reminder, error and success notices).  All mutation goes through
//! commands; every command leaves the flow in a well-defined, resumable
//! state.

use serde::Serialize;
use thiserror::Error;

use voxa_shared::types::{AuthMode, Session};

use crate::service::AuthError;

/// Which form the auth screen is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    /// Email + password for an existing account.
    Login,
    /// First signup step: full name, email, password.
    SignupAccount,
    /// Second signup step: short bio.
    SignupBio,
}

/// Account details accumulated across the flow.
///
/// Lives only for the duration of the flow; nothing here is persisted.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub bio: String,
}

/// Required form fields, named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    FullName,
    Email,
    Password,
    Bio,
}

fn missing_fields_message(fields: &[CredentialField]) -> &'static str {
    if fields.len() == 1 && fields[0] == CredentialField::Bio {
        "Please enter your bio."
    } else {
        "Please fill out all required fields."
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthFlowError {
    /// One or more required fields are empty after trimming.
    #[error("{}", missing_fields_message(.0))]
    MissingFields(Vec<CredentialField>),

    /// The terms checkbox has not been ticked.
    #[error("Please agree to the terms of use & privacy policy to continue.")]
    TermsNotAccepted,

    /// A credential submission is already in flight.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// The command is not available in the current step.
    #[error("{command} is not available in the current step")]
    WrongStep {
        command: &'static str,
        step: AuthStep,
    },
}

/// Everything the auth service needs for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub mode: AuthMode,
    pub credential: Credential,
}

/// State machine driving the login / signup screen.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    step: AuthStep,
    credential: Credential,
    terms_accepted: bool,
    submitting: bool,
    show_password: bool,
    show_terms_reminder: bool,
    last_error: Option<String>,
    last_success: Option<String>,
}

impl AuthFlow {
    /// A fresh flow, opening on the signup account form.
    pub fn new() -> Self {
        Self {
            step: AuthStep::SignupAccount,
            credential: Credential::default(),
            terms_accepted: false,
            submitting: false,
            show_password: false,
            show_terms_reminder: false,
            last_error: None,
            last_success: None,
        }
    }

    pub fn step(&self) -> AuthStep {
        self.step
    }

    /// `Signup` iff the current step was reached via the signup path.
    pub fn mode(&self) -> AuthMode {
        match self.step {
            AuthStep::Login => AuthMode::Login,
            AuthStep::SignupAccount | AuthStep::SignupBio => AuthMode::Signup,
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn password_visible(&self) -> bool {
        self.show_password
    }

    pub fn terms_reminder_visible(&self) -> bool {
        self.show_terms_reminder
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_success(&self) -> Option<&str> {
        self.last_success.as_deref()
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.credential.full_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.credential.email = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.credential.password = value.into();
    }

    pub fn set_bio(&mut self, value: impl Into<String>) {
        self.credential.bio = value.into();
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Show/hide the password characters (the eye toggle on the form).
    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Hide the terms reminder; scheduled by the caller after its display
    /// window elapses.
    pub fn dismiss_terms_reminder(&mut self) {
        self.show_terms_reminder = false;
    }

    /// Jump between the login form and the start of the signup form.
    ///
    /// Keeps the account fields the user already typed, but drops the bio
    /// and any notices from the previous form.
    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.step = match mode {
            AuthMode::Login => AuthStep::Login,
            AuthMode::Signup => AuthStep::SignupAccount,
        };
        self.credential.bio.clear();
        self.last_error = None;
        self.last_success = None;
    }

    /// Move from the account step to the bio step.
    pub fn advance(&mut self) -> Result<(), AuthFlowError> {
        if self.submitting {
            return Err(AuthFlowError::SubmissionInFlight);
        }
        if self.step != AuthStep::SignupAccount {
            return Err(AuthFlowError::WrongStep {
                command: "advance",
                step: self.step,
            });
        }

        let missing = self.missing_fields(&[
            CredentialField::FullName,
            CredentialField::Email,
            CredentialField::Password,
        ]);
        if !missing.is_empty() {
            return Err(self.fail_validation(missing));
        }

        self.last_error = None;
        self.step = AuthStep::SignupBio;
        Ok(())
    }

    /// Return from the bio step to the account step, keeping everything
    /// the user has typed.
    pub fn retreat(&mut self) -> Result<(), AuthFlowError> {
        if self.submitting {
            return Err(AuthFlowError::SubmissionInFlight);
        }
        if self.step != AuthStep::SignupBio {
            return Err(AuthFlowError::WrongStep {
                command: "retreat",
                step: self.step,
            });
        }

        self.last_error = None;
        self.step = AuthStep::SignupAccount;
        Ok(())
    }

    /// Validate and stage a submission.
    ///
    /// At most one submission may be in flight: a second call before
    /// [`finish_submit`](Self::finish_submit) is rejected, not queued.  On
    /// success the caller ships the returned request to the auth service
    /// and feeds the outcome back.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, AuthFlowError> {
        if self.submitting {
            return Err(AuthFlowError::SubmissionInFlight);
        }

        self.last_error = None;
        self.last_success = None;

        if !self.terms_accepted {
            self.show_terms_reminder = true;
            return Err(AuthFlowError::TermsNotAccepted);
        }

        let required: &[CredentialField] = match self.step {
            AuthStep::Login => &[CredentialField::Email, CredentialField::Password],
            AuthStep::SignupBio => &[CredentialField::Bio],
            AuthStep::SignupAccount => {
                return Err(AuthFlowError::WrongStep {
                    command: "submit",
                    step: self.step,
                });
            }
        };

        let missing = self.missing_fields(required);
        if !missing.is_empty() {
            return Err(self.fail_validation(missing));
        }

        self.submitting = true;
        Ok(SubmitRequest {
            mode: self.mode(),
            credential: self.credential.clone(),
        })
    }

    /// Record the outcome of a submission started with
    /// [`begin_submit`](Self::begin_submit).
    ///
    /// Success yields the session for the caller to hand off; the flow
    /// itself does not navigate.  Failure surfaces the service's message
    /// verbatim and leaves the step unchanged so the user can resubmit.
    pub fn finish_submit(&mut self, result: Result<Session, AuthError>) -> Option<Session> {
        self.submitting = false;
        match result {
            Ok(session) => {
                self.last_success = Some(
                    match self.mode() {
                        AuthMode::Signup => "Account created successfully!",
                        AuthMode::Login => "Login successful!",
                    }
                    .to_string(),
                );
                Some(session)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                None
            }
        }
    }

    fn missing_fields(&self, required: &[CredentialField]) -> Vec<CredentialField> {
        required
            .iter()
            .copied()
            .filter(|field| {
                let value = match field {
                    CredentialField::FullName => &self.credential.full_name,
                    CredentialField::Email => &self.credential.email,
                    CredentialField::Password => &self.credential.password,
                    CredentialField::Bio => &self.credential.bio,
                };
                value.trim().is_empty()
            })
            .collect()
    }

    fn fail_validation(&mut self, missing: Vec<CredentialField>) -> AuthFlowError {
        let err = AuthFlowError::MissingFields(missing);
        self.last_error = Some(err.to_string());
        err
    }
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

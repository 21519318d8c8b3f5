//! Login / signup command handlers.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use voxa_auth::{AuthFlowError, AuthService, AuthStep, CredentialField};
use voxa_shared::constants::{SIGNUP_STEP_PAUSE_MS, TERMS_REMINDER_DISPLAY_MS};
use voxa_shared::password::{self, PasswordReport};
use voxa_shared::types::{AuthMode, Session};

use crate::state::SharedState;

/// Everything the auth screen renders, in one snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthViewDto {
    pub mode: String,
    pub step: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub terms_accepted: bool,
    pub password_visible: bool,
    pub submitting: bool,
    pub show_terms_reminder: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    /// Present only while typing a password on the signup path.
    pub password_strength: Option<PasswordReport>,
}

fn step_name(step: AuthStep) -> &'static str {
    match step {
        AuthStep::Login => "login",
        AuthStep::SignupAccount => "signup-account",
        AuthStep::SignupBio => "signup-bio",
    }
}

/// Snapshot the auth screen state for rendering.
pub fn auth_view(state: &SharedState) -> Result<AuthViewDto, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let flow = &guard.auth;
    let credential = flow.credential();

    let password_strength = if flow.mode() == AuthMode::Signup && !credential.password.is_empty() {
        Some(password::evaluate(&credential.password))
    } else {
        None
    };

    Ok(AuthViewDto {
        mode: flow.mode().as_str().to_string(),
        step: step_name(flow.step()).to_string(),
        full_name: credential.full_name.clone(),
        email: credential.email.clone(),
        password: credential.password.clone(),
        bio: credential.bio.clone(),
        terms_accepted: flow.terms_accepted(),
        password_visible: flow.password_visible(),
        submitting: flow.submitting(),
        show_terms_reminder: flow.terms_reminder_visible(),
        error: flow.last_error().map(String::from),
        success: flow.last_success().map(String::from),
        password_strength,
    })
}

/// Switch between the login and signup forms.
pub fn switch_mode(state: &SharedState, mode: AuthMode) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.auth.switch_mode(mode);
    Ok(())
}

/// Record what the user typed into one form field.
pub fn update_credential_field(
    state: &SharedState,
    field: CredentialField,
    value: String,
) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    match field {
        CredentialField::FullName => guard.auth.set_full_name(value),
        CredentialField::Email => guard.auth.set_email(value),
        CredentialField::Password => guard.auth.set_password(value),
        CredentialField::Bio => guard.auth.set_bio(value),
    }
    Ok(())
}

pub fn set_terms_accepted(state: &SharedState, accepted: bool) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.auth.set_terms_accepted(accepted);
    Ok(())
}

pub fn toggle_password_visibility(state: &SharedState) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.auth.toggle_password_visibility();
    Ok(())
}

/// Move from the account step to the bio step.
///
/// Validation and the transition apply immediately; the pause afterwards
/// only holds the command open so the UI can play the step animation.
pub async fn advance_signup(state: &SharedState) -> Result<(), String> {
    {
        let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        guard.auth.advance().map_err(|e| e.to_string())?;
    }

    tokio::time::sleep(Duration::from_millis(SIGNUP_STEP_PAUSE_MS)).await;
    Ok(())
}

/// Return from the bio step to the account step.
pub fn retreat_signup(state: &SharedState) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard.auth.retreat().map_err(|e| e.to_string())
}

/// Submit the accumulated credential to the auth service.
///
/// At most one backend call is in flight per client; a concurrent call is
/// rejected before it reaches the service.  The session is stored for the
/// other commands and returned to the caller, who owns navigation.
pub async fn submit(
    state: &SharedState,
    auth_service: &dyn AuthService,
) -> Result<Session, String> {
    let request = {
        let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
        match guard.auth.begin_submit() {
            Ok(request) => request,
            Err(err) => {
                if err == AuthFlowError::TermsNotAccepted {
                    schedule_terms_reminder_dismiss(state.clone());
                }
                return Err(err.to_string());
            }
        }
    };

    info!(mode = request.mode.as_str(), "Submitting credential");
    let result = auth_service
        .authenticate(request.mode, request.credential)
        .await;

    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    match guard.auth.finish_submit(result) {
        Some(session) => {
            info!(user = %session.user_id, "Authenticated");
            guard.session = Some(session.clone());
            Ok(session)
        }
        None => Err(guard
            .auth
            .last_error()
            .unwrap_or("Authentication failed")
            .to_string()),
    }
}

/// Drop the session and return to a fresh login form.
pub fn logout(state: &SharedState) -> Result<(), String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;

    guard.session = None;
    guard.auth = voxa_auth::AuthFlow::new();
    guard.auth.switch_mode(AuthMode::Login);
    guard.directory.clear_selection();
    guard.directory.set_query("");
    guard.messages.clear();
    guard.viewer.dismiss();

    info!("Logged out");
    Ok(())
}

/// Hide the terms reminder once its display window elapses.
fn schedule_terms_reminder_dismiss(state: SharedState) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(TERMS_REMINDER_DISPLAY_MS)).await;
        if let Ok(mut guard) = state.lock() {
            guard.auth.dismiss_terms_reminder();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use futures::future::BoxFuture;

    use voxa_auth::Credential;
    use voxa_shared::types::ContactId;

    use crate::state::AppState;

    /// Auth service double that counts invocations and answers after an
    /// optional delay.
    struct MockAuthService {
        calls: Arc<AtomicUsize>,
        delay_ms: u64,
        failure: Option<String>,
    }

    impl MockAuthService {
        fn ok() -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                delay_ms: 0,
                failure: None,
            }
        }

        fn slow(delay_ms: u64) -> Self {
            Self {
                delay_ms,
                ..Self::ok()
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Self::ok()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AuthService for MockAuthService {
        fn authenticate(
            &self,
            _mode: AuthMode,
            _credential: Credential,
        ) -> BoxFuture<'static, Result<Session, voxa_auth::AuthError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay_ms = self.delay_ms;
            let failure = self.failure.clone();
            Box::pin(async move {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                match failure {
                    Some(message) => Err(voxa_auth::AuthError::new(message)),
                    None => Ok(Session {
                        user_id: ContactId::new("u-1"),
                        token: "tok".to_string(),
                    }),
                }
            })
        }
    }

    fn login_ready_state() -> SharedState {
        let state: SharedState = Arc::new(Mutex::new(AppState::new()));
        switch_mode(&state, AuthMode::Login).unwrap();
        update_credential_field(&state, CredentialField::Email, "ann@example.com".into()).unwrap();
        update_credential_field(&state, CredentialField::Password, "Sup3r-secret".into()).unwrap();
        set_terms_accepted(&state, true).unwrap();
        state
    }

    #[tokio::test]
    async fn test_submit_without_terms_never_calls_service() {
        let state = login_ready_state();
        set_terms_accepted(&state, false).unwrap();
        let service = MockAuthService::ok();

        let err = submit(&state, &service).await.unwrap_err();
        assert_eq!(
            err,
            "Please agree to the terms of use & privacy policy to continue."
        );
        assert_eq!(service.call_count(), 0);
        assert!(auth_view(&state).unwrap().show_terms_reminder);
    }

    #[tokio::test]
    async fn test_rapid_double_submit_invokes_service_once() {
        let state = login_ready_state();
        let service = MockAuthService::slow(50);

        let first = submit(&state, &service);
        let second = submit(&state, &service);
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), "A submission is already in progress");
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_successful_submit_stores_session() {
        let state = login_ready_state();
        let service = MockAuthService::ok();

        let session = submit(&state, &service).await.unwrap();
        assert_eq!(session.user_id, ContactId::new("u-1"));

        let guard = state.lock().unwrap();
        assert_eq!(guard.session.as_ref(), Some(&session));
        assert_eq!(guard.auth.last_success(), Some("Login successful!"));
        assert!(!guard.auth.submitting());
    }

    #[tokio::test]
    async fn test_failed_submit_surfaces_backend_message() {
        let state = login_ready_state();
        let service = MockAuthService::failing("email already registered");

        let err = submit(&state, &service).await.unwrap_err();
        assert_eq!(err, "email already registered");
        assert_eq!(service.call_count(), 1);

        let view = auth_view(&state).unwrap();
        assert_eq!(view.error.as_deref(), Some("email already registered"));
        assert!(!view.submitting);

        // a fresh submission goes through
        let retry = MockAuthService::ok();
        assert!(submit(&state, &retry).await.is_ok());
        assert_eq!(retry.call_count(), 1);
    }

    #[tokio::test]
    async fn test_signup_path_advances_then_submits_with_signup_mode() {
        let state: SharedState = Arc::new(Mutex::new(AppState::new()));
        update_credential_field(&state, CredentialField::FullName, "Ann Example".into()).unwrap();
        update_credential_field(&state, CredentialField::Email, "ann@example.com".into()).unwrap();
        update_credential_field(&state, CredentialField::Password, "Sup3r-secret".into()).unwrap();
        set_terms_accepted(&state, true).unwrap();

        advance_signup(&state).await.unwrap();
        assert_eq!(auth_view(&state).unwrap().step, "signup-bio");

        update_credential_field(&state, CredentialField::Bio, "hello there".into()).unwrap();
        let service = MockAuthService::ok();
        submit(&state, &service).await.unwrap();

        let view = auth_view(&state).unwrap();
        assert_eq!(view.mode, "signup");
        assert_eq!(view.success.as_deref(), Some("Account created successfully!"));
    }

    #[tokio::test]
    async fn test_advance_with_missing_fields_reports_and_stays() {
        let state: SharedState = Arc::new(Mutex::new(AppState::new()));
        update_credential_field(&state, CredentialField::Email, "ann@example.com".into()).unwrap();

        let err = advance_signup(&state).await.unwrap_err();
        assert_eq!(err, "Please fill out all required fields.");
        assert_eq!(auth_view(&state).unwrap().step, "signup-account");
    }

    #[tokio::test]
    async fn test_auth_view_scores_password_on_signup_only() {
        let state: SharedState = Arc::new(Mutex::new(AppState::new()));
        update_credential_field(&state, CredentialField::Password, "Ab1!cdef".into()).unwrap();

        let strength = auth_view(&state).unwrap().password_strength.unwrap();
        assert_eq!(strength.score, 6);

        switch_mode(&state, AuthMode::Login).unwrap();
        assert!(auth_view(&state).unwrap().password_strength.is_none());
    }

    #[tokio::test]
    async fn test_logout_resets_to_fresh_login() {
        let state = login_ready_state();
        let service = MockAuthService::ok();
        submit(&state, &service).await.unwrap();

        logout(&state).unwrap();

        let guard = state.lock().unwrap();
        assert!(guard.session.is_none());
        assert!(guard.messages.is_empty());
        assert_eq!(guard.auth.step(), AuthStep::Login);
        assert!(guard.auth.credential().email.is_empty());
        assert!(guard.directory.selected().is_none());
        assert!(!guard.viewer.is_open());
    }
}

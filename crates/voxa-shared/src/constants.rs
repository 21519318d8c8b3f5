/// Application name
pub const APP_NAME: &str = "Voxa";

/// Pause between the signup account step and the bio step, in milliseconds.
/// Gives the UI room to play the step transition; no validation happens
/// during this window.
pub const SIGNUP_STEP_PAUSE_MS: u64 = 800;

/// How long the "agree to the terms" reminder stays visible, in milliseconds.
pub const TERMS_REMINDER_DISPLAY_MS: u64 = 3_000;

/// Unread counts above this render as "99+".  The stored count stays exact.
pub const UNREAD_BADGE_MAX: u64 = 99;

/// Password length that earns the full length score.
pub const PASSWORD_FULL_LENGTH: usize = 8;

/// Password length that earns a partial length score.
pub const PASSWORD_PARTIAL_LENGTH: usize = 6;

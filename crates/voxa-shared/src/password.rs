//! Password strength scoring shown live on the signup form.
//!
//! Pure and deterministic: the same password always yields the same report,
//! and nothing is logged or stored.

use serde::Serialize;

use crate::constants::{PASSWORD_FULL_LENGTH, PASSWORD_PARTIAL_LENGTH};

/// Individual checks a password can satisfy.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PasswordRule {
    MinLength8,
    HasLower,
    HasUpper,
    HasDigit,
    HasSpecial,
}

/// Overall strength bucket.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }
}

/// Result of scoring one password.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PasswordReport {
    /// 0..=6.  Length contributes up to 2, each character class 1.
    pub score: u8,
    /// `None` for an empty password: nothing typed yet, nothing to judge.
    pub label: Option<PasswordStrength>,
    /// Which checks passed, for the rule chips under the strength bar.
    pub satisfied: Vec<PasswordRule>,
}

impl PasswordReport {
    pub fn satisfies(&self, rule: PasswordRule) -> bool {
        self.satisfied.contains(&rule)
    }
}

/// Score a password.
///
/// Length >= 8 earns 2 points (1 point at >= 6), then one point per
/// character class present: lowercase, uppercase, digit, anything else.
/// Score <= 2 is Weak, 3..=4 Medium, >= 5 Strong.
pub fn evaluate(password: &str) -> PasswordReport {
    if password.is_empty() {
        return PasswordReport {
            score: 0,
            label: None,
            satisfied: Vec::new(),
        };
    }

    let mut score = 0u8;
    let mut satisfied = Vec::new();

    let length = password.chars().count();
    if length >= PASSWORD_FULL_LENGTH {
        score += 2;
        satisfied.push(PasswordRule::MinLength8);
    } else if length >= PASSWORD_PARTIAL_LENGTH {
        score += 1;
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
        satisfied.push(PasswordRule::HasLower);
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
        satisfied.push(PasswordRule::HasUpper);
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
        satisfied.push(PasswordRule::HasDigit);
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
        satisfied.push(PasswordRule::HasSpecial);
    }

    let label = Some(match score {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    });

    PasswordReport {
        score,
        label,
        satisfied,
    }
}

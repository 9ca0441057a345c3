use serde::Serialize;

use crate::errors::AppError;

pub const MIN_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// One point each for length, an uppercase letter, a digit and a symbol.
pub fn score(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= MIN_LENGTH,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|passed| **passed).count() as u8
}

pub fn strength(password: &str) -> PasswordStrength {
    match score(password) {
        3.. => PasswordStrength::Strong,
        2 => PasswordStrength::Medium,
        _ => PasswordStrength::Weak,
    }
}

/// Rejects mismatched confirmations and weak passwords.
pub fn check_new_password(password: &str, confirm_password: &str) -> Result<PasswordStrength, AppError> {
    if password != confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    match strength(password) {
        PasswordStrength::Weak => Err(AppError::Validation(
            "Password is too weak. Use letters and numbers.".to_string(),
        )),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_counts_each_rule_once() {
        assert_eq!(score(""), 0);
        assert_eq!(score("abcdef"), 1);
        assert_eq!(score("Abcdef"), 2);
        assert_eq!(score("Abcde1"), 3);
        assert_eq!(score("Abcd1!"), 4);
        assert_eq!(score("A1!"), 3);
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(strength("abc"), PasswordStrength::Weak);
        assert_eq!(strength("abcdefgh"), PasswordStrength::Weak);
        assert_eq!(strength("abcdef1"), PasswordStrength::Medium);
        assert_eq!(strength("Abcdef1"), PasswordStrength::Strong);
        assert_eq!(strength("a1!"), PasswordStrength::Medium);
    }

    #[test]
    fn test_non_ascii_letters_count_as_symbols() {
        assert_eq!(strength("ñandú12"), PasswordStrength::Strong);
    }

    #[test]
    fn test_mismatched_confirmation_is_rejected_first() {
        let err = check_new_password("Abcdef1!", "abcdef1!").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Passwords do not match"));
    }

    #[test]
    fn test_weak_password_is_rejected() {
        assert!(matches!(
            check_new_password("password", "password"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            check_new_password("password1", "password1").unwrap(),
            PasswordStrength::Medium
        );
    }
}

//! Registration and account-field validation.
//!
//! Password hashing itself lives in the API crate (argon2); this module only
//! decides whether submitted fields are acceptable.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Username length bounds (inclusive).
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Maximum display-name length.
pub const MAX_NAME_LENGTH: usize = 100;

/// Registration fields after trimming and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub username: String,
    pub email: String,
}

/// Validate the four registration fields.
///
/// All fields are required. The password is returned untouched to the caller
/// for hashing; name, username, and email come back trimmed, with the email
/// lowercased so uniqueness checks are case-insensitive.
pub fn validate_registration(
    name: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Result<NewAccount, CoreError> {
    if name.trim().is_empty()
        || username.trim().is_empty()
        || email.trim().is_empty()
        || password.is_empty()
    {
        return Err(CoreError::Validation("All fields are required".into()));
    }

    let name = validate_name(name)?;
    let username = validate_username(username)?;
    let email = normalize_email(email)?;
    validate_password_strength(password)?;

    Ok(NewAccount {
        name,
        username,
        email,
    })
}

/// Trim and bound a display name.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

/// Usernames are 3-30 characters of ASCII letters, digits, `_` or `.`.
pub fn validate_username(username: &str) -> Result<String, CoreError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '_' and '.'".into(),
        ));
    }
    Ok(username.to_string())
}

/// Trim, lowercase, and check the shape of an email address.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(email)
}

pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_valid_registration_and_normalizes() {
        let account = validate_registration(" Alice ", "alice", " A@X.com ", "pw123456")
            .expect("registration should validate");
        assert_eq!(account.name, "Alice");
        assert_eq!(account.username, "alice");
        assert_eq!(account.email, "a@x.com");
    }

    #[test]
    fn missing_field_is_rejected() {
        let result = validate_registration("Alice", "", "a@x.com", "pw123456");
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg == "All fields are required");
    }

    #[test]
    fn short_password_is_rejected() {
        let result = validate_registration("Alice", "alice", "a@x.com", "short");
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("at least 8"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert_matches!(normalize_email("not-an-email"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn username_charset_and_length() {
        assert!(validate_username("bob.smith_2").is_ok());
        assert_matches!(validate_username("ab"), Err(CoreError::Validation(_)));
        assert_matches!(validate_username("has space"), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_username(&"x".repeat(MAX_USERNAME_LENGTH + 1)),
            Err(CoreError::Validation(_))
        );
    }
}

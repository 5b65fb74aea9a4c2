use std::sync::LazyLock;

use colored::Colorize;
use inquire::Text;
use regex::Regex;
use validator::ValidateEmail;

use crate::error::AppError;

/// Maximum length for an email address
const MAX_EMAIL_LENGTH: usize = 100;
/// Maximum length for an account name (GitHub caps usernames at 39)
const MAX_NAME_LENGTH: usize = 39;

// Characters allowed in a name that could plausibly be a GitHub username.
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+$").unwrap());

/// Prompts user for input until valid input is provided
pub fn prompt_until_valid<F>(prompt_message: &str, input_validation: F) -> Result<String, AppError>
where
    F: Fn(&str) -> Result<(), AppError>,
{
    loop {
        let input: String = Text::new(prompt_message).prompt()?;
        match input_validation(&input) {
            Ok(_) => break Ok(input),
            Err(AppError::Validation(msg)) => println!("{}", msg.red()),
            Err(e) => return Err(e),
        }
    }
}

/// Validates email input
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() {
        Err(AppError::Validation("email cannot be empty".to_string()))
    } else if email.len() > MAX_EMAIL_LENGTH {
        Err(AppError::Validation(format!(
            "email too long, max {MAX_EMAIL_LENGTH} characters"
        )))
    } else if !email.validate_email() {
        Err(AppError::Validation("invalid email format".to_string()))
    } else {
        Ok(())
    }
}

/// Validates an account name input
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        Err(AppError::Validation("name cannot be empty".to_string()))
    } else if name.len() > MAX_NAME_LENGTH {
        Err(AppError::Validation(format!(
            "name too long, max {MAX_NAME_LENGTH} characters"
        )))
    } else {
        Ok(())
    }
}

/// Whether `name` is syntactically a plausible GitHub username
///
/// Display names like "John Doe" are allowed as account names but are never
/// checked against GitHub.
pub fn looks_like_username(name: &str) -> bool {
    USERNAME_PATTERN.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_email_passes() {
        assert!(validate_email("john.doe+git@example.co.uk").is_ok());
    }

    #[test]
    fn malformed_emails_fail() {
        for email in ["", "plainaddress", "missing@tld", "@example.com"] {
            assert!(
                matches!(validate_email(email), Err(AppError::Validation(_))),
                "expected '{email}' to be rejected"
            );
        }
    }

    #[test]
    fn overlong_email_fails() {
        let email = format!("{}@example.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert!(matches!(validate_email(&email), Err(AppError::Validation(_))));
    }

    #[test]
    fn empty_name_fails() {
        assert!(matches!(validate_name("  "), Err(AppError::Validation(_))));
        assert!(validate_name("johnDoe98").is_ok());
    }

    #[test]
    fn username_shapes_are_recognized() {
        assert!(looks_like_username("johnDoe98"));
        assert!(looks_like_username("john-doe_98.x"));
        assert!(!looks_like_username("John Doe"));
        assert!(!looks_like_username(""));
        assert!(!looks_like_username("name/with/slashes"));
    }
}

//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.') && email.len() > 5
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && phone.len() >= 10
}

/// Parse a CSV permission string into an allowed flag
///
/// Accepts the usual truthy/falsy spellings case-insensitively; anything
/// else is reported back to the caller as `None`.
pub fn parse_permission_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "allowed" => Some(true),
        "no" | "n" | "false" | "0" | "forbidden" | "not allowed" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("lecturer@university.edu"));
        assert!(!is_valid_email("mail"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+62 812-3456-7890"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("call me maybe"));
    }

    #[test]
    fn test_parse_permission_flag() {
        assert_eq!(parse_permission_flag("yes"), Some(true));
        assert_eq!(parse_permission_flag("ALLOWED"), Some(true));
        assert_eq!(parse_permission_flag(" 1 "), Some(true));
        assert_eq!(parse_permission_flag("no"), Some(false));
        assert_eq!(parse_permission_flag("Not Allowed"), Some(false));
        assert_eq!(parse_permission_flag("perhaps"), None);
    }
}

// Validation utilities module
// Provides custom validation functions for domain-specific rules

use regex::Regex;
use validator::ValidationError;

/// Parse a customer phone number for the configured region (Russia) into
/// canonical E.164 form.
///
/// Accepted shapes after stripping spaces, dashes and parentheses: an
/// optional `+7`, `7` or `8` prefix followed by exactly ten digits. The
/// national part is always emitted as `+7XXXXXXXXXX`.
fn parse_phone(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();

    let pattern = Regex::new(r"^(?:\+7|7|8)?(\d{10})$").expect("phone pattern is valid");
    let captures = pattern.captures(&cleaned)?;

    Some(format!("+7{}", &captures[1]))
}

/// Validates that a phone number is syntactically valid for the configured
/// region. Used by the `validator` derive on order submissions.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    match parse_phone(phone) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("invalid_phone")),
    }
}

/// Normalize a phone number to canonical E.164 form for persistence.
pub fn normalize_phone(raw: &str) -> Result<String, ValidationError> {
    parse_phone(raw).ok_or_else(|| ValidationError::new("invalid_phone"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_e164_input_unchanged() {
        assert_eq!(normalize_phone("+79031234567").unwrap(), "+79031234567");
    }

    #[test]
    fn normalizes_national_prefix_to_e164() {
        assert_eq!(normalize_phone("89031234567").unwrap(), "+79031234567");
        assert_eq!(normalize_phone("79031234567").unwrap(), "+79031234567");
    }

    #[test]
    fn strips_formatting_characters() {
        assert_eq!(
            normalize_phone("8 (903) 123-45-67").unwrap(),
            "+79031234567"
        );
    }

    #[test]
    fn accepts_bare_ten_digit_number() {
        assert_eq!(normalize_phone("9031234567").unwrap(), "+79031234567");
    }

    #[test]
    fn rejects_short_and_garbage_input() {
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("phone me").is_err());
        assert!(validate_phone("+7903123456").is_err());
        assert!(validate_phone("+790312345678").is_err());
    }

    #[test]
    fn rejects_foreign_country_codes() {
        assert!(validate_phone("+19031234567").is_err());
    }
}

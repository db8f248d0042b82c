use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Password recovery codes are exactly six digits
    /// - Valid: "123456", "000042"
    /// - Invalid: "12345", "1234567", "12a456", " 123456"
    pub static ref RECOVERY_CODE_REGEX: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

/// Rejects values made only of whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Trim an optional text field, collapsing blank values to `None`
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_code_regex_valid() {
        assert!(RECOVERY_CODE_REGEX.is_match("123456"));
        assert!(RECOVERY_CODE_REGEX.is_match("000042"));
    }

    #[test]
    fn test_recovery_code_regex_invalid() {
        assert!(!RECOVERY_CODE_REGEX.is_match("12345")); // too short
        assert!(!RECOVERY_CODE_REGEX.is_match("1234567")); // too long
        assert!(!RECOVERY_CODE_REGEX.is_match("12a456")); // letter
        assert!(!RECOVERY_CODE_REGEX.is_match(" 123456")); // whitespace
        assert!(!RECOVERY_CODE_REGEX.is_match(""));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Elétrica").is_ok());
        assert!(not_blank(" \t ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some(" ")), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("x ")), Some("x".to_string()));
    }
}

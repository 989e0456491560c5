/// Input validation utilities shared by request payloads
use validator::ValidationError;

/// Reject strings that are empty or whitespace-only.
///
/// Text fields are trimmed before persistence, so a blank string would
/// otherwise slip past a plain min-length rule.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank_accepts_text() {
        assert!(not_blank("Rust course").is_ok());
        assert!(not_blank("  padded  ").is_ok());
    }

    #[test]
    fn test_not_blank_rejects_empty_and_whitespace() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("\t\n").is_err());
    }
}

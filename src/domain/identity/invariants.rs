use super::entity::ParsedIdentity;
use crate::domain::{DomainError, DomainResult};

/// Checks that an identity is worth sending to the search service.
///
/// Placeholder names and identities without a surname are rejected.
pub fn validate_identity(identity: &ParsedIdentity) -> DomainResult<()> {
    if identity.skip {
        return Err(DomainError::InvariantViolation(format!(
            "'{}' is a placeholder name",
            identity.display
        )));
    }
    if identity.last.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "'{}' has no surname",
            identity.display
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_rejected() {
        let identity = ParsedIdentity::placeholder("TBA".to_string());
        assert!(validate_identity(&identity).is_err());
    }

    #[test]
    fn test_missing_surname_is_rejected() {
        let identity = ParsedIdentity::new(
            ", John".to_string(),
            "John".to_string(),
            "J".to_string(),
            String::new(),
        );
        assert!(validate_identity(&identity).is_err());
    }

    #[test]
    fn test_full_name_is_valid() {
        let identity = ParsedIdentity::new(
            "John Smith".to_string(),
            "John".to_string(),
            "J".to_string(),
            "Smith".to_string(),
        );
        assert!(validate_identity(&identity).is_ok());
    }
}

//! Input validation limits

/// Maximum length of a search query (80 chars)
pub const MAX_QUERY_LEN: usize = 80;

/// Maximum length of a storage namespace (64 chars)
pub const MAX_NAMESPACE_LEN: usize = 64;

/// Namespace used for snippet records when none is configured
pub const DEFAULT_NAMESPACE: &str = "snippets";

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingTitleOrContent,
    EmptyNamespace,
    NamespaceTooLong { len: usize, max: usize },
    InvalidNamespace(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitleOrContent => write!(f, "`title` and `content` are required"),
            Self::EmptyNamespace => write!(f, "Namespace cannot be empty"),
            Self::NamespaceTooLong { len, max } => {
                write!(f, "Namespace too long: {} chars (max {})", len, max)
            }
            Self::InvalidNamespace(name) => write!(
                f,
                "Invalid namespace '{}': only letters, digits, '_' and '-' are allowed",
                name
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a storage namespace (alphanumeric, underscores, hyphens only)
pub fn validate_namespace(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyNamespace);
    }
    let len = name.chars().count();
    if len > MAX_NAMESPACE_LEN {
        return Err(ValidationError::NamespaceTooLong {
            len,
            max: MAX_NAMESPACE_LEN,
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::InvalidNamespace(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace_is_valid() {
        assert!(validate_namespace(DEFAULT_NAMESPACE).is_ok());
    }

    #[test]
    fn test_namespace_rules() {
        assert_eq!(validate_namespace(""), Err(ValidationError::EmptyNamespace));
        assert!(validate_namespace("test_run-42").is_ok());
        assert!(matches!(
            validate_namespace("has:colon"),
            Err(ValidationError::InvalidNamespace(_))
        ));

        let long = "n".repeat(MAX_NAMESPACE_LEN + 1);
        assert_eq!(
            validate_namespace(&long),
            Err(ValidationError::NamespaceTooLong {
                len: MAX_NAMESPACE_LEN + 1,
                max: MAX_NAMESPACE_LEN
            })
        );
    }

    #[test]
    fn test_missing_fields_message() {
        assert_eq!(
            ValidationError::MissingTitleOrContent.to_string(),
            "`title` and `content` are required"
        );
    }
}

//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a path-like config value.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("DOCSNAP_TEST_SIMPLE", "content");
        }
        let result = expand_env("${DOCSNAP_TEST_SIMPLE}/docs", "docs.source_dir").unwrap();
        assert_eq!(result, "content/docs");
        unsafe {
            std::env::remove_var("DOCSNAP_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("DOCSNAP_TEST_UNSET");
        }
        let result = expand_env("${DOCSNAP_TEST_UNSET:-out}", "docs.artifact_dir").unwrap();
        assert_eq!(result, "out");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("DOCSNAP_TEST_MISSING");
        }
        let err = expand_env("${DOCSNAP_TEST_MISSING}", "docs.source_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCSNAP_TEST_MISSING"));
        assert!(err.to_string().contains("docs.source_dir"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("docs", "docs.source_dir").unwrap();
        assert_eq!(result, "docs");
    }
}

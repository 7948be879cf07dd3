//! Environment variable expansion for config strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("/docs/", "site.base_path").unwrap(), "/docs/");
    }

    #[test]
    fn test_expands_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_TEST_EXPAND_BASE", "/hello_vulkan/");
        }

        let value = expand_env("${DOCNAV_TEST_EXPAND_BASE}", "site.base_path").unwrap();

        assert_eq!(value, "/hello_vulkan/");

        unsafe {
            std::env::remove_var("DOCNAV_TEST_EXPAND_BASE");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_TEST_EXPAND_UNSET");
        }

        let value = expand_env("${DOCNAV_TEST_EXPAND_UNSET:-/}", "site.base_path").unwrap();

        assert_eq!(value, "/");
    }

    #[test]
    fn test_missing_variable_is_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_TEST_EXPAND_MISSING");
        }

        let err = expand_env("${DOCNAV_TEST_EXPAND_MISSING}", "site.title").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCNAV_TEST_EXPAND_MISSING"));
        assert!(err.to_string().contains("site.title"));
    }
}

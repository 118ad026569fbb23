//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key in the error message.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set ({})", err.var_name, err.cause),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("eng", "parse.language").unwrap(), "eng");
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WT_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${WT_EXPAND_UNSET:-docs}", "documents.dir").unwrap(),
            "docs"
        );
    }

    #[test]
    fn test_missing_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WT_EXPAND_MISSING");
        }
        let err = expand_env("${WT_EXPAND_MISSING}", "documents.dir").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("WT_EXPAND_MISSING"));
        assert!(message.contains("documents.dir"));
    }
}

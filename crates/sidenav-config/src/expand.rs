//! `${VAR}` references in path fields of `sidenav.toml`.
//!
//! - `${VAR}` - value of VAR, an error if unset
//! - `${VAR:-default}` - value of VAR if set, otherwise `default`
//!
//! Bare `$VAR` is left alone so paths containing `$` keep working.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// Expand a config field in place. Unset fields stay unset.
pub(crate) fn expand_field(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

/// Expand `${VAR}` references in one value of `field`.
fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(Cow::into_owned)
        .map_err(|e| {
            let message = match e.cause {
                VarError::NotPresent => format!("${{{}}} not set", e.var_name),
                VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", e.var_name),
            };
            ConfigError::EnvVar {
                field: field.to_owned(),
                message,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SIDENAV_SIMPLE_TEST", "docs");
        }
        let result = expand_env("${SIDENAV_SIMPLE_TEST}", "docs.source_dir").unwrap();
        assert_eq!(result, "docs");
        unsafe {
            std::env::remove_var("SIDENAV_SIMPLE_TEST");
        }
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SIDENAV_DEFAULT_TEST", "docs");
        }
        let result = expand_env("${SIDENAV_DEFAULT_TEST:-fallback}", "docs.source_dir").unwrap();
        assert_eq!(result, "docs");
        unsafe {
            std::env::remove_var("SIDENAV_DEFAULT_TEST");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SIDENAV_UNSET_TEST");
        }
        let result = expand_env("${SIDENAV_UNSET_TEST:-default}", "docs.source_dir").unwrap();
        assert_eq!(result, "default");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SIDENAV_MISSING_TEST");
        }
        let result = expand_env("${SIDENAV_MISSING_TEST}", "docs.source_dir");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SIDENAV_MISSING_TEST"));
        assert!(err.to_string().contains("docs.source_dir"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("literal string", "docs.source_dir").unwrap();
        assert_eq!(result, "literal string");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SIDENAV_HOST_TEST", "example.com");
        }
        let result = expand_env("${SIDENAV_HOST_TEST}/sidebars.json", "sidebars.file").unwrap();
        assert_eq!(result, "example.com/sidebars.json");
        unsafe {
            std::env::remove_var("SIDENAV_HOST_TEST");
        }
    }

    #[test]
    fn test_expand_multiple_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SIDENAV_SECTION_TEST", "guides");
            std::env::set_var("SIDENAV_PAGE_TEST", "ecs");
        }
        let result =
            expand_env("${SIDENAV_SECTION_TEST}/${SIDENAV_PAGE_TEST}", "docs.source_dir").unwrap();
        assert_eq!(result, "guides/ecs");
        unsafe {
            std::env::remove_var("SIDENAV_SECTION_TEST");
            std::env::remove_var("SIDENAV_PAGE_TEST");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        // $VAR without braces should not be expanded
        let result = expand_env("$VAR", "docs.source_dir").unwrap();
        assert_eq!(result, "$VAR");
    }

    #[test]
    fn test_expand_field_unset_stays_none() {
        let mut value = None;
        expand_field(&mut value, "sidebars.file").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_expand_field_in_place() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SIDENAV_FIELD_TEST", "website");
        }
        let mut value = Some("${SIDENAV_FIELD_TEST}/sidebars.yml".to_owned());
        expand_field(&mut value, "sidebars.file").unwrap();
        assert_eq!(value.as_deref(), Some("website/sidebars.yml"));
        unsafe {
            std::env::remove_var("SIDENAV_FIELD_TEST");
        }
    }

    #[test]
    fn test_path_with_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SIDENAV_DOCS_ROOT_TEST", "/srv/site");
        }
        let result = expand_env("${SIDENAV_DOCS_ROOT_TEST}/docs", "docs.source_dir").unwrap();
        assert_eq!(result, "/srv/site/docs");
        unsafe {
            std::env::remove_var("SIDENAV_DOCS_ROOT_TEST");
        }
    }
}

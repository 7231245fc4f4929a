//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a configuration value.
///
/// `${VAR}` errors if VAR is unset, `${VAR:-default}` falls back to the default.
/// Values without `${` are returned untouched, so a token such as `pa$word`
/// survives. Once a value contains `${`, bare `$VAR` references in it are
/// expanded too.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup_var) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(unset_var_error(field, &e.cause.0)),
    }
}

fn unset_var_error(field: &str, name: &str) -> ConfigError {
    ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{name}}} is not set; export it or write ${{{name}:-default}}"),
    }
}

/// Unset variable reported by [`lookup_var`].
struct UnsetVar(String);

fn lookup_var(name: &str) -> Result<Option<String>, UnsetVar> {
    std::env::var(name)
        .map(Some)
        .map_err(|_| UnsetVar(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCSYNC_TEST_TOKEN", "s3cret");
        }
        let result = expand_env("${DOCSYNC_TEST_TOKEN}", "confluence.token").unwrap();
        assert_eq!(result, "s3cret");
        unsafe {
            std::env::remove_var("DOCSYNC_TEST_TOKEN");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSYNC_UNSET_BRANCH");
        }
        let result =
            expand_env("${DOCSYNC_UNSET_BRANCH:-HEAD}", "repository.default_branch").unwrap();
        assert_eq!(result, "HEAD");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCSYNC_MISSING_VAR");
        }
        let err = expand_env("${DOCSYNC_MISSING_VAR}", "confluence.user").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in confluence.user: ${DOCSYNC_MISSING_VAR} is not set; \
             export it or write ${DOCSYNC_MISSING_VAR:-default}"
        );
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCSYNC_TEST_SITE", "acme");
        }
        let result = expand_env(
            "https://${DOCSYNC_TEST_SITE}.atlassian.net",
            "confluence.base_url",
        )
        .unwrap();
        assert_eq!(result, "https://acme.atlassian.net");
        unsafe {
            std::env::remove_var("DOCSYNC_TEST_SITE");
        }
    }

    #[test]
    fn test_bare_dollar_without_braces_not_expanded() {
        let result = expand_env("pa$word", "confluence.token").unwrap();
        assert_eq!(result, "pa$word");
    }

    #[test]
    fn test_bare_var_expanded_next_to_braced_one() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCSYNC_TEST_OWNER", "octocat");
            std::env::set_var("DOCSYNC_TEST_NAME", "hello");
        }
        let result = expand_env(
            "$DOCSYNC_TEST_OWNER/${DOCSYNC_TEST_NAME}",
            "repository.github_repository",
        )
        .unwrap();
        assert_eq!(result, "octocat/hello");
        unsafe {
            std::env::remove_var("DOCSYNC_TEST_OWNER");
            std::env::remove_var("DOCSYNC_TEST_NAME");
        }
    }
}

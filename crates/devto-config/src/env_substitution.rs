use devto_core::{DevtoError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;

// Matches ${VAR} and ${VAR:-default}
static ENV_VAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}").expect("Invalid regex pattern")
});

/// Substitute environment variables in a configuration string before it is
/// parsed. A reference without a default to a variable that is unset is an
/// error; `${VAR:-}` degrades to the empty string instead.
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = input.to_string();
    let mut missing_vars = Vec::new();

    for cap in ENV_VAR_REGEX.captures_iter(input) {
        let full_match = &cap[0];
        let var_name = &cap[1];
        let default_value = cap.get(2).map(|m| m.as_str());

        match env::var(var_name) {
            Ok(value) => {
                result = result.replace(full_match, &value);
            }
            Err(_) => match default_value {
                Some(default) => {
                    result = result.replace(full_match, default);
                }
                None => missing_vars.push(var_name.to_string()),
            },
        }
    }

    if !missing_vars.is_empty() {
        return Err(DevtoError::Config(format!(
            "Missing required environment variables: {}. Please set these variables before loading the configuration.",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_env_vars() {
        env::set_var("DEVTO_TEST_VAR", "test_value");

        let input = "key: ${DEVTO_TEST_VAR}\nother: ${DEVTO_TEST_NON_EXISTENT:-fallback}\n";
        let output = substitute_env_vars(input).unwrap();

        assert_eq!(output, "key: test_value\nother: fallback\n");

        env::remove_var("DEVTO_TEST_VAR");
    }

    #[test]
    fn test_missing_variable_without_default_fails() {
        let err = substitute_env_vars("key: ${DEVTO_TEST_DEFINITELY_UNSET}").unwrap_err();
        assert!(err.to_string().contains("DEVTO_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_empty_default_yields_empty_string() {
        let output = substitute_env_vars("key: '${DEVTO_TEST_ALSO_UNSET:-}'").unwrap();
        assert_eq!(output, "key: ''");
    }
}

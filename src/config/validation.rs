use regex::Regex;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// Expand `${VAR_NAME}` references using `lookup`. Unknown variables are left
/// untouched.
pub fn expand_env_var_in_string<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = value.to_string();

    for cap in env_var_pattern().captures_iter(value) {
        let var_name = &cap[1];
        if let Some(replacement) = lookup(var_name) {
            result = result.replace(&cap[0], &replacement);
        }
    }

    result
}

/// Check that an endpoint looks like an absolute http(s) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(format!(
            "Chat endpoint must start with http:// or https://, got '{}'",
            endpoint
        ))
    }
}

pub fn validate_delay_range(min_ms: u64, max_ms: u64) -> Result<(), String> {
    if min_ms > max_ms {
        Err(format!(
            "Canned delay range is inverted: min {}ms > max {}ms",
            min_ms, max_ms
        ))
    } else {
        Ok(())
    }
}

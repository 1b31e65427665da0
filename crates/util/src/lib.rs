//! Configuration, credential storage and small helpers shared by the
//! provadmin front ends.

pub mod keystore;
mod path_processing;
pub mod preferences;

pub use path_processing::*;

use once_cell::sync::Lazy;
use regex::Regex;

static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization: )([\w\-\.=:/+ ]+)",
        r#"(?i)("password"\s*:\s*)("[^"]*")"#,
        r"(?i)([A-Z0-9_]*?(KEY|TOKEN|SECRET|PASSWORD)=)([^\s]+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Redacts values that look like secrets in a string.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for regex in SENSITIVE_PATTERNS.iter() {
        redacted = regex
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_bearer_header() {
        let line = "authorization: Bearer abc.def-123";
        assert_eq!(redact_sensitive(line), "authorization: <redacted>");
    }

    #[test]
    fn redacts_password_in_json_body() {
        let body = r#"{"name":"Alpha","password":"hunter2"}"#;
        assert_eq!(redact_sensitive(body), r#"{"name":"Alpha","password":<redacted>}"#);
    }

    #[test]
    fn redacts_env_style_tokens() {
        assert_eq!(redact_sensitive("PROVADMIN_TOKEN=xyz rest"), "PROVADMIN_TOKEN=<redacted> rest");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(redact_sensitive("GET /api/admin/providers"), "GET /api/admin/providers");
    }
}

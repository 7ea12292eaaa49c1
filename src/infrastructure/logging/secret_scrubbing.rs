use std::sync::LazyLock;

use regex::{Captures, Regex};

// Bearer tokens in Authorization headers
static BEARER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[A-Za-z0-9\-_.=]+").expect("static pattern"));

// JWTs anywhere in a message (IAM access tokens are JWTs)
static JWT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"eyJ[A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+").expect("static pattern")
});

// Secret-bearing fields in JSON bodies and form data
static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(["']?(?:apikey|api_key|access_token|refresh_token|password)["']?\s*[:=]\s*)(?:"[^"]*"|'[^']*'|[^"'\s,&}]+)"#,
    )
    .expect("static pattern")
});

/// Scrubs credentials out of text before it is logged or embedded in errors
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = BEARER_PATTERN.replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed = JWT_PATTERN.replace_all(&scrubbed, "[TOKEN_REDACTED]");
        FIELD_PATTERN
            .replace_all(&scrubbed, |caps: &Captures| format!("{}[REDACTED]", &caps[1]))
            .into_owned()
    }
}

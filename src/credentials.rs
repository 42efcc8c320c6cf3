//! Credential storage format and resolution
//!
//! Credentials live in a line-oriented `NAME=VALUE` file next to the
//! configuration document. Values are stored in plain text; values containing
//! newlines are not supported.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Named secret values, keyed by credential name.
///
/// Sorted map so the serialized file is stable across saves.
pub type CredentialSet = BTreeMap<String, String>;

/// Credential name for the Gemini generative-text key.
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Credential name for the YouTube data key.
pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";

/// The credential names surfaced by the load path.
pub const KNOWN_CREDENTIALS: &[&str] = &[GEMINI_API_KEY, YOUTUBE_API_KEY];

/// Parse `NAME=VALUE` lines into a credential set.
///
/// Lines without a `=` (including blank lines) are skipped. The value is
/// everything after the first `=`, unmodified.
pub fn parse_env_lines(content: &str) -> CredentialSet {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

/// Serialize a credential set back to `NAME=VALUE` lines, one per line,
/// sorted by name.
pub fn serialize_env_lines(credentials: &CredentialSet) -> String {
    let mut out = String::new();
    for (name, value) in credentials {
        out.push_str(name);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Source of the generative-text API key consulted by the prompt generator.
///
/// Injected explicitly rather than read from process-global environment so
/// tests can substitute a fake.
pub trait CredentialSource: Send + Sync {
    /// The Gemini API key, or `None` when not configured.
    fn generative_key(&self) -> Option<String>;
}

/// File-backed credential source.
///
/// Re-reads the env file on every lookup so a save that just rewrote the
/// file is picked up without restarting the service.
pub struct EnvFileCredentials {
    path: PathBuf,
}

impl EnvFileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for EnvFileCredentials {
    fn generative_key(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        parse_env_lines(&content).remove(GEMINI_API_KEY)
    }
}

//! Prompt generation pipeline
//!
//! Turns a style name into a short Suno-ready song description. The happy
//! path asks Gemini; every failure (missing key, network error, provider
//! error, empty response) collapses into a deterministic fallback string so
//! the caller always gets usable text. Results are clamped to 200 characters.

use std::sync::Arc;

use crate::credentials::CredentialSource;
use crate::providers::GeminiProvider;

/// Hard upper bound on generated prompt length, in characters.
pub const MAX_PROMPT_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

const CURATOR_INSTRUCTION: &str = "You are a professional music curator for Suno AI. \
    Write a high-quality, concise song description including instruments, mood, and tempo. \
    The output must be optimized for Suno AI and strictly under 200 characters.";

/// Outcome of a generation attempt.
///
/// The transport only ever sees the text, but the tag keeps the
/// failure-absorption policy observable in tests and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedPrompt {
    /// Text produced by the provider, trimmed and clamped.
    Generated(String),
    /// Deterministic placeholder derived only from the style name.
    Fallback(String),
}

impl GeneratedPrompt {
    pub fn into_text(self) -> String {
        match self {
            GeneratedPrompt::Generated(text) | GeneratedPrompt::Fallback(text) => text,
        }
    }
}

pub struct PromptGenerator {
    provider: GeminiProvider,
    credentials: Arc<dyn CredentialSource>,
}

impl PromptGenerator {
    pub fn new(provider: GeminiProvider, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            provider,
            credentials,
        }
    }

    /// Generate a prompt for the given style.
    ///
    /// Never errors; always returns non-empty text of at most
    /// [`MAX_PROMPT_CHARS`] characters.
    pub async fn generate(&self, style: &str) -> GeneratedPrompt {
        let Some(api_key) = self
            .credentials
            .generative_key()
            .filter(|key| !key.is_empty())
        else {
            tracing::warn!("Gemini API key not configured, using fallback prompt");
            return fallback(style);
        };

        let instruction = compose_instruction(style);
        match self.provider.generate_text(&api_key, &instruction).await {
            Ok(text) => {
                let clamped = clamp_prompt(&text);
                if clamped.is_empty() {
                    tracing::warn!(style, "provider returned empty text, using fallback prompt");
                    fallback(style)
                } else {
                    GeneratedPrompt::Generated(clamped)
                }
            }
            Err(err) => {
                tracing::warn!(style, error = %err, "prompt generation failed, using fallback prompt");
                fallback(style)
            }
        }
    }
}

/// Fallback outcome, clamped so the length bound holds even for absurdly
/// long style names.
fn fallback(style: &str) -> GeneratedPrompt {
    GeneratedPrompt::Fallback(clamp_prompt(&fallback_prompt(style)))
}

/// The full instruction sent to the provider: fixed curator briefing plus
/// the per-style request.
fn compose_instruction(style: &str) -> String {
    format!(
        "{CURATOR_INSTRUCTION}\n\nWrite a prompt for a song in this style: '{style}'. \
         Make it unique and catchy."
    )
}

/// The deterministic placeholder used whenever generation fails.
fn fallback_prompt(style: &str) -> String {
    format!("A {style} song with high quality production.")
}

/// Trim surrounding whitespace and enforce the 200-character bound.
///
/// Over-length text keeps its first 197 characters and gains a 3-character
/// ellipsis, for exactly 200.
fn clamp_prompt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_PROMPT_CHARS {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(MAX_PROMPT_CHARS - ELLIPSIS.len()).collect();
    format!("{head}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoKey;
    impl crate::credentials::CredentialSource for NoKey {
        fn generative_key(&self) -> Option<String> {
            None
        }
    }

    struct EmptyKey;
    impl crate::credentials::CredentialSource for EmptyKey {
        fn generative_key(&self) -> Option<String> {
            Some(String::new())
        }
    }

    struct FixedKey;
    impl crate::credentials::CredentialSource for FixedKey {
        fn generative_key(&self) -> Option<String> {
            Some("test-key".to_string())
        }
    }

    #[tokio::test]
    async fn missing_key_yields_exact_fallback() {
        let generator =
            PromptGenerator::new(GeminiProvider::new("gemini-1.5-flash"), Arc::new(NoKey));
        let prompt = generator.generate("Cha3bi").await;
        assert_eq!(
            prompt,
            GeneratedPrompt::Fallback("A Cha3bi song with high quality production.".to_string())
        );
    }

    #[tokio::test]
    async fn blank_key_counts_as_missing() {
        let generator =
            PromptGenerator::new(GeminiProvider::new("gemini-1.5-flash"), Arc::new(EmptyKey));
        let prompt = generator.generate("Calm song").await;
        assert!(matches!(prompt, GeneratedPrompt::Fallback(_)));
    }

    #[tokio::test]
    async fn provider_failure_yields_fallback_not_error() {
        // Port 1 is never listening, so the single attempt fails fast.
        let provider =
            GeminiProvider::with_base_url("gemini-1.5-flash", "http://127.0.0.1:1/v1beta");
        let generator = PromptGenerator::new(provider, Arc::new(FixedKey));
        let prompt = generator.generate("Hot music").await;
        assert_eq!(
            prompt.into_text(),
            "A Hot music song with high quality production."
        );
    }

    #[tokio::test]
    async fn fallback_respects_length_bound_even_for_long_styles() {
        let generator =
            PromptGenerator::new(GeminiProvider::new("gemini-1.5-flash"), Arc::new(NoKey));
        let style = "ambient ".repeat(60);
        let text = generator.generate(&style).await.into_text();
        assert!(!text.is_empty());
        assert!(text.chars().count() <= MAX_PROMPT_CHARS);
    }

    #[test]
    fn instruction_embeds_style_and_briefing() {
        let instruction = compose_instruction("Violin + Cha3bi");
        assert!(instruction.contains("professional music curator for Suno AI"));
        assert!(instruction.contains("'Violin + Cha3bi'"));
        assert!(instruction.contains("unique and catchy"));
    }

    #[test]
    fn clamp_trims_whitespace() {
        assert_eq!(clamp_prompt("  upbeat jazz trio  \n"), "upbeat jazz trio");
    }

    #[test]
    fn clamp_leaves_exactly_200_chars_alone() {
        let text = "x".repeat(200);
        assert_eq!(clamp_prompt(&text), text);
    }

    #[test]
    fn clamp_truncates_to_197_plus_ellipsis() {
        let text = "y".repeat(250);
        let clamped = clamp_prompt(&text);
        assert_eq!(clamped.chars().count(), 200);
        assert_eq!(clamped[..197], "y".repeat(197));
        assert!(clamped.ends_with("..."));
    }

    #[test]
    fn clamp_counts_characters_not_bytes() {
        // Multi-byte characters must not be split.
        let text = "é".repeat(300);
        let clamped = clamp_prompt(&text);
        assert_eq!(clamped.chars().count(), 200);
        assert!(clamped.ends_with("..."));
    }
}

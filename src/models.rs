//! Data models and structures
//!
//! Defines the card content, the image locator, per-request generation
//! status, and environment configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const INITIAL_QUOTE: &str =
    "The older you get, the more you realize peace is the real Christmas gift.";
pub const INITIAL_CAPTION: &str =
    "Forget the noise. If your heart feels calmer this year, you already won.";
pub const INITIAL_IMAGE_URL: &str = "https://images.unsplash.com/photo-1543589077-47d81606c1bf?q=80&w=2787&auto=format&fit=crop";

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Quote/caption pair shown on the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    pub quote: String,
    pub caption: String,
}

impl CardContent {
    pub fn new(quote: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            caption: caption.into(),
        }
    }

    /// Text placed on the clipboard by "copy text".
    pub fn share_text(&self) -> String {
        format!("{}\n\n{}", self.quote, self.caption)
    }
}

impl Default for CardContent {
    fn default() -> Self {
        Self::new(INITIAL_QUOTE, INITIAL_CAPTION)
    }
}

/// Locator for the displayed image: either a remote URL or a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Wrap a base64 JPEG payload as a data URL.
    pub fn from_base64_jpeg(payload: &str) -> Self {
        Self(format!("data:image/jpeg;base64,{}", payload))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl Default for ImageReference {
    fn default() -> Self {
        Self::new(INITIAL_IMAGE_URL)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which half of the card a generation request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Scope {
    All,
    Text,
    Image,
}

impl Scope {
    pub fn includes_text(self) -> bool {
        matches!(self, Scope::All | Scope::Text)
    }

    pub fn includes_image(self) -> bool {
        matches!(self, Scope::All | Scope::Image)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str("all"),
            Scope::Text => f.write_str("text"),
            Scope::Image => f.write_str("image"),
        }
    }
}

/// Lifecycle of one sub-request (text or image).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// Everything the display needs to render a card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardState {
    pub content: CardContent,
    pub image: ImageReference,
    pub text_status: RequestStatus,
    pub image_status: RequestStatus,
    pub error_message: Option<String>,
}

impl CardState {
    pub fn text_loading(&self) -> bool {
        self.text_status.is_pending()
    }

    pub fn image_loading(&self) -> bool {
        self.image_status.is_pending()
    }

    /// True while any generation is in flight.
    pub fn is_busy(&self) -> bool {
        self.text_loading() || self.image_loading()
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
    pub gemini_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    ///
    /// A missing API key is not an error here: the orchestrator reports it
    /// on the first generation request instead. A `.env` that exists but
    /// cannot be read or parsed is.
    pub fn from_env() -> crate::Result<Self> {
        check_dotenv(dotenvy::dotenv())?;
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            text_model: non_empty("TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: non_empty("IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            gemini_base_url: non_empty("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        }
    }
}

/// No `.env` at all is fine; anything else dotenvy reports is not.
fn check_dotenv<T>(loaded: std::result::Result<T, dotenvy::Error>) -> crate::Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_card_content_deserializes_from_model_json() {
        let content: CardContent =
            serde_json::from_str(r#"{"quote":"Stillness is a gift.","caption":"Breathe."}"#)
                .unwrap();
        assert_eq!(content, CardContent::new("Stillness is a gift.", "Breathe."));
    }

    #[test]
    fn test_card_content_rejects_missing_caption() {
        let result: Result<CardContent, _> = serde_json::from_str(r#"{"quote":"Only half"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_share_text_joins_with_blank_line() {
        let content = CardContent::new("Q", "C");
        assert_eq!(content.share_text(), "Q\n\nC");
    }

    #[test]
    fn test_image_reference_data_url() {
        let image = ImageReference::from_base64_jpeg("AAAA");
        assert_eq!(image.as_str(), "data:image/jpeg;base64,AAAA");
        assert!(image.is_data_url());
        assert!(!ImageReference::default().is_data_url());
    }

    #[test]
    fn test_scope_coverage() {
        assert!(Scope::All.includes_text() && Scope::All.includes_image());
        assert!(Scope::Text.includes_text() && !Scope::Text.includes_image());
        assert!(!Scope::Image.includes_text() && Scope::Image.includes_image());
    }

    #[test]
    fn test_initial_state_uses_fallbacks() {
        let state = CardState::default();
        assert_eq!(state.content.quote, INITIAL_QUOTE);
        assert_eq!(state.image.as_str(), INITIAL_IMAGE_URL);
        assert!(!state.is_busy());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_loading_flags_are_independent() {
        let state = CardState {
            text_status: RequestStatus::Pending,
            image_status: RequestStatus::Failed("boom".to_string()),
            ..CardState::default()
        };
        assert!(state.text_loading());
        assert!(!state.image_loading());
        assert!(state.is_busy());
    }

    #[test]
    fn test_config_defaults_without_env() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert!(config.api_key.is_none());
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
    }

    #[test]
    fn test_config_falls_back_to_api_key() {
        let config = Config::from_lookup(lookup_from(&[("API_KEY", "legacy")]));
        assert_eq!(config.api_key.as_deref(), Some("legacy"));

        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "primary"),
            ("API_KEY", "legacy"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_config_treats_blank_key_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TEXT_MODEL", "gemini-3-flash-preview"),
            ("IMAGE_MODEL", "models/gemini-3-pro-image"),
            ("GEMINI_BASE_URL", "http://localhost:8080/"),
        ]));
        assert_eq!(config.text_model, "gemini-3-flash-preview");
        assert_eq!(config.image_model, "models/gemini-3-pro-image");
        assert_eq!(config.gemini_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_dotenv_is_not_an_error() {
        let loaded = dotenvy::from_filename("serenity-cards-no-such-file.env");
        assert!(check_dotenv(loaded).is_ok());
    }

    #[test]
    fn test_malformed_dotenv_is_an_error() {
        let loaded = dotenvy::from_read("SERENITY_CARDS_BROKEN=\"unterminated".as_bytes());
        assert!(matches!(check_dotenv(loaded), Err(crate::Error::EnvVar(_))));
    }
}

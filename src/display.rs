//! Terminal rendering of the card plus the copy/save actions.

use crate::clipboard::Clipboard;
use crate::models::{CardContent, CardState, ImageReference};
use crate::Result;

pub const TITLE: &str = "Serenity Cards";
pub const TAGLINE: &str = "The older you get, the more you realize peace is the gift. \
Generate reflective holiday thoughts and imagery to share the calm.";
pub const MOOD_PROMPT: &str = "What is your heart feeling?";
pub const LOADING_PLACEHOLDER: &str = "Conjuring holiday magic...";
pub const COPIED_MESSAGE: &str = "Text copied to clipboard!";
pub const SAVE_HINT: &str =
    "To save the card, please take a screenshot or long-press the image on mobile.";

const DEFAULT_WIDTH: usize = 56;
const DATA_URL_PREVIEW_CHARS: usize = 16;

pub struct DisplaySurface {
    width: usize,
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            width: width.max(16),
        }
    }

    pub fn render(&self, state: &CardState) -> String {
        let rule = "-".repeat(self.width);
        let text_width = self.width - 2;
        let mut lines = Vec::new();

        lines.push(format!(".{}", rule));
        if state.image_loading() {
            lines.push(format!("| [ {} ]", LOADING_PLACEHOLDER));
        } else {
            lines.push(format!("| [ {} ]", describe_image(&state.image)));
        }
        lines.push(format!("|{}", rule));

        let quote = format!("\"{}\"", state.content.quote);
        for line in wrap(&quote, text_width) {
            lines.push(format!("| {}", line));
        }
        lines.push("|".to_string());
        for line in wrap(&state.content.caption.to_uppercase(), text_width) {
            lines.push(format!("|  {}", line));
        }
        lines.push(format!("'{}", rule));

        if let Some(error) = &state.error_message {
            lines.push(format!("! {}", error));
        }

        lines.join("\n")
    }

    /// Place the card text on the clipboard; returns the confirmation message.
    pub async fn copy_text(
        &self,
        content: &CardContent,
        clipboard: &dyn Clipboard,
    ) -> Result<&'static str> {
        clipboard.set_text(&content.share_text()).await?;
        Ok(COPIED_MESSAGE)
    }

    /// Advisory only; nothing is written to disk.
    pub fn save_hint(&self) -> &'static str {
        SAVE_HINT
    }

    /// Title and tagline shown when a session opens.
    pub fn banner(&self) -> String {
        let mut lines = vec![TITLE.to_string(), String::new()];
        lines.extend(wrap(TAGLINE, self.width));
        lines.join("\n")
    }

    pub fn footer(&self, text_model: &str, image_model: &str) -> String {
        format!("Powered by Google Gemini ({} & {})", text_model, image_model)
    }
}

impl Default for DisplaySurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Data URLs are far too long for a terminal; show a short preview instead.
fn describe_image(image: &ImageReference) -> String {
    if !image.is_data_url() {
        return image.to_string();
    }

    let locator = image.as_str();
    let (header, payload) = locator.split_once(',').unwrap_or((locator, ""));
    let preview: String = payload.chars().take(DATA_URL_PREVIEW_CHARS).collect();
    format!(
        "{},{}... ({} base64 chars)",
        header,
        preview,
        payload.len()
    )
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

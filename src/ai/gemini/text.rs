use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::TextGenerationService;
use crate::models::CardContent;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct QuoteRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: QuoteGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteGenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// Schema forcing the model to answer with `{ "quote": ..., "caption": ... }`.
fn card_content_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "quote": {
                "type": "STRING",
                "description": prompts::QUOTE_FIELD_DESCRIPTION,
            },
            "caption": {
                "type": "STRING",
                "description": prompts::CAPTION_FIELD_DESCRIPTION,
            },
        },
        "required": ["quote", "caption"],
    })
}

pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(30),
                client,
            ),
        }
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    /// All text parts of the first candidate joined; JSON may arrive split.
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let text: String = response
            .first_parts()
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    fn parse_card_content(text: &str) -> Result<CardContent> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::AiProvider(format!("Malformed quote JSON: {}", e)))?;
        if !value.is_object() {
            return Err(Error::AiProvider(
                "Quote JSON is not an object with quote and caption".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| Error::AiProvider(format!("Malformed quote JSON: {}", e)))
    }
}

super::impl_with_gemini_base_url!(GeminiTextClient);

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    async fn generate_quote(&self, mood: &str) -> Result<CardContent> {
        let request = QuoteRequest {
            contents: vec![Content::user_text(prompts::render(
                prompts::QUOTE_USER,
                &[("mood", mood)],
            ))],
            generation_config: QuoteGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: card_content_schema(),
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let text = Self::extract_text(&response).ok_or_else(|| {
            Error::AiProvider(format!(
                "No text in Gemini quote response (finish reason: {})",
                response.finish_reason()
            ))
        })?;

        Self::parse_card_content(&text).inspect_err(|e| {
            tracing::error!("Gemini quote is not a quote/caption object: {}", e);
        })
    }
}

use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::ImageGenerationService;
use crate::models::ImageReference;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Matches the 4:5 frame of the rendered card.
const CARD_ASPECT_RATIO: &str = "4:5";

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn extract_inline_image(response: &GenerateContentResponse) -> Option<&InlineData> {
        response.first_parts().iter().find_map(|p| match p {
            Part::InlineData { inline_data } if !inline_data.data.is_empty() => Some(inline_data),
            _ => None,
        })
    }
}

super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(&self, mood: &str) -> Result<ImageReference> {
        let request = ImageRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::Text {
                    text: prompts::render(prompts::IMAGE, &[("mood", mood)]),
                }],
            }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: Some(ImageConfig {
                    aspect_ratio: CARD_ASPECT_RATIO.to_string(),
                }),
            },
        };

        let gemini_response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let image_data = Self::extract_inline_image(&gemini_response)
            .ok_or_else(|| {
                Error::AiProvider(format!(
                    "No image data in Gemini response (finish reason: {})",
                    gemini_response.finish_reason()
                ))
            })?;

        tracing::debug!(
            "Gemini returned image with mime_type: {} ({} base64 chars)",
            image_data.mime_type,
            image_data.data.len()
        );

        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD
            .decode(&image_data.data)
            .map_err(|e| {
                Error::AiProvider(format!("Failed to decode Gemini base64 image: {}", e))
            })?;

        Ok(ImageReference::from_base64_jpeg(&image_data.data))
    }
}

//! AI service integration for quote and image generation
//!
//! Each capability sits behind its own trait so the orchestrator can be
//! driven by Gemini in production and by the mocks in tests.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiImageClient, GeminiTextClient};
pub use mock::{MockImageClient, MockTextClient};

use crate::models::{CardContent, ImageReference};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Produce a quote/caption pair for the given mood.
    async fn generate_quote(&self, mood: &str) -> Result<CardContent>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Produce an image locator for the given mood.
    async fn generate_image(&self, mood: &str) -> Result<ImageReference>;
}

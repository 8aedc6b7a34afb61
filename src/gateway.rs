//! Generation gateway: the two request functions the orchestrator calls.
//!
//! Wraps the text and image services and folds every provider failure into
//! the matching domain error, so callers only ever see
//! [`Error::TextGeneration`] or [`Error::ImageGeneration`].

use crate::ai::{ImageGenerationService, TextGenerationService};
use crate::models::{CardContent, ImageReference};
use crate::{Error, Result};
use tracing::{error, info};

pub struct Gateway {
    text: Box<dyn TextGenerationService>,
    image: Box<dyn ImageGenerationService>,
}

impl Gateway {
    pub fn new(
        text: Box<dyn TextGenerationService>,
        image: Box<dyn ImageGenerationService>,
    ) -> Self {
        Self { text, image }
    }

    pub async fn request_quote(&self, mood: &str) -> Result<CardContent> {
        info!("Requesting quote for mood '{}'", mood);
        self.text.generate_quote(mood).await.map_err(|e| {
            error!("Text generation error: {}", e);
            Error::TextGeneration(e.to_string())
        })
    }

    pub async fn request_image(&self, mood: &str) -> Result<ImageReference> {
        info!("Requesting image for mood '{}'", mood);
        self.image.generate_image(mood).await.map_err(|e| {
            error!("Image generation error: {}", e);
            Error::ImageGeneration(e.to_string())
        })
    }
}

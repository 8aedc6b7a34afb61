use super::{ImageGenerationService, TextGenerationService};
use crate::models::{CardContent, ImageReference};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted reply: either a value or a provider failure message.
type Scripted<T> = std::result::Result<T, String>;

#[derive(Clone)]
struct Script<T> {
    responses: Arc<Mutex<Vec<Scripted<T>>>>,
    moods: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            moods: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    fn push(&self, reply: Scripted<T>) {
        self.responses.lock().unwrap().push(reply);
    }

    fn call_count(&self) -> usize {
        self.moods.lock().unwrap().len()
    }

    fn moods(&self) -> Vec<String> {
        self.moods.lock().unwrap().clone()
    }

    /// Record the call, wait out the configured delay, then reply.
    async fn next(&self, mood: &str, default: impl FnOnce(&str) -> T) -> Result<T> {
        let index = {
            let mut moods = self.moods.lock().unwrap();
            moods.push(mood.to_string());
            moods.len() - 1
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = {
            let responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                None
            } else {
                Some(responses[index % responses.len()].clone())
            }
        };

        match reply {
            None => Ok(default(mood)),
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(Error::AiProvider(message)),
        }
    }
}

#[derive(Clone)]
pub struct MockTextClient {
    script: Script<CardContent>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    pub fn with_quote_response(self, content: CardContent) -> Self {
        self.script.push(Ok(content));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.push(Err(message.into()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.script.delay = Some(delay);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.script.call_count()
    }

    pub fn get_moods(&self) -> Vec<String> {
        self.script.moods()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_quote(&self, mood: &str) -> Result<CardContent> {
        self.script
            .next(mood, |mood| {
                CardContent::new(
                    format!("In {}, the quiet finds us.", mood),
                    format!("{} and nothing else.", mood),
                )
            })
            .await
    }
}

#[derive(Clone)]
pub struct MockImageClient {
    script: Script<ImageReference>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    pub fn with_image_response(self, image: ImageReference) -> Self {
        self.script.push(Ok(image));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.push(Err(message.into()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.script.delay = Some(delay);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.script.call_count()
    }

    pub fn get_moods(&self) -> Vec<String> {
        self.script.moods()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, mood: &str) -> Result<ImageReference> {
        // Tiny JPEG header, base64 encoded
        self.script
            .next(mood, |_| ImageReference::from_base64_jpeg("/9j/4A=="))
            .await
    }
}

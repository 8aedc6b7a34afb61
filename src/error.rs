//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Missing API credential: {0}")]
    MissingCredential(String),

    #[error("Text generation failed: {0}")]
    TextGeneration(String),

    #[error("Image generation failed: {0}")]
    ImageGeneration(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// The single message shown to the user when this error reaches the card.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::MissingCredential(_) => "API Key is missing. Please check your configuration.",
            Error::TextGeneration(_) => "Failed to generate words of wisdom.",
            Error::ImageGeneration(_) => "Failed to conjure a new vision.",
            _ => "An unexpected error occurred.",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Serenity Cards - reflective holiday cards from a single mood
//!
//! The user describes a mood (or picks a preset); Gemini writes a short
//! quote and caption and paints a matching photograph, and both are shown
//! together as a card in the terminal.

pub mod ai;
pub mod app;
pub mod clipboard;
pub mod display;
pub mod error;
pub mod gateway;
pub mod input;
pub mod models;
pub mod orchestrator;
pub mod prompts;

pub use error::{Error, Result};

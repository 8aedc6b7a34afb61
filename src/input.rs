//! Mood input with quick-select presets.

use crate::models::Scope;
use crate::{Error, Result};

pub const PRESETS: [&str; 5] = [
    "Snowy Silence",
    "Childhood Nostalgia",
    "Winter Solstice",
    "Family Chaos",
    "Grateful Heart",
];

/// A validated request ready for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub mood: String,
    pub scope: Scope,
}

#[derive(Debug, Clone, Default)]
pub struct InputSurface {
    mood: String,
    active_preset: Option<usize>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn active_preset(&self) -> Option<&'static str> {
        self.active_preset.map(|i| PRESETS[i])
    }

    /// Free-text edit: replaces the mood and clears the preset selection.
    pub fn type_mood(&mut self, text: impl Into<String>) {
        self.mood = text.into();
        self.active_preset = None;
    }

    /// Select a preset by 1-based number or case-insensitive label.
    pub fn select_preset(&mut self, selector: &str) -> Result<&'static str> {
        let selector = selector.trim();
        let index = match selector.parse::<usize>() {
            Ok(n) if (1..=PRESETS.len()).contains(&n) => Some(n - 1),
            Ok(_) => None,
            Err(_) => PRESETS
                .iter()
                .position(|p| p.eq_ignore_ascii_case(selector)),
        }
        .ok_or_else(|| Error::InvalidInput(format!("Unknown preset '{}'", selector)))?;

        self.mood = PRESETS[index].to_string();
        self.active_preset = Some(index);
        Ok(PRESETS[index])
    }

    /// Whether the trigger actions are enabled.
    pub fn can_trigger(&self, busy: bool) -> bool {
        !busy && !self.mood.trim().is_empty()
    }

    pub fn trigger(&self, scope: Scope, busy: bool) -> Option<Trigger> {
        self.can_trigger(busy).then(|| Trigger {
            mood: self.mood.clone(),
            scope,
        })
    }
}

//! Application wiring: input, orchestrator, and display in one session.

use crate::ai::{GeminiImageClient, GeminiTextClient};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::display::{DisplaySurface, MOOD_PROMPT};
use crate::gateway::Gateway;
use crate::input::{InputSurface, PRESETS};
use crate::models::{CardState, Config, Scope};
use crate::orchestrator::Orchestrator;
use crate::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

const HELP: &str = "\
Type a mood and press enter, or use a command:
  /presets            list the preset moods
  /preset <N|name>    pick a preset
  /all                new words and a new image
  /text               new words only
  /image              new image only
  /copy               copy quote and caption to the clipboard
  /save               how to keep the card
  /show               show the current card
  /help               this message
  /quit               leave";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mood(String),
    Presets,
    Preset(String),
    Generate(Scope),
    Copy,
    Save,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let Some(rest) = line.trim().strip_prefix('/') else {
            return Some(Command::Mood(line.to_string()));
        };

        let (name, arg) = rest.split_once(' ').unwrap_or((rest, ""));
        let command = match name {
            "presets" => Command::Presets,
            "preset" => Command::Preset(arg.trim().to_string()),
            "all" => Command::Generate(Scope::All),
            "text" => Command::Generate(Scope::Text),
            "image" => Command::Generate(Scope::Image),
            "copy" => Command::Copy,
            "save" => Command::Save,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    /// `None` when no API credential is configured.
    pub gateway: Option<Gateway>,
    pub clipboard: Box<dyn Clipboard>,
}

pub struct App {
    orchestrator: Arc<Orchestrator>,
    input: InputSurface,
    display: DisplaySurface,
    clipboard: Box<dyn Clipboard>,
    footer: String,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, display: DisplaySurface, footer: String) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(services.gateway)),
            input: InputSurface::new(),
            display,
            clipboard: services.clipboard,
            footer,
        }
    }

    /// Construct an app talking to Gemini with the given configuration.
    pub fn new(config: &Config) -> Self {
        let display = DisplaySurface::new();
        let footer = display.footer(&config.text_model, &config.image_model);

        let gateway = match &config.api_key {
            Some(api_key) => {
                // Reuse one HTTP connection pool across both clients.
                let http_client = reqwest::Client::new();
                info!(
                    "Text model: {}, image model: {}",
                    config.text_model, config.image_model
                );

                let text = GeminiTextClient::new_with_client(
                    api_key.clone(),
                    config.text_model.clone(),
                    http_client.clone(),
                )
                .with_base_url(config.gemini_base_url.clone());
                let image = GeminiImageClient::new_with_client(
                    api_key.clone(),
                    config.image_model.clone(),
                    http_client,
                )
                .with_base_url(config.gemini_base_url.clone());

                Some(Gateway::new(Box::new(text), Box::new(image)))
            }
            None => {
                warn!("No GEMINI_API_KEY or API_KEY set; generation is disabled");
                None
            }
        };

        Self::with_services(
            AppServices {
                gateway,
                clipboard: Box::new(SystemClipboard::new()),
            },
            display,
            footer,
        )
    }

    pub fn input_mut(&mut self) -> &mut InputSurface {
        &mut self.input
    }

    pub fn state(&self) -> CardState {
        self.orchestrator.snapshot()
    }

    /// Fire a generation for the current mood and stream the card to `out`:
    /// once with the loading state, once when every sub-request has settled.
    ///
    /// Returns `false` without doing anything when the trigger is disabled.
    pub async fn trigger<W: AsyncWrite + Unpin>(
        &mut self,
        scope: Scope,
        out: &mut W,
    ) -> Result<bool> {
        let Some(trigger) = self.input.trigger(scope, self.orchestrator.is_busy()) else {
            emit(out, "Type a mood or pick a preset first.").await?;
            return Ok(false);
        };

        let mut rx = self.orchestrator.subscribe();
        let mut handle = self.orchestrator.spawn_generate(trigger.mood, trigger.scope);

        let finished = tokio::select! {
            joined = &mut handle => Some(joined),
            _ = async { rx.wait_for(|s| s.is_busy()).await.map(|_| ()) } => None,
        };

        let joined = match finished {
            Some(joined) => joined,
            None => {
                emit(out, &self.display.render(&self.orchestrator.snapshot())).await?;
                handle.await
            }
        };
        if let Err(e) = joined {
            warn!("Generation task did not finish cleanly: {}", e);
        }

        emit(out, &self.display.render(&self.orchestrator.snapshot())).await?;
        Ok(true)
    }

    pub async fn copy_text<W: AsyncWrite + Unpin>(&self, out: &mut W) -> Result<()> {
        let content = self.orchestrator.snapshot().content;
        match self.display.copy_text(&content, self.clipboard.as_ref()).await {
            Ok(message) => emit(out, message).await,
            Err(e) => {
                warn!("Copy failed: {}", e);
                emit(out, &format!("Could not copy text: {}", e)).await
            }
        }
    }

    /// Generate once for the current mood, optionally copying the result.
    pub async fn run_once<W: AsyncWrite + Unpin>(
        &mut self,
        scope: Scope,
        copy: bool,
        out: &mut W,
    ) -> Result<()> {
        if self.trigger(scope, out).await? && copy {
            self.copy_text(out).await?;
        }
        emit(out, &self.footer).await
    }

    /// Line-driven session over `reader`, writing everything to `out`.
    pub async fn run_interactive<R, W>(&mut self, reader: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        emit(out, &self.display.banner()).await?;
        emit(out, &self.display.render(&self.orchestrator.snapshot())).await?;
        emit(out, MOOD_PROMPT).await?;
        emit(out, HELP).await?;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(command) = Command::parse(&line) else {
                continue;
            };

            match command {
                Command::Mood(mood) => {
                    self.input.type_mood(mood);
                    emit(out, &format!("Mood: {}", self.input.mood())).await?;
                }
                Command::Presets => {
                    let listing: Vec<String> = PRESETS
                        .iter()
                        .enumerate()
                        .map(|(i, p)| {
                            let marker = if self.input.active_preset() == Some(*p) {
                                "*"
                            } else {
                                " "
                            };
                            format!("{} {}. {}", marker, i + 1, p)
                        })
                        .collect();
                    emit(out, &listing.join("\n")).await?;
                }
                Command::Preset(selector) => match self.input.select_preset(&selector) {
                    Ok(preset) => emit(out, &format!("Mood: {}", preset)).await?,
                    Err(e) => emit(out, &e.to_string()).await?,
                },
                Command::Generate(scope) => {
                    self.trigger(scope, out).await?;
                }
                Command::Copy => self.copy_text(out).await?,
                Command::Save => emit(out, self.display.save_hint()).await?,
                Command::Show => {
                    emit(out, &self.display.render(&self.orchestrator.snapshot())).await?
                }
                Command::Help => emit(out, HELP).await?,
                Command::Quit => break,
                Command::Unknown(name) => {
                    emit(out, &format!("Unknown command '/{}'. Try /help.", name)).await?
                }
            }
        }

        emit(out, &self.footer).await
    }
}

async fn emit<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

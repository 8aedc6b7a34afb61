//! Clipboard access for the "copy text" action.

use crate::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn set_text(&self, text: &str) -> Result<()>;
}

/// Pipes text into the first clipboard tool found on the system.
pub struct SystemClipboard {
    commands: Vec<(&'static str, Vec<&'static str>)>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            // Wayland first, then X11, then macOS
            commands: vec![
                ("wl-copy", vec![]),
                ("xclip", vec!["-selection", "clipboard"]),
                ("xsel", vec!["--clipboard", "--input"]),
                ("pbcopy", vec![]),
            ],
        }
    }

    async fn pipe_into(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        Ok(child.wait().await?.success())
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn set_text(&self, text: &str) -> Result<()> {
        for (program, args) in &self.commands {
            match Self::pipe_into(program, args, text).await {
                Ok(true) => {
                    tracing::debug!("Copied {} chars via {}", text.len(), program);
                    return Ok(());
                }
                Ok(false) => tracing::warn!("{} exited with failure", program),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => tracing::warn!("Failed to run {}: {}", program, e),
            }
        }

        Err(Error::Clipboard(
            "No clipboard tool available (install wl-copy, xclip or xsel)".to_string(),
        ))
    }
}

#[derive(Clone, Default)]
pub struct MockClipboard {
    contents: Arc<Mutex<Option<String>>>,
    fail: bool,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn get_contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn set_text(&self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Clipboard("mock clipboard unavailable".to_string()));
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

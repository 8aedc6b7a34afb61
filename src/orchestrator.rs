//! Request orchestration for the card.
//!
//! The orchestrator owns the only mutable copy of [`CardState`] and publishes
//! every change through a `watch` channel. A request for [`Scope::All`] drives
//! the text and image sub-requests as two joined futures: each one writes its
//! own result into the state the moment it lands, so a slow image never holds
//! back a finished quote (and a failed one never discards the other's result).

use crate::gateway::Gateway;
use crate::models::{CardState, RequestStatus, Scope};
use crate::Error;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub struct Orchestrator {
    gateway: Option<Gateway>,
    state: watch::Sender<CardState>,
}

impl Orchestrator {
    /// Build an orchestrator. `None` means no API credential is configured;
    /// every request then fails fast without touching the network.
    pub fn new(gateway: Option<Gateway>) -> Self {
        Self {
            gateway,
            state: watch::Sender::new(CardState::default()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.gateway.is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<CardState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CardState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    /// Run one request cycle for `scope` and return once every sub-request
    /// has settled. Failures are recorded in the state, never returned.
    pub async fn generate(&self, mood: &str, scope: Scope) {
        let mood = mood.trim();
        if mood.is_empty() {
            debug!("Ignoring {} request with empty mood", scope);
            return;
        }

        self.state.send_modify(|s| s.error_message = None);

        let Some(gateway) = self.gateway.as_ref() else {
            let err = Error::MissingCredential("GEMINI_API_KEY is not set".to_string());
            warn!("{}", err);
            self.record_error(&err);
            return;
        };

        info!("Generating {} for mood '{}'", scope, mood);

        match scope {
            Scope::Text => self.run_text(gateway, mood).await,
            Scope::Image => self.run_image(gateway, mood).await,
            Scope::All => {
                tokio::join!(self.run_text(gateway, mood), self.run_image(gateway, mood));
            }
        }
    }

    /// Run a request cycle in the background.
    ///
    /// If the cycle dies without settling (a panic inside a service), the
    /// unexpected-failure message is shown and both loading flags are reset.
    pub fn spawn_generate(self: &Arc<Self>, mood: String, scope: Scope) -> JoinHandle<()> {
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            let worker = Arc::clone(&orchestrator);
            let outcome = tokio::spawn(async move { worker.generate(&mood, scope).await }).await;

            if let Err(e) = outcome {
                let err = Error::Unexpected(e.to_string());
                error!("Generation task failed: {}", err);
                orchestrator.state.send_modify(|s| {
                    s.error_message = Some(err.user_message().to_string());
                    if s.text_status.is_pending() {
                        s.text_status = RequestStatus::Failed(err.to_string());
                    }
                    if s.image_status.is_pending() {
                        s.image_status = RequestStatus::Failed(err.to_string());
                    }
                });
            }
        })
    }

    async fn run_text(&self, gateway: &Gateway, mood: &str) {
        self.state
            .send_modify(|s| s.text_status = RequestStatus::Pending);

        match gateway.request_quote(mood).await {
            Ok(content) => {
                info!("Quote updated");
                self.state.send_modify(|s| {
                    s.content = content;
                    s.text_status = RequestStatus::Succeeded;
                });
            }
            Err(e) => {
                self.state
                    .send_modify(|s| s.text_status = RequestStatus::Failed(e.to_string()));
                self.record_error(&e);
            }
        }
    }

    async fn run_image(&self, gateway: &Gateway, mood: &str) {
        self.state
            .send_modify(|s| s.image_status = RequestStatus::Pending);

        match gateway.request_image(mood).await {
            Ok(image) => {
                info!("Image updated");
                self.state.send_modify(|s| {
                    s.image = image;
                    s.image_status = RequestStatus::Succeeded;
                });
            }
            Err(e) => {
                self.state
                    .send_modify(|s| s.image_status = RequestStatus::Failed(e.to_string()));
                self.record_error(&e);
            }
        }
    }

    // Last failure to land wins.
    fn record_error(&self, err: &Error) {
        self.state
            .send_modify(|s| s.error_message = Some(err.user_message().to_string()));
    }
}

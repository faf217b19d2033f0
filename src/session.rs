//! Session orchestration: conversation state, provider dispatch, and the
//! connection state machine.
//!
//! The orchestrator owns the transcript and connection state. Provider
//! calls run on spawned worker tasks and report back through
//! [`UiDispatch`]; the UI loop feeds those events into
//! [`SessionOrchestrator::apply`], which is the only place shared state is
//! mutated. That single-writer rule is the system's principal invariant:
//! appended messages land in UI-post order, and no locks are needed around
//! the transcript.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{ProviderKind, SessionConfig};
use crate::dispatch::{UiDispatch, UiEvent};
use crate::error::SolaceError;
use crate::models::{Message, MessageRole, Transcript};
use crate::provider::ProviderClient;
use crate::render::Renderer;

/// Display name for assistant messages.
pub const COMPANION_NAME: &str = "Solace";

/// Display name for user messages.
pub const USER_NAME: &str = "You";

/// Synthetic one-off user message used to elicit the opening reply.
const GREETING_PROBE: &str = "Hello";

/// Connection lifecycle of a session.
///
/// `Error` is terminal until the next explicit connect attempt re-enters
/// `Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Owns the conversation and sequences provider calls against it.
pub struct SessionOrchestrator {
    transcript: Transcript,
    config: Option<SessionConfig>,
    state: ConnectionState,
    client: Arc<ProviderClient>,
    dispatch: UiDispatch,
    /// Receiver half of the UI bridge; taken by the UI loop on startup
    event_rx: Option<mpsc::UnboundedReceiver<UiEvent>>,
}

impl SessionOrchestrator {
    /// Create an orchestrator backed by the default provider client.
    pub fn new() -> Self {
        Self::with_client(Arc::new(ProviderClient::new()))
    }

    /// Create an orchestrator with a custom provider client (tests point
    /// this at a mock server).
    pub fn with_client(client: Arc<ProviderClient>) -> Self {
        let (dispatch, event_rx) = UiDispatch::channel();
        Self {
            transcript: Transcript::new(),
            config: None,
            state: ConnectionState::Disconnected,
            client,
            dispatch,
            event_rx: Some(event_rx),
        }
    }

    /// Handle for posting onto the same UI bridge (shared with the
    /// breathing timer so all UI updates drain through one loop).
    pub fn dispatch(&self) -> UiDispatch {
        self.dispatch.clone()
    }

    /// Take the receiver half of the UI bridge. The caller becomes the UI
    /// loop and must feed received events back into [`Self::apply`].
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<UiEvent>> {
        self.event_rx.take()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Begin connecting with the given provider and credential.
    ///
    /// Fixes the session config, enters `Connecting`, and spawns a worker
    /// to run the credential health check. The outcome arrives as a
    /// [`UiEvent::ConnectionChecked`]. The user-entered key is used for
    /// both backends.
    pub fn connect(&mut self, provider: ProviderKind, api_key: &str) -> Result<(), SolaceError> {
        let key = api_key.trim();
        if key.is_empty() {
            return Err(SolaceError::CredentialMissing);
        }

        let config = SessionConfig::new(provider, key.to_string());
        self.config = Some(config.clone());
        self.state = ConnectionState::Connecting;
        tracing::info!("connecting to {}", provider.label());

        let client = Arc::clone(&self.client);
        let dispatch = self.dispatch.clone();
        tokio::spawn(async move {
            let result = match client.health_check(&config).await {
                Ok(true) => Ok(()),
                Ok(false) => Err(SolaceError::HealthCheckFailed {
                    message: format!("invalid {} API key", config.provider.label()),
                }
                .to_string()),
                Err(e) => Err(SolaceError::HealthCheckFailed {
                    message: e.to_string(),
                }
                .to_string()),
            };
            dispatch.post(UiEvent::ConnectionChecked { result });
        });

        Ok(())
    }

    /// Submit one user turn.
    ///
    /// Appends the user message synchronously on the caller's thread, then
    /// schedules one worker to fetch the reply against a snapshot of the
    /// transcript. Input that trims to empty is silently ignored, mirroring
    /// the front-end's placeholder clearing. Overlapping sends are not
    /// serialized or cancelled; each spawns its own worker.
    pub fn send(&mut self, text: &str) -> Result<(), SolaceError> {
        if self.state != ConnectionState::Connected {
            return Err(SolaceError::NotConnected);
        }

        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        self.transcript.push(Message::user(text));
        self.spawn_completion(self.transcript.snapshot());
        Ok(())
    }

    /// Elicit the opening assistant message.
    ///
    /// Runs the same pipeline as [`Self::send`] with a synthetic user
    /// greeting that is never appended; only the assistant's reply is
    /// recorded.
    pub fn send_greeting(&mut self) -> Result<(), SolaceError> {
        if self.state != ConnectionState::Connected {
            return Err(SolaceError::NotConnected);
        }

        self.spawn_completion(vec![Message::user(GREETING_PROBE)]);
        Ok(())
    }

    fn spawn_completion(&self, snapshot: Vec<Message>) {
        // send/send_greeting gate on Connected, which implies a config.
        let Some(config) = self.config.clone() else {
            return;
        };

        let client = Arc::clone(&self.client);
        let dispatch = self.dispatch.clone();
        tokio::spawn(async move {
            dispatch.post(UiEvent::ThinkingStarted);
            let result = client
                .complete(&config, &snapshot)
                .await
                .map_err(|e| e.to_string());
            dispatch.post(UiEvent::CompletionFinished { result });
        });
    }

    /// Apply one posted event on the UI loop.
    ///
    /// This is the sole mutation point for the transcript and connection
    /// state, so append order always matches UI-post order even when sends
    /// overlap.
    pub fn apply(&mut self, event: UiEvent, renderer: &mut dyn Renderer) {
        match event {
            UiEvent::ThinkingStarted => {
                renderer.show_thinking();
            }
            UiEvent::CompletionFinished { result } => {
                renderer.hide_thinking();
                match result {
                    Ok(reply) => {
                        renderer.render_message(MessageRole::Assistant, COMPANION_NAME, &reply);
                        self.transcript.push(Message::assistant(reply));
                    }
                    Err(message) => {
                        // Failed turn: the user's message stays recorded so
                        // the exchange can be retried; no assistant turn.
                        tracing::warn!("completion failed: {message}");
                        renderer.render_message(
                            MessageRole::Assistant,
                            COMPANION_NAME,
                            &format!("Something went wrong: {message}"),
                        );
                    }
                }
            }
            UiEvent::ConnectionChecked { result } => match result {
                Ok(()) => {
                    self.state = ConnectionState::Connected;
                    tracing::info!("connected");
                }
                Err(message) => {
                    self.state = ConnectionState::Error;
                    tracing::warn!("health check failed: {message}");
                    renderer.render_message(
                        MessageRole::Assistant,
                        COMPANION_NAME,
                        &format!("Connection failed: {message}"),
                    );
                }
            },
            UiEvent::BreathingFrame { label, scale } => {
                renderer.render_breathing_frame(&label, scale);
            }
        }
    }
}

impl Default for SessionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

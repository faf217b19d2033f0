//! Prelude module for convenient imports.
//!
//! Re-exports the types most callers need:
//!
//! ```ignore
//! use solace::prelude::*;
//! ```

pub use crate::breathing::{BreathingPhase, BreathingTimer, BOX_BREATHING};
pub use crate::config::{ProviderKind, SessionConfig, QUICK_PROMPTS, SYSTEM_PROMPT};
pub use crate::dispatch::{UiDispatch, UiEvent};
pub use crate::error::SolaceError;
pub use crate::models::{Message, MessageRole, Transcript};
pub use crate::provider::{ProviderClient, ProviderError};
pub use crate::render::Renderer;
pub use crate::session::{ConnectionState, SessionOrchestrator, COMPANION_NAME, USER_NAME};

//! Conversation data types shared across the session core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Wire name used by the chat-completions API.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single turn in the conversation transcript.
///
/// Immutable once created. Role alternation is not enforced; consecutive
/// same-role messages are legal (e.g. an injected greeting reply).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Who produced this turn
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only, ordered transcript of the conversation.
///
/// Owned exclusively by the session orchestrator; workers only ever see
/// defensive copies taken via [`Transcript::snapshot`], so an in-flight
/// provider call never observes a concurrent mutation from a later send.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Messages are never removed or reordered.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Take a defensive copy of the full transcript for a provider call.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// All messages in transcript order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recently appended message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("hello");
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.content, "hello");

        let assistant = Message::assistant("hi there");
        assert_eq!(assistant.role, MessageRole::Assistant);
        assert_eq!(assistant.content, "hi there");
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_transcript_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("first"));
        transcript.push(Message::assistant("second"));
        transcript.push(Message::user("third"));

        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().content, "third");
    }

    #[test]
    fn test_transcript_allows_consecutive_same_role() {
        let mut transcript = Transcript::new();
        transcript.push(Message::assistant("greeting"));
        transcript.push(Message::assistant("follow-up"));
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_appends() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("before"));

        let snapshot = transcript.snapshot();
        transcript.push(Message::user("after"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].content, "before");
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_role_serde_roundtrip() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let role: MessageRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, MessageRole::User);
    }
}

//! Chat transcript for one session.
//!
//! Each accepted question appends exactly two messages: the user's text as
//! typed, then the placeholder answer. Blank input is dropped without a
//! notice, unlike the idea and feedback panels.

use serde::Serialize;
use tracing::debug;

use super::answer::placeholder_answer;
use super::reference::Reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Append-only list of chat messages.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a question and its placeholder answer.
    ///
    /// Returns `false` (and changes nothing) for blank input.
    pub fn submit(&mut self, input: &str, reference: Option<Reference>) -> bool {
        if input.trim().is_empty() {
            return false;
        }

        let answer = placeholder_answer(input, reference);
        self.messages.push(ChatMessage { role: ChatRole::User, content: input.to_owned() });
        self.messages.push(ChatMessage { role: ChatRole::Assistant, content: answer });
        debug!(messages = self.messages.len(), reference = ?reference, "chat turn recorded");
        true
    }

    /// Messages in submission order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

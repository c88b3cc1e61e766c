//! # Chat Messages
//!
//! A message is an author plus text. Messages are created once and never
//! edited; the transcript only grows, so list order is chronological order.

use std::fmt;

/// Greeting posted by the bot once a document has been submitted.
pub const GREETING: &str = "Ask me now";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    /// The person at the keyboard
    Me,
    /// The placeholder assistant
    Bot,
}

impl Author {
    pub fn label(&self) -> &'static str {
        match self {
            Author::Me => "Me",
            Author::Bot => "Bot",
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Author::Me)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
}

impl ChatMessage {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
        }
    }

    pub fn me(text: impl Into<String>) -> Self {
        Self::new(Author::Me, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text)
    }
}

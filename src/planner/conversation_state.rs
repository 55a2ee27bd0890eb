use std::fmt;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Local>,
}

/// Append-only log of the chat, one entry per message.
#[derive(Default)]
pub struct ConversationState {
    messages: Vec<Turn>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user_message(&mut self, message: &str) {
        self.push(Role::User, message);
    }

    pub fn add_assistant_message(&mut self, message: &str) {
        self.push(Role::Assistant, message);
    }

    fn push(&mut self, role: Role, message: &str) {
        self.messages.push(Turn {
            role,
            content: message.to_string(),
            at: Local::now(),
        });
    }

    pub fn get_messages(&self) -> &[Turn] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Local>,
}

pub const WELCOME: &str = "Hi! I'm your AI Traffic Assistant. How can I help you today?";

/// Append-only conversation log for one chat session.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript that opens with the assistant's welcome line.
    pub fn with_welcome() -> Self {
        let mut transcript = Self::new();
        transcript.push(Sender::Bot, WELCOME);
        transcript
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(ChatMessage {
            id,
            text: text.into(),
            sender,
            sent_at: Local::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Record the user's line and the assistant's answer to it.
    pub fn exchange(&mut self, utterance: &str) -> String {
        self.push(Sender::User, utterance);
        let reply = super::respond(utterance);
        self.push(Sender::Bot, reply.clone());
        reply
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

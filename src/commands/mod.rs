pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::chat::Transcript;
use crate::map::MapSession;
pub use dispatcher::{CommandDispatcher, create_chat_registry, create_map_registry};

/// Lets the shared `/quit` command end any interactive session.
pub trait SessionControl {
    fn stop(&mut self);
    fn should_continue(&self) -> bool;
}

pub struct MapState {
    pub session: MapSession,
    pub should_continue: bool,
}

impl MapState {
    pub fn new(session: MapSession) -> Self {
        Self {
            session,
            should_continue: true,
        }
    }
}

impl SessionControl for MapState {
    fn stop(&mut self) {
        self.should_continue = false;
    }

    fn should_continue(&self) -> bool {
        self.should_continue
    }
}

pub struct ChatState {
    pub transcript: Transcript,
    pub should_continue: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::with_welcome(),
            should_continue: true,
        }
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionControl for ChatState {
    fn stop(&mut self) {
        self.should_continue = false;
    }

    fn should_continue(&self) -> bool {
        self.should_continue
    }
}

use super::{
    ChatState, MapState,
    handler::{
        AddPointCommand, ClearCommand, HELP_LINE, HelpCommand, HistoryCommand, PointsCommand, QuitCommand,
        RefreshCommand, RemovePointCommand, RouteCommand, SearchCommand,
    },
    registry::CommandRegistry,
};
use crate::core::error::TmapError;
use std::sync::Arc;

pub struct CommandDispatcher<S: Send> {
    registry: Arc<CommandRegistry<S>>,
}

impl<S: Send> Clone for CommandDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<S: Send> CommandDispatcher<S> {
    pub fn new(registry: Arc<CommandRegistry<S>>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        command: &str,
        args: &[&str],
        state: &mut S,
    ) -> Result<Option<String>, TmapError> {
        self.registry.execute(command, args, state).await
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

/// Registers `/help` last so it can list everything before it.
fn finish<S: Send + super::SessionControl + 'static>(
    mut registry: CommandRegistry<S>,
) -> CommandDispatcher<S> {
    registry.register("quit", QuitCommand);

    let mut lines = registry.help_lines();
    lines.push(HELP_LINE);
    registry.register("help", HelpCommand::new(lines));

    CommandDispatcher::new(Arc::new(registry))
}

pub fn create_map_registry() -> CommandDispatcher<MapState> {
    let mut registry = CommandRegistry::new();

    registry.register("search", SearchCommand);
    registry.register("add", AddPointCommand);
    registry.register("remove", RemovePointCommand);
    registry.register("clear", ClearCommand);
    registry.register("points", PointsCommand);
    registry.register("route", RouteCommand);
    registry.register("refresh", RefreshCommand);

    finish(registry)
}

pub fn create_chat_registry() -> CommandDispatcher<ChatState> {
    let mut registry = CommandRegistry::new();

    registry.register("history", HistoryCommand);

    finish(registry)
}

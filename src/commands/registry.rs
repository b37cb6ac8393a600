use crate::commands::handler::CommandHandler;
use crate::core::error::TmapError;
use std::collections::HashMap;
use std::sync::Arc;

pub struct CommandRegistry<S: Send> {
    handlers: HashMap<String, Arc<dyn CommandHandler<S>>>,
    order: Vec<String>,
}

impl<S: Send> CommandRegistry<S> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register<C: CommandHandler<S> + 'static>(&mut self, name: &str, command: C) {
        if self
            .handlers
            .insert(name.to_string(), Arc::new(command))
            .is_none()
        {
            self.order.push(name.to_string());
        }
    }

    pub async fn execute(
        &self,
        name: &str,
        args: &[&str],
        state: &mut S,
    ) -> Result<Option<String>, TmapError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| TmapError::Input(format!("Unknown command: /{}", name)))?;
        handler.execute(state, args).await
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Help lines in registration order.
    pub fn help_lines(&self) -> Vec<&'static str> {
        self.order
            .iter()
            .filter_map(|name| self.handlers.get(name))
            .map(|handler| handler.help())
            .collect()
    }
}

impl<S: Send> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

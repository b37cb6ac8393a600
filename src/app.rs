use crate::chat::{self, Transcript};
use crate::cli::parser::{Args, Command};
use crate::commands::{
    ChatState, CommandDispatcher, MapState, SessionControl, create_chat_registry,
    create_map_registry,
};
use crate::config::Config;
use crate::core::error::TmapError;
use crate::display;
use crate::input;
use crate::map::MapSession;
use crate::providers::factory::ProviderFactory;
use crate::route::Route;
use console::style;
use is_terminal::IsTerminal;
use std::io::{self, Read};

pub struct Application {
    pub args: Args,
    pub config: Config,
    pub factory: ProviderFactory,
}

impl Application {
    pub fn new(args: Args, config: Config) -> Self {
        Self {
            args,
            config,
            factory: ProviderFactory::new(),
        }
    }

    pub async fn run(&mut self) -> Result<(), TmapError> {
        match &self.args.command {
            Command::Route { start, destination } => {
                let (start, destination) = (start.clone(), destination.clone());
                self.handle_route_mode(&start, &destination).await
            }
            Command::Map => self.handle_map_mode().await,
            Command::Chat => self.handle_chat_mode().await,
            Command::Ask { message } => {
                let message = message.clone();
                self.handle_ask_mode(message)
            }
        }
    }

    fn create_session(&self) -> Result<MapSession, TmapError> {
        let geocoder = self.factory.create_geocoder(&self.config)?;
        let router = self.factory.create_router(&self.config)?;
        Ok(MapSession::new(
            geocoder,
            router,
            self.config.geocoder.delay(),
        ))
    }

    async fn handle_route_mode(&self, start: &str, destination: &str) -> Result<(), TmapError> {
        let mut session = self.create_session()?;

        println!("{}", style(format!("Searching for {} and {}...", start, destination)).dim());
        let route = plan_route(&mut session, start, destination).await?;
        println!("{}", display::render_points(session.surface().points()));
        println!("{}", display::render_route(&route));
        Ok(())
    }

    async fn handle_map_mode(&self) -> Result<(), TmapError> {
        let dispatcher = create_map_registry();
        let mut state = MapState::new(self.create_session()?);

        display::display_banner(
            "Map session",
            "Try '/search Eiffel Tower | Louvre' or '/add 48.85 2.29'. Type '/help' for commands, Ctrl+D or /quit to exit.",
        );

        let mut editor = input::create_editor(dispatcher.clone())?;

        while state.should_continue() {
            // Results that arrived while the prompt was up.
            let applied = state.session.poll_routes();
            if applied > 0 {
                tracing::debug!(
                    applied,
                    generation = state.session.surface().generation(),
                    "route results committed"
                );
                println!("{}", display::render_route_status(state.session.surface()));
            }

            let line = match input::read_input(&mut editor, "map")? {
                Some(line) => line.trim().to_string(),
                None => break,
            };
            if line.is_empty() {
                continue;
            }

            let output = if let Some(command_line) = line.strip_prefix('/') {
                run_command(&dispatcher, command_line, &mut state).await
            } else if line.contains('|') {
                // Bare "start | destination" is a search.
                run_command(&dispatcher, &format!("search {}", line), &mut state).await
            } else {
                Some(
                    style("Commands start with '/'. Type /help to list them.")
                        .dim()
                        .to_string(),
                )
            };

            if let Some(output) = output {
                println!("{}", output);
            }
        }

        input::save_history(&mut editor)?;
        Ok(())
    }

    async fn handle_chat_mode(&self) -> Result<(), TmapError> {
        let dispatcher = create_chat_registry();
        let mut state = ChatState::new();

        display::display_banner(
            "Traffic assistant",
            "Ask about traffic, routes, parking or the weather. Type '/help' for commands, Ctrl+D or /quit to exit.",
        );
        display::display_reply(chat::WELCOME);

        let mut editor = input::create_editor(dispatcher.clone())?;

        while state.should_continue() {
            let line = match input::read_input(&mut editor, "chat")? {
                Some(line) => line.trim().to_string(),
                None => break,
            };
            if line.is_empty() {
                continue;
            }

            if let Some(command_line) = line.strip_prefix('/') {
                if let Some(output) = run_command(&dispatcher, command_line, &mut state).await {
                    println!("{}", output);
                }
                continue;
            }

            let reply = state.transcript.exchange(&line);
            display::display_reply(&reply);
        }

        input::save_history(&mut editor)?;
        Ok(())
    }

    fn handle_ask_mode(&self, message: Option<String>) -> Result<(), TmapError> {
        let piped = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| TmapError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        let question = match (message, piped) {
            (Some(arg), Some(stdin)) => format!("{}\n{}", arg, stdin.trim()),
            (Some(arg), None) => arg,
            (None, Some(stdin)) => stdin.trim().to_string(),
            (None, None) => return Err(TmapError::Input("No question provided".to_string())),
        };

        let mut transcript = Transcript::new();
        let reply = transcript.exchange(&question);
        tracing::debug!(category = ?chat::classify(&question), "answered one-shot question");
        display::display_reply(&reply);
        Ok(())
    }
}

/// Search both places and wait for the route between them.
///
/// A failed search prints the same short message the map session shows before the error is returned.
async fn plan_route(
    session: &mut MapSession,
    start: &str,
    destination: &str,
) -> Result<Route, TmapError> {
    if let Err(err) = session.search(start, destination).await {
        if let Some(message) = session.surface().search_error() {
            display::display_error(message);
        }
        return Err(err);
    }

    session.settle().await;
    match session.surface().route() {
        Some(route) => Ok(route.clone()),
        None => Err(TmapError::RouteUnavailable(
            session
                .surface()
                .route_error()
                .unwrap_or("no route returned")
                .to_string(),
        )),
    }
}

/// Split `name arg arg...` and run it, turning command errors into printable text.
async fn run_command<S: Send>(
    dispatcher: &CommandDispatcher<S>,
    command_line: &str,
    state: &mut S,
) -> Option<String> {
    let parts: Vec<&str> = command_line.split_whitespace().collect();
    let (command, args) = parts.split_first()?;

    match dispatcher.execute(command, args, state).await {
        Ok(output) => output,
        Err(e) => Some(display::render_error(&e.to_string())),
    }
}

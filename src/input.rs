use crate::commands::CommandDispatcher;
use crate::config::Config;
use crate::core::error::TmapError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{Highlighter, MatchingBracketHighlighter};
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Context, EditMode, Editor, Helper};
use std::borrow::Cow;

/// Completes `/command` names against the session's registry.
pub struct CommandCompleter<S: Send> {
    dispatcher: CommandDispatcher<S>,
}

impl<S: Send> CommandCompleter<S> {
    pub fn new(dispatcher: CommandDispatcher<S>) -> Self {
        Self { dispatcher }
    }

    fn candidates(&self, prefix: &str) -> Vec<Pair> {
        let mut names = self.dispatcher.get_command_names();
        names.sort();
        names
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: format!("/{}", name),
                replacement: name,
            })
            .collect()
    }
}

impl<S: Send> Completer for CommandCompleter<S> {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if pos == 0 || !line.starts_with('/') {
            return Ok((pos, Vec::new()));
        }

        let typed = &line[1..pos];
        // Only the command word completes; arguments are free text.
        if typed.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((1, self.candidates(typed)))
    }
}

pub struct InputHelper<S: Send> {
    completer: CommandCompleter<S>,
    highlighter: MatchingBracketHighlighter,
    hinter: HistoryHinter,
}

impl<S: Send> InputHelper<S> {
    pub fn new(dispatcher: CommandDispatcher<S>) -> Self {
        Self {
            completer: CommandCompleter::new(dispatcher),
            highlighter: MatchingBracketHighlighter::new(),
            hinter: HistoryHinter {},
        }
    }
}

impl<S: Send> Helper for InputHelper<S> {}

impl<S: Send> Completer for InputHelper<S> {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl<S: Send> Hinter for InputHelper<S> {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl<S: Send> Highlighter for InputHelper<S> {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(style(hint).dim().to_string())
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }
}

impl<S: Send> Validator for InputHelper<S> {}

pub type LineEditor<S> = Editor<InputHelper<S>, FileHistory>;

/// Creates a line editor that completes the commands of `dispatcher`.
pub fn create_editor<S: Send>(dispatcher: CommandDispatcher<S>) -> Result<LineEditor<S>, TmapError> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| TmapError::Input(format!("Failed to create line editor: {}", e)))?;
    editor.set_helper(Some(InputHelper::new(dispatcher)));

    // A missing history file is normal on first run.
    if let Err(e) = editor.load_history(&Config::history_path()) {
        tracing::debug!(error = %e, "no input history loaded");
    }

    Ok(editor)
}

/// Reads one line. `None` means the user asked to leave (Ctrl-C or Ctrl-D).
pub fn read_input<S: Send>(
    editor: &mut LineEditor<S>,
    prompt: &str,
) -> Result<Option<String>, TmapError> {
    let prompt = if cfg!(windows) && std::env::var("PSModulePath").is_ok() {
        format!("{}> ", prompt)
    } else {
        style(format!("{}> ", prompt)).bold().cyan().to_string()
    };

    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor
                    .add_history_entry(line.as_str())
                    .map_err(|e| TmapError::Input(format!("Failed to add history entry: {}", e)))?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Exiting...");
            Ok(None)
        }
        Err(err) => Err(TmapError::Input(format!("Input error: {}", err))),
    }
}

pub fn save_history<S: Send>(editor: &mut LineEditor<S>) -> Result<(), TmapError> {
    let history_path = Config::history_path();

    if let Some(parent) = history_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    editor
        .save_history(&history_path)
        .map_err(|e| TmapError::Input(format!("Failed to save history: {}", e)))
}

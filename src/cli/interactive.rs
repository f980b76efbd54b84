//! Session command language for interactive use
//!
//! Each stdin line is one command. Mutating commands re-render the view.

use crate::app::models::{FilterToken, QualityFilter};
use crate::app::services::session::SessionState;

pub const HELP_TEXT: &str = "\
Commands:
  search <text>    set the free-text search (empty text clears it)
  clear            clear the free-text search
  toggle <filter>  toggle a quick filter: wifi, quiet, power, coffee
  pin              pin the current search as a filter
  unpin <phrase>   remove a pinned search
  filters          list active filters
  show             render the current view
  help             show this help
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Clear,
    Toggle(String),
    Pin,
    Unpin(String),
    Filters,
    Show,
    Help,
    Quit,
}

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Render,
    Message(String),
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Errors are user-facing messages.
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "search" | "s" => Ok(SessionCommand::Search(rest.to_string())),
            "clear" => Ok(SessionCommand::Clear),
            "toggle" | "t" if !rest.is_empty() => Ok(SessionCommand::Toggle(rest.to_string())),
            "toggle" | "t" => Err("Usage: toggle <wifi|quiet|power|coffee>".to_string()),
            "pin" => Ok(SessionCommand::Pin),
            "unpin" if !rest.is_empty() => Ok(SessionCommand::Unpin(rest.to_string())),
            "unpin" => Err("Usage: unpin <phrase>".to_string()),
            "filters" => Ok(SessionCommand::Filters),
            "show" | "" => Ok(SessionCommand::Show),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help' for commands.", other)),
        }
    }

    pub fn apply(self, session: &mut SessionState) -> CommandOutcome {
        match self {
            SessionCommand::Search(text) => {
                session.set_search_term(&text);
                CommandOutcome::Render
            }
            SessionCommand::Clear => {
                session.clear_search();
                CommandOutcome::Render
            }
            SessionCommand::Toggle(name) => match FilterToken::parse(&name) {
                FilterToken::Unrecognized(_) => CommandOutcome::Message(format!(
                    "Unknown filter '{}'. Available: {}",
                    name,
                    available_filters()
                )),
                token => {
                    session.toggle_token(token);
                    CommandOutcome::Render
                }
            },
            SessionCommand::Pin => match session.pin_search() {
                Some(_) => CommandOutcome::Render,
                None => CommandOutcome::Message("Nothing to pin: search is empty".to_string()),
            },
            SessionCommand::Unpin(phrase) => {
                if session.unpin(&phrase) {
                    CommandOutcome::Render
                } else {
                    CommandOutcome::Message(format!("No pinned search '{}'", phrase))
                }
            }
            SessionCommand::Filters => CommandOutcome::Message(describe_filters(session)),
            SessionCommand::Show => CommandOutcome::Render,
            SessionCommand::Help => CommandOutcome::Message(HELP_TEXT.to_string()),
            SessionCommand::Quit => CommandOutcome::Quit,
        }
    }
}

fn available_filters() -> String {
    QualityFilter::ALL
        .iter()
        .map(QualityFilter::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary of search and active filters
pub fn describe_filters(session: &SessionState) -> String {
    let tokens: Vec<String> = session
        .active_filters()
        .iter()
        .map(ToString::to_string)
        .collect();
    let filters = if tokens.is_empty() {
        "none".to_string()
    } else {
        tokens.join(", ")
    };
    format!(
        "Search: {:?} | Filters: {}",
        session.search_input(),
        filters
    )
}

// REPL line parser for the watch dashboard

use client_application::{Command, FormField};
use client_domain::EventType;

pub const HELP: &str = "\
commands:
  <text>            set the title and submit
  /title <text>     set the title
  /desc <text>      set the description
  /source <text>    set the source
  /type <type>      USER_ACTION | SYSTEM_EVENT | NOTIFICATION | DATA_UPDATE | INTEGRATION
  /submit           submit the form
  /clear            delete all events (asks first)
  /refresh          re-fetch events and stats
  /help             show this help
  /quit             leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Commands(Vec<Command>),
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Input::Commands(vec![
            Command::Edit(FormField::Title(line.to_string())),
            Command::Submit,
        ]));
    };
    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };
    let command = match name.to_lowercase().as_str() {
        "title" => Command::Edit(FormField::Title(argument.to_string())),
        "desc" | "description" => Command::Edit(FormField::Description(argument.to_string())),
        "source" => Command::Edit(FormField::Source(argument.to_string())),
        "type" => Command::Edit(FormField::Type(argument.parse::<EventType>()?)),
        "submit" => Command::Submit,
        "clear" => Command::ClearAll,
        "refresh" => Command::Refresh,
        "help" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        other => return Err(format!("unknown command /{} (try /help)", other)),
    };
    Ok(Input::Commands(vec![command]))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandError {
    #[error("type a command, or `help`")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("`{command}` needs an argument")]
    MissingArgument { command: &'static str },

    #[error("not a number: {raw}")]
    InvalidNumber { raw: String },
}

/// One line typed at the quiz prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `start N`: a preset run length if N is a preset, otherwise a custom count.
    Start(u32),
    /// `custom N`
    Custom(u32),
    /// `pick N` or a bare `N`: 1-based position in the remaining list.
    Pick(usize),
    Undo,
    Reset,
    Submit,
    Next,
    Menu,
    Name(String),
    Load(PathBuf),
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  start N      start a run of N questions (presets: 5, 10)
  custom N     start a run of exactly N questions
  N | pick N   move remaining event N into your answer
  undo         put the last chosen event back
  reset        clear your answer and reshuffle the events
  submit       score your answer
  next         continue after an incorrect answer
  menu         back to the menu after a run
  name NAME    set the name used for exports
  load PATH    load another CSV (history is kept)
  export       write the history CSV
  help         show this list
  quit         leave";

fn number<T: FromStr>(raw: Option<&str>, command: &'static str) -> Result<T, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument { command })?;
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        raw: raw.to_string(),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "start" | "s" => number(rest, "start").map(Self::Start),
            "custom" | "c" => number(rest, "custom").map(Self::Custom),
            "pick" | "p" => number(rest, "pick").map(Self::Pick),
            "undo" | "u" => Ok(Self::Undo),
            "reset" | "r" => Ok(Self::Reset),
            "submit" | "ok" => Ok(Self::Submit),
            "next" | "n" => Ok(Self::Next),
            "menu" | "m" => Ok(Self::Menu),
            "name" => rest
                .map(|name| Self::Name(name.to_string()))
                .ok_or(CommandError::MissingArgument { command: "name" }),
            "load" => rest
                .map(|path| Self::Load(PathBuf::from(path)))
                .ok_or(CommandError::MissingArgument { command: "load" }),
            "export" | "e" => Ok(Self::Export),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other if other.chars().all(|c| c.is_ascii_digit()) => number(Some(other), "pick").map(Self::Pick),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

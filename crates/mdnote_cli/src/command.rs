//! Terminal command parsing.
//!
//! Each input line maps to one workflow event or a shell-only command.

use mdnote_core::Event;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const HELP_TEXT: &str = "\
Commands:
  open <path>    select a markdown file to upload
  title <text>   give the file a title
  tag <text>     add a tag
  untag <text>   remove the first matching tag
  submit         review the data to be submitted
  confirm        submit the reviewed data
  show           print the form again
  help           print this help
  quit           close the store and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Workflow(Event),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    MissingArgument(&'static str),
    Unknown(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "type a command, or `help`"),
            Self::MissingArgument(command) => write!(f, "`{command}` needs an argument"),
            Self::Unknown(command) => write!(f, "unknown command `{command}`; try `help`"),
        }
    }
}

/// Parses one input line.
///
/// Arguments keep their inner spacing; only the separator after the command
/// word is consumed, so titles are submitted exactly as typed.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed_start = line.trim_start();
    if trimmed_start.trim().is_empty() {
        return Err(CommandError::Empty);
    }

    let (word, argument) = match trimmed_start.split_once(' ') {
        Some((word, rest)) => (word, Some(rest)),
        None => (trimmed_start, None),
    };

    match word.to_ascii_lowercase().as_str() {
        "open" => {
            let path = required(argument.map(str::trim), "open")?;
            Ok(Command::Workflow(Event::FilePicked(PathBuf::from(path))))
        }
        "title" => Ok(Command::Workflow(Event::TitleSubmitted(
            argument.unwrap_or_default().to_string(),
        ))),
        "tag" => {
            let tag = required(argument, "tag")?;
            Ok(Command::Workflow(Event::TagSubmitted(tag.to_string())))
        }
        "untag" => {
            let tag = required(argument, "untag")?;
            Ok(Command::Workflow(Event::TagRemoved(tag.to_string())))
        }
        "submit" => Ok(Command::Workflow(Event::SubmitRequested)),
        "confirm" => Ok(Command::Workflow(Event::ConfirmationDismissed)),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn required<'a>(
    argument: Option<&'a str>,
    command: &'static str,
) -> Result<&'a str, CommandError> {
    argument
        .filter(|value| !value.trim().is_empty())
        .ok_or(CommandError::MissingArgument(command))
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command, CommandError};
    use mdnote_core::Event;
    use std::path::PathBuf;

    #[test]
    fn parses_workflow_commands() {
        assert_eq!(
            parse_command("open notes/todo.md\n").unwrap(),
            Command::Workflow(Event::FilePicked(PathBuf::from("notes/todo.md")))
        );
        assert_eq!(
            parse_command("tag urgent").unwrap(),
            Command::Workflow(Event::TagSubmitted("urgent".to_string()))
        );
        assert_eq!(
            parse_command("UNTAG urgent").unwrap(),
            Command::Workflow(Event::TagRemoved("urgent".to_string()))
        );
        assert_eq!(
            parse_command("confirm").unwrap(),
            Command::Workflow(Event::ConfirmationDismissed)
        );
    }

    #[test]
    fn title_argument_is_kept_verbatim() {
        assert_eq!(
            parse_command("title Todo List ").unwrap(),
            Command::Workflow(Event::TitleSubmitted("Todo List ".to_string()))
        );
        assert_eq!(
            parse_command("title").unwrap(),
            Command::Workflow(Event::TitleSubmitted(String::new()))
        );
    }

    #[test]
    fn reports_missing_and_unknown_commands() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("open   "),
            Err(CommandError::MissingArgument("open"))
        );
        assert_eq!(
            parse_command("upload x"),
            Err(CommandError::Unknown("upload".to_string()))
        );
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }
}

//! Shell command parsing

use std::str::FromStr;

use super::Route;

pub const HELP: &str = "\
commands:
  open <path>          go to a client path, e.g. /posts/index
  show <id>            open a post
  edit <id>            edit a post you own
  delete <id>          delete a post you own
  new                  write a new post
  set <field> <value>  fill a form field (title, content, age, username, email, password)
  image                fetch another dog image for the post form
  submit               submit the current form
  refresh              reload the current page
  logout               sign out
  help                 show this text
  quit                 exit";

/// Form field addressed by `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    Age,
    UserName,
    Email,
    Password,
}

impl FromStr for Field {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "content" => Ok(Field::Content),
            "age" => Ok(Field::Age),
            "username" | "name" => Ok(Field::UserName),
            "email" => Ok(Field::Email),
            "password" => Ok(Field::Password),
            _ => Err(CommandError::UnknownField(s.to_string())),
        }
    }
}

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Route),
    Show(i64),
    Edit(i64),
    Delete(i64),
    New,
    Set(Field, String),
    Image,
    Submit,
    Refresh,
    Logout,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Invalid post id '{0}'")]
    InvalidId(String),
    #[error("Unknown field '{0}'")]
    UnknownField(String),
}

fn post_id(name: &'static str, arg: &str) -> Result<i64, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    arg.parse().map_err(|_| CommandError::InvalidId(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name {
            "" => Err(CommandError::Empty),
            "open" | "goto" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("open"));
                }
                Ok(Command::Open(Route::parse(rest)))
            }
            "show" => post_id("show", rest).map(Command::Show),
            "edit" => post_id("edit", rest).map(Command::Edit),
            "delete" | "rm" => post_id("delete", rest).map(Command::Delete),
            "new" => Ok(Command::New),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::MissingArgument("set"));
                }
                Ok(Command::Set(field.parse()?, value.trim().to_string()))
            }
            "image" => Ok(Command::Image),
            "submit" => Ok(Command::Submit),
            "refresh" => Ok(Command::Refresh),
            "logout" => Ok(Command::Logout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

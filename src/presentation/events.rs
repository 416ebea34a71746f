// UI events read from the terminal, one command per line
use crate::domain::trips::DEFAULT_TOP_TRIPS;
use crate::domain::view::View;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on a nav entry
    Navigate(View),
    ToggleTheme,
    /// Borough select changed; `None` is the "all boroughs" option
    BoroughFilter(Option<String>),
    SortField(String),
    TopExpensive(u32),
    BoroughRevenue,
    Show,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error("{0}")]
    InvalidView(String),
    #[error("'{0}' is not a valid trip count")]
    InvalidCount(String),
}

impl FromStr for UiEvent {
    type Err = EventParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match command.to_ascii_lowercase().as_str() {
            "" => Err(EventParseError::Empty),
            "nav" => {
                if rest.is_empty() {
                    return Err(EventParseError::MissingArgument("nav"));
                }
                rest.parse()
                    .map(UiEvent::Navigate)
                    .map_err(EventParseError::InvalidView)
            }
            "theme" => Ok(UiEvent::ToggleTheme),
            "borough" => Ok(UiEvent::BoroughFilter(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "sort" => {
                if rest.is_empty() {
                    return Err(EventParseError::MissingArgument("sort"));
                }
                Ok(UiEvent::SortField(rest.to_string()))
            }
            "top" => {
                if rest.is_empty() {
                    return Ok(UiEvent::TopExpensive(DEFAULT_TOP_TRIPS));
                }
                rest.parse()
                    .map(UiEvent::TopExpensive)
                    .map_err(|_| EventParseError::InvalidCount(rest.to_string()))
            }
            "revenue" => Ok(UiEvent::BoroughRevenue),
            "show" => Ok(UiEvent::Show),
            "quit" | "exit" => Ok(UiEvent::Quit),
            other => Err(EventParseError::UnknownCommand(other.to_string())),
        }
    }
}

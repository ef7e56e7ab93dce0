//! Command parsing.

/// A recognised bot command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`: usage help.
    Start,

    /// `/stations [query]`: list stations, optionally filtered.
    Stations { query: Option<String> },

    /// `/station <id>`: details of one station.
    Station { id: Option<String> },
}

impl Command {
    /// Parse a message text into a command.
    ///
    /// The text must start with `/`. The command word may carry an
    /// `@username` suffix; when `bot_username` is known, commands addressed
    /// to another bot are rejected. Command names are case-insensitive.
    /// Arguments are whitespace-separated and only the first is used.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let mut words = text.split_whitespace();
        let head = words.next()?.strip_prefix('/')?;

        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (head, None),
        };

        if target
            .zip(bot_username)
            .is_some_and(|(target, me)| !target.eq_ignore_ascii_case(me))
        {
            return None;
        }

        let arg = words.next().map(str::to_string);

        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "stations" => Some(Command::Stations { query: arg }),
            "station" => Some(Command::Station { id: arg }),
            _ => None,
        }
    }

    /// Command word, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stations { .. } => "stations",
            Command::Station { .. } => "station",
        }
    }
}

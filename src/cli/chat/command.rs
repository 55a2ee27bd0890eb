/// A line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Prefs,
    History,
    Quit,
    Unknown(String),
    Ask(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed {
            "/help" => Command::Help,
            "/clear" => Command::Clear,
            "/prefs" => Command::Prefs,
            "/history" => Command::History,
            "/quit" | "/exit" => Command::Quit,
            _ if trimmed.starts_with('/') => Command::Unknown(trimmed.to_string()),
            _ => Command::Ask(trimmed.to_string()),
        }
    }
}

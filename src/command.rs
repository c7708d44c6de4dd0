use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// An action the user can type at the main prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    Import,
    Export,
    Ask,
    Exit,
    Log,
    HardestCard,
    ResetStats,
}

impl Command {
    /// All actions, in the order they are offered at the prompt.
    pub const ALL: [Command; 9] = [
        Command::Add,
        Command::Remove,
        Command::Import,
        Command::Export,
        Command::Ask,
        Command::Exit,
        Command::Log,
        Command::HardestCard,
        Command::ResetStats,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Remove => "remove",
            Command::Import => "import",
            Command::Export => "export",
            Command::Ask => "ask",
            Command::Exit => "exit",
            Command::Log => "log",
            Command::HardestCard => "hardest card",
            Command::ResetStats => "reset stats",
        }
    }

    pub fn prompt() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|c| c.name()).collect();
        format!("Input the action ({}):", names.join(", "))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.name() == input)
            .ok_or_else(|| Error::UnknownCommand(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_command() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_parse_multi_word_commands() {
        assert_eq!("hardest card".parse::<Command>().unwrap(), Command::HardestCard);
        assert_eq!(" reset stats ".parse::<Command>().unwrap(), Command::ResetStats);
    }

    #[test]
    fn test_parse_unknown_command() {
        let result = "fly".parse::<Command>();
        assert!(matches!(result, Err(Error::UnknownCommand(ref name)) if name == "fly"));
        assert!("hardest_card".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_prompt_lists_actions() {
        assert_eq!(
            Command::prompt(),
            "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):"
        );
    }
}

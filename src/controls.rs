//! Control surface: the three commands a player can issue

use std::str::FromStr;

use thiserror::Error;

use crate::sim::difficulty::Difficulty;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("unknown difficulty '{0}' (expected easy, normal or hard)")]
    UnknownDifficulty(String),
    #[error("missing difficulty after '{0}'")]
    MissingDifficulty(String),
}

/// A player command, mapped one-to-one onto controller calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Reset,
    SetDifficulty(Difficulty),
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse `start`, `reset` or `difficulty <easy|normal|hard>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_lowercase();

        match verb.as_str() {
            "start" => Ok(Command::Start),
            "reset" => Ok(Command::Reset),
            "difficulty" | "diff" => {
                let key = words
                    .next()
                    .ok_or_else(|| CommandError::MissingDifficulty(verb.clone()))?;
                Difficulty::from_key(key)
                    .map(Command::SetDifficulty)
                    .ok_or_else(|| CommandError::UnknownDifficulty(key.to_string()))
            }
            _ => Err(CommandError::Unknown(verb)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!("  RESET ".parse::<Command>(), Ok(Command::Reset));
        assert_eq!(
            "difficulty hard".parse::<Command>(),
            Ok(Command::SetDifficulty(Difficulty::Hard))
        );
        assert_eq!(
            "diff Easy".parse::<Command>(),
            Ok(Command::SetDifficulty(Difficulty::Easy))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(CommandError::Unknown("jump".into()))
        );
        assert_eq!(
            "difficulty".parse::<Command>(),
            Err(CommandError::MissingDifficulty("difficulty".into()))
        );
        assert_eq!(
            "difficulty extreme".parse::<Command>(),
            Err(CommandError::UnknownDifficulty("extreme".into()))
        );
    }
}

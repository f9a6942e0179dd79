//! Interactive digit recognizer shell
//!
//! A line-oriented menu over a single [`HopfieldNetwork`](crate::hopfield::HopfieldNetwork):
//! train glyphs, recall them with either recall mode, clear the weights and
//! toggle the step-by-step math display.

mod session;

pub use session::Session;

use std::fmt;

/// Menu commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Train,
    Recognize,
    RecognizeAsync,
    Clear,
    SelectMode,
    Exit,
    /// Train the ten builtin digit glyphs
    AlreadyTrained,
}

impl Command {
    /// Menu order
    pub const ALL: [Command; 7] = [
        Command::Train,
        Command::Recognize,
        Command::RecognizeAsync,
        Command::Clear,
        Command::SelectMode,
        Command::Exit,
        Command::AlreadyTrained,
    ];

    /// Accepts the menu number or the command name, case-insensitively
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(number) = input.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| Self::ALL.get(index).copied());
        }

        Self::ALL
            .into_iter()
            .find(|command| command.label().eq_ignore_ascii_case(input))
            .or_else(|| {
                input
                    .eq_ignore_ascii_case("recognizeAsyn")
                    .then_some(Command::RecognizeAsync)
            })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::Train => "train",
            Command::Recognize => "recognize",
            Command::RecognizeAsync => "recognizeAsync",
            Command::Clear => "clear",
            Command::SelectMode => "select mode",
            Command::Exit => "exit",
            Command::AlreadyTrained => "alreadyTrained",
        }
    }
}

/// Output verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Results only
    #[default]
    Default,
    /// Print every intermediate matrix and net input
    ShowMath,
}

impl Mode {
    /// "SHOW_MATH" or "2" select [`Mode::ShowMath`]; anything else is the default
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case("show_math") || input == "2" {
            Mode::ShowMath
        } else {
            Mode::Default
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Default => write!(f, "DEFAULT"),
            Mode::ShowMath => write!(f, "SHOW_MATH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        for (i, command) in Command::ALL.iter().enumerate() {
            assert_eq!(Command::parse(&(i + 1).to_string()), Some(*command));
        }
        assert_eq!(Command::parse("0"), None);
        assert_eq!(Command::parse("8"), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Command::parse("TRAIN"), Some(Command::Train));
        assert_eq!(Command::parse(" select mode "), Some(Command::SelectMode));
        assert_eq!(Command::parse("recognizeasync"), Some(Command::RecognizeAsync));
        assert_eq!(Command::parse("recognizeAsyn"), Some(Command::RecognizeAsync));
        assert_eq!(Command::parse("alreadytrained"), Some(Command::AlreadyTrained));
        assert_eq!(Command::parse("help"), None);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("show_math"), Mode::ShowMath);
        assert_eq!(Mode::parse("2"), Mode::ShowMath);
        assert_eq!(Mode::parse("1"), Mode::Default);
        assert_eq!(Mode::parse("anything"), Mode::Default);
        assert_eq!(Mode::ShowMath.to_string(), "SHOW_MATH");
    }
}

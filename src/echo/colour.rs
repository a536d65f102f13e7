use crate::error::RunechoError;
use std::str::FromStr;

/// Escape sequence that restores the terminal's default style
pub const RESET: &str = "\x1B[0m";

/// Foreground colours understood by the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colour {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    /// No escape at all; the terminal's current colour is kept
    #[default]
    Default,
}

impl Colour {
    /// The escape sequence emitted before a payload in this colour
    pub fn escape(&self) -> &'static str {
        match self {
            Colour::Red => "\x1B[38;5;196m",
            Colour::Green => "\x1B[92m",
            Colour::Yellow => "\x1B[93m",
            Colour::Blue => "\x1B[38;5;27m",
            Colour::Magenta => "\x1B[95m",
            Colour::Cyan => "\x1B[96m",
            Colour::Default => "",
        }
    }
}

impl FromStr for Colour {
    type Err = RunechoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Colour::Red),
            "green" => Ok(Colour::Green),
            "yellow" => Ok(Colour::Yellow),
            "blue" => Ok(Colour::Blue),
            "magenta" => Ok(Colour::Magenta),
            "cyan" => Ok(Colour::Cyan),
            "default" | "none" => Ok(Colour::Default),
            _ => Err(RunechoError::InvalidColour(s.to_string())),
        }
    }
}

// Echo module - Leveled, colourised console output

mod colour;
mod level;
mod logger;

pub use colour::{Colour, RESET};
pub use level::LogLevel;
pub use logger::{color_from_env, resolve_color, Logger, FORCE_COLOR_ENV, NO_COLOR_ENV};

use std::fmt::{self, Display};
use std::io::{self, IsTerminal, Write};

// These ignore severity: everything is written at Info with colour decided per call.
// An arbitrary writer is never treated as a terminal, so only FORCE_COLOR colours it.

/// Formats and writes coloured output to `w`
pub fn fprint<W>(colour: Colour, w: &mut W, args: fmt::Arguments<'_>) -> io::Result<usize>
where
    W: Write + ?Sized,
{
    logger::write_styled(color_from_env(false), colour, w, &fmt::format(args))
}

/// Writes coloured `values` followed by a newline to `w`
pub fn fprintln<W>(colour: Colour, w: &mut W, values: &[&dyn Display]) -> io::Result<usize>
where
    W: Write + ?Sized,
{
    logger::write_styled(color_from_env(false), colour, w, &logger::join_line(values))
}

/// Formats and writes coloured output to stdout
pub fn print(colour: Colour, args: fmt::Arguments<'_>) -> io::Result<usize> {
    let stdout = io::stdout();
    let use_color = color_from_env(stdout.is_terminal());
    logger::write_styled(use_color, colour, &mut stdout.lock(), &fmt::format(args))
}

/// Writes coloured `values` followed by a newline to stdout
pub fn println(colour: Colour, values: &[&dyn Display]) -> io::Result<usize> {
    let stdout = io::stdout();
    let use_color = color_from_env(stdout.is_terminal());
    logger::write_styled(use_color, colour, &mut stdout.lock(), &logger::join_line(values))
}

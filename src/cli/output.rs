// Status output for the CLI, kept on stderr so it never mixes with pumped stdout

use colored::*;

/// Print an error message to stderr
pub fn print_error(error: &str) {
    eprintln!("{} {}", "✗ Error:".red().bold(), error);
}

/// Print how many stdout lines a run captured
pub fn print_capture_summary(program: &str, captured: &[String]) {
    eprintln!(
        "{} {}",
        "✓".green().bold(),
        format_capture_summary(program, captured.len()).dimmed()
    );
}

fn format_capture_summary(program: &str, lines: usize) -> String {
    let noun = if lines == 1 { "line" } else { "lines" };
    format!("Captured {} stdout {} from {}", lines, noun, program)
}

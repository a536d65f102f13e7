// CLI module - User-facing command-line interface

mod output;

use crate::config::RunnerConfig;
use crate::echo::{Colour, LogLevel, Logger};
use crate::error::{Result, RunechoError, RUNNER_FAILURE_CODE};
use crate::input::open_input;
use crate::process::{RunOutput, Runner};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::PathBuf;

pub use output::{print_capture_summary, print_error};

/// runecho - run programs with coloured, leveled output
#[derive(Parser)]
#[command(name = "runecho")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program, streaming its stdout and stderr
    Run {
        /// Program to run (looked up in PATH)
        program: String,

        /// Do not colour stdout green and stderr red
        #[arg(long)]
        no_color: bool,

        /// Capture stdout lines and report them when the program finishes
        #[arg(short, long)]
        capture: bool,

        /// Only show stderr
        #[arg(short, long)]
        quiet: bool,

        /// Runner configuration file (.toml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Working directory for the program
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Environment variables (KEY=VALUE format)
        #[arg(short, long)]
        env: Vec<String>,

        /// Arguments to pass to the program
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Echo lines from a file (or stdin) through the logger
    Echo {
        /// Input file, `-` or nothing for stdin
        file: Option<PathBuf>,

        /// Colour of every line
        #[arg(short, long, default_value = "default")]
        colour: Colour,

        /// Level every line is written at
        #[arg(short, long, default_value = "info")]
        level: LogLevel,

        /// Lines less severe than this are dropped
        #[arg(short, long, default_value = "info")]
        threshold: LogLevel,
    },
}

impl Cli {
    /// Run the CLI application, returning the exit code for this process
    pub fn run() -> Result<i32> {
        let cli = Cli::parse();
        cli.execute()
    }

    /// Execute the parsed command
    fn execute(&self) -> Result<i32> {
        match &self.command {
            Commands::Run {
                program,
                no_color,
                capture,
                quiet,
                config,
                cwd,
                env,
                args,
            } => {
                let mut runner_config = match config {
                    Some(path) => RunnerConfig::from_file(path)?,
                    None => RunnerConfig::default(),
                };

                if *no_color {
                    runner_config.color = false;
                }
                if *quiet {
                    runner_config.level = LogLevel::Error;
                }
                if *capture {
                    runner_config.capture_stdout = true;
                }
                if let Some(cwd) = cwd {
                    runner_config.current_dir = Some(cwd.clone());
                }
                runner_config.env.extend(parse_env_vars(env)?);
                runner_config.validate()?;

                let capture_stdout = runner_config.capture_stdout;
                let result = Runner::from_config(runner_config).run(LogLevel::Info, program, args);

                if capture_stdout {
                    if let Some(captured) = summary_lines(&result) {
                        print_capture_summary(program, captured);
                    }
                }
                Ok(result?.exit_code)
            }

            Commands::Echo {
                file,
                colour,
                level,
                threshold,
            } => {
                let reader = open_input(file.as_deref())?;
                let logger = Logger::new(*threshold, io::stdout());

                for line in reader.lines() {
                    let line = line?;
                    logger.println(*colour, *level, &[&line])?;
                }
                Ok(0)
            }
        }
    }
}

/// Exit status for this process after a failed command.
///
/// A child's own non-zero code is passed through; runner failures become 1.
pub fn failure_status(error: &RunechoError) -> i32 {
    match error.exit_code() {
        RUNNER_FAILURE_CODE => 1,
        code => code,
    }
}

/// Lines to summarise after a run: the child ran, whatever its exit status
fn summary_lines(result: &Result<RunOutput>) -> Option<&[String]> {
    match result {
        Ok(output) => Some(output.captured.as_slice()),
        Err(error @ RunechoError::Exited { .. }) => Some(error.captured()),
        Err(_) => None,
    }
}

/// Parse environment variables from KEY=VALUE format
fn parse_env_vars(env_vars: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for env_str in env_vars {
        if let Some((key, value)) = env_str.split_once('=') {
            map.insert(key.to_string(), value.to_string());
        } else {
            return Err(RunechoError::ConfigError(format!(
                "Invalid environment variable format: '{}'. Expected KEY=VALUE",
                env_str
            )));
        }
    }

    Ok(map)
}

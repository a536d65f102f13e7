use crate::config::RunnerConfig;
use crate::echo::{Colour, LogLevel, Logger};
use crate::error::{Result, RunechoError};
use crate::process::pump::{self, PumpStyle};
use crate::process::types::{exit_code, RunOutput, StreamKind};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Runs external programs, streaming their output through a [`Logger`]
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    /// Create a runner.
    ///
    /// `level` is the logger threshold: with [`LogLevel::Error`] only stderr
    /// lines are shown, with [`LogLevel::Info`] stdout lines are shown too.
    pub fn new(level: LogLevel, color: bool, capture_stdout: bool) -> Self {
        Self::from_config(RunnerConfig {
            level,
            color,
            capture_stdout,
            ..Default::default()
        })
    }

    pub fn from_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run `program` with `args`, rendering stdout lines at `level` to this
    /// process's stdout and stderr lines at Error to this process's stderr.
    ///
    /// Blocks until the child exits. See [`Runner::run_with`].
    pub fn run<S>(&self, level: LogLevel, program: &str, args: &[S]) -> Result<RunOutput>
    where
        S: AsRef<OsStr>,
    {
        let logger = Logger::new(self.config.level, io::stderr());
        self.run_with(&logger, &mut io::stdout(), &mut io::stderr(), level, program, args)
    }

    /// Run `program` with an explicit logger and render targets.
    ///
    /// Both child streams are drained on their own thread until EOF before the
    /// child is reaped. The logger's threshold decides which lines are shown.
    ///
    /// # Returns
    /// * `Ok(RunOutput)` - The child exited successfully
    /// * `Err(RunechoError::Exited)` - The child exited unsuccessfully; carries its
    ///   real exit code and the lines captured so far
    /// * `Err(_)` - The runner failed to spawn or reap the child (exit code `-1`)
    pub fn run_with<L, O, E, S>(
        &self,
        logger: &Logger<L>,
        stdout_sink: &mut O,
        stderr_sink: &mut E,
        level: LogLevel,
        program: &str,
        args: &[S],
    ) -> Result<RunOutput>
    where
        L: Write + Send,
        O: Write + Send + ?Sized,
        E: Write + Send + ?Sized,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref cwd) = self.config.current_dir {
            command.current_dir(cwd);
        }
        for (key, value) in &self.config.env {
            command.env(key, value);
        }

        debug!(program, "spawning process");
        let mut child = command.spawn().map_err(|source| RunechoError::SpawnError {
            program: program.to_string(),
            source,
        })?;

        let stdout = match child.stdout.take() {
            Some(pipe) => pipe,
            None => return Err(abandon(child, "stdout")),
        };
        let stderr = match child.stderr.take() {
            Some(pipe) => pipe,
            None => return Err(abandon(child, "stderr")),
        };

        let (out_colour, err_colour) = if self.config.color {
            (Colour::Green, Colour::Red)
        } else {
            (Colour::Default, Colour::Default)
        };
        let out_style = PumpStyle {
            kind: StreamKind::Stdout,
            colour: out_colour,
            level,
            capture: self.config.capture_stdout,
        };
        let err_style = PumpStyle {
            kind: StreamKind::Stderr,
            colour: err_colour,
            level: LogLevel::Error,
            capture: false,
        };

        let captured = thread::scope(|s| {
            let out_pump = s.spawn(move || pump::drain(stdout, logger, stdout_sink, out_style));
            let err_pump = s.spawn(move || pump::drain(stderr, logger, stderr_sink, err_style));

            let captured = out_pump.join().unwrap_or_else(|_| {
                warn!(program, "stdout pump panicked");
                Vec::new()
            });
            if err_pump.join().is_err() {
                warn!(program, "stderr pump panicked");
            }
            captured
        });

        let status = child.wait().map_err(|source| RunechoError::WaitError {
            program: program.to_string(),
            source,
        })?;
        let code = exit_code(&status);

        if status.success() {
            debug!(program, code, "process exited successfully");
            Ok(RunOutput {
                captured,
                exit_code: code,
            })
        } else {
            debug!(program, code, "process exited unsuccessfully");
            Err(RunechoError::Exited {
                program: program.to_string(),
                code,
                captured,
            })
        }
    }
}

/// Kill and reap a child whose pipes could not be attached
fn abandon(mut child: Child, stream: &'static str) -> RunechoError {
    let _ = child.kill();
    let _ = child.wait();
    RunechoError::PipeError(stream)
}

/// Run a program from `$PATH`.
///
/// With `stream_output` stdout lines are shown; stderr lines are shown either
/// way. With `should_color` stdout is green and stderr red. A non-zero exit is
/// reported as [`RunechoError::Exited`] with the child's code, since some
/// programs use codes like 1 as a warning.
pub fn run_cmd<S>(
    should_color: bool,
    capture_stdout: bool,
    stream_output: bool,
    program: &str,
    args: &[S],
) -> Result<RunOutput>
where
    S: AsRef<OsStr>,
{
    let level = if stream_output {
        LogLevel::Info
    } else {
        LogLevel::Error
    };

    Runner::new(level, should_color, capture_stdout).run(LogLevel::Info, program, args)
}

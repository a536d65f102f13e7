use crate::echo::colour::{Colour, RESET};
use crate::echo::level::LogLevel;
use std::ffi::OsStr;
use std::fmt::{self, Display, Write as _};
use std::io::{self, IsTerminal, Stderr, Write};
use std::sync::{Mutex, MutexGuard};

/// Environment variable that forces colour on (force-color.org)
pub const FORCE_COLOR_ENV: &str = "FORCE_COLOR";

/// Environment variable that forces colour off (no-color.org)
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Leveled, optionally colourised writer that is safe to share between threads.
///
/// The mutex around the default destination doubles as the write lock: it is held
/// for every styled write, including writes to an explicit destination, so the
/// escape, payload and reset of one message are never split by another writer.
pub struct Logger<W: Write = Stderr> {
    /// Messages less severe than this are dropped
    level: LogLevel,
    /// Decided once at construction
    use_color: bool,
    /// Default destination, also the write lock
    out: Mutex<W>,
}

impl<W: Write + IsTerminal> Logger<W> {
    /// Create a logger whose colour decision comes from the environment and
    /// whether `out` is an interactive terminal
    pub fn new(level: LogLevel, out: W) -> Self {
        let use_color = color_from_env(out.is_terminal());
        Self::with_color(level, out, use_color)
    }
}

impl<W: Write> Logger<W> {
    /// Create a logger with an explicit colour decision
    pub fn with_color(level: LogLevel, out: W, use_color: bool) -> Self {
        tracing::trace!(%level, use_color, "logger created");
        Self {
            level,
            use_color,
            out: Mutex::new(out),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Formats and writes to `w` if `level` passes the threshold.
    ///
    /// Returns the payload byte count, or `0` when the message was filtered.
    pub fn print_to<D>(
        &self,
        colour: Colour,
        level: LogLevel,
        w: &mut D,
        args: fmt::Arguments<'_>,
    ) -> io::Result<usize>
    where
        D: Write + ?Sized,
    {
        if !level.passes(self.level) {
            return Ok(0);
        }
        let payload = fmt::format(args);
        let _guard = self.lock();
        write_styled(self.use_color, colour, w, &payload)
    }

    /// Writes `values` separated by spaces and followed by a newline to `w`
    pub fn println_to<D>(
        &self,
        colour: Colour,
        level: LogLevel,
        w: &mut D,
        values: &[&dyn Display],
    ) -> io::Result<usize>
    where
        D: Write + ?Sized,
    {
        if !level.passes(self.level) {
            return Ok(0);
        }
        let payload = join_line(values);
        let _guard = self.lock();
        write_styled(self.use_color, colour, w, &payload)
    }

    /// Formats and writes to the configured destination
    pub fn print(&self, colour: Colour, level: LogLevel, args: fmt::Arguments<'_>) -> io::Result<usize> {
        if !level.passes(self.level) {
            return Ok(0);
        }
        let payload = fmt::format(args);
        let mut out = self.lock();
        write_styled(self.use_color, colour, &mut *out, &payload)
    }

    /// Writes a line of `values` to the configured destination
    pub fn println(&self, colour: Colour, level: LogLevel, values: &[&dyn Display]) -> io::Result<usize> {
        if !level.passes(self.level) {
            return Ok(0);
        }
        let payload = join_line(values);
        let mut out = self.lock();
        write_styled(self.use_color, colour, &mut *out, &payload)
    }

    /// Success message [Info, green]
    pub fn success(&self, values: &[&dyn Display]) -> io::Result<usize> {
        self.println(Colour::Green, LogLevel::Info, values)
    }

    /// Debug message [Debug, cyan]
    pub fn debug(&self, values: &[&dyn Display]) -> io::Result<usize> {
        self.println(Colour::Cyan, LogLevel::Debug, values)
    }

    /// Error message [Error, red]
    pub fn error(&self, values: &[&dyn Display]) -> io::Result<usize> {
        self.println(Colour::Red, LogLevel::Error, values)
    }

    /// Consume the logger and hand back its default destination
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        // a panicking writer leaves the destination usable
        self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Decide whether to colour output.
///
/// A non-empty `force_color` wins, then a non-empty `no_color`, then terminal detection.
pub fn resolve_color(force_color: Option<&OsStr>, no_color: Option<&OsStr>, is_terminal: bool) -> bool {
    let set = |v: Option<&OsStr>| v.is_some_and(|v| !v.is_empty());

    if set(force_color) {
        return true;
    }
    if set(no_color) {
        return false;
    }
    is_terminal
}

/// [`resolve_color`] fed from the process environment
pub fn color_from_env(is_terminal: bool) -> bool {
    resolve_color(
        std::env::var_os(FORCE_COLOR_ENV).as_deref(),
        std::env::var_os(NO_COLOR_ENV).as_deref(),
        is_terminal,
    )
}

/// Emit one message. The caller holds the write lock.
///
/// [`Colour::Default`] is written bare, without a reset. Escape and flush
/// failures are ignored; the payload write decides the result.
pub(crate) fn write_styled<D>(use_color: bool, colour: Colour, w: &mut D, payload: &str) -> io::Result<usize>
where
    D: Write + ?Sized,
{
    if !use_color || colour == Colour::Default {
        w.write_all(payload.as_bytes())?;
        let _ = w.flush();
        return Ok(payload.len());
    }

    let _ = w.write_all(colour.escape().as_bytes());
    let written = w.write_all(payload.as_bytes()).map(|()| payload.len());
    let _ = w.write_all(RESET.as_bytes());
    let _ = w.flush();
    written
}

/// Space separated values terminated by a newline
pub(crate) fn join_line(values: &[&dyn Display]) -> String {
    let mut line = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{}", value);
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Destination shared between threads; each `write` call is atomic on its own
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts every write, fails every flush
    struct FlushFailingWriter(Vec<u8>);

    impl Write for FlushFailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "flush failed"))
        }
    }

    fn styled(colour: Colour, payload: &str) -> String {
        format!("{}{}{}", colour.escape(), payload, RESET)
    }

    #[test]
    fn test_filtered_message_writes_nothing() {
        let logger = Logger::with_color(LogLevel::Warn, Vec::new(), true);

        let n = logger.println(Colour::Green, LogLevel::Info, &[&"hidden"]).unwrap();
        assert_eq!(n, 0);
        let n = logger.debug(&[&"also hidden"]).unwrap();
        assert_eq!(n, 0);

        assert!(logger.into_inner().is_empty());
    }

    #[test]
    fn test_colour_wraps_payload() {
        let logger = Logger::with_color(LogLevel::Info, Vec::new(), true);

        let n = logger.print(Colour::Cyan, LogLevel::Info, format_args!("{}-{}", 1, 2)).unwrap();
        assert_eq!(n, 3);

        let out = String::from_utf8(logger.into_inner()).unwrap();
        assert_eq!(out, styled(Colour::Cyan, "1-2"));
    }

    #[test]
    fn test_no_colour_writes_payload_only() {
        let logger = Logger::with_color(LogLevel::Trace, Vec::new(), false);

        logger.success(&[&"done", &42]).unwrap();
        logger.error(&[&"bad"]).unwrap();

        let out = String::from_utf8(logger.into_inner()).unwrap();
        assert_eq!(out, "done 42\nbad\n");
    }

    #[test]
    fn test_convenience_levels_and_colours() {
        let logger = Logger::with_color(LogLevel::Debug, Vec::new(), true);

        logger.success(&[&"ok"]).unwrap();
        logger.debug(&[&"dbg"]).unwrap();
        logger.error(&[&"err"]).unwrap();

        let out = String::from_utf8(logger.into_inner()).unwrap();
        let expected = [
            styled(Colour::Green, "ok\n"),
            styled(Colour::Cyan, "dbg\n"),
            styled(Colour::Red, "err\n"),
        ]
        .concat();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_explicit_destination_bypasses_default() {
        let logger = Logger::with_color(LogLevel::Info, Vec::new(), false);
        let mut other = Vec::new();

        let n = logger
            .println_to(Colour::Red, LogLevel::Error, &mut other, &[&"to", &"other"])
            .unwrap();
        assert_eq!(n, "to other\n".len());
        assert_eq!(other, b"to other\n");
        assert!(logger.into_inner().is_empty());
    }

    #[test]
    fn test_payload_error_is_propagated() {
        let logger = Logger::with_color(LogLevel::Info, FailingWriter, true);
        let err = logger.success(&[&"lost"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let plain = Logger::with_color(LogLevel::Info, Vec::new(), false);
        let err = plain
            .print_to(Colour::Default, LogLevel::Info, &mut FailingWriter, format_args!("x"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_flush_error_is_ignored_with_and_without_colour() {
        for use_color in [false, true] {
            let logger = Logger::with_color(LogLevel::Info, Vec::new(), use_color);
            let mut w = FlushFailingWriter(Vec::new());

            let n = logger
                .println_to(Colour::Green, LogLevel::Info, &mut w, &[&"kept"])
                .unwrap();
            assert_eq!(n, "kept\n".len());

            let expected = if use_color {
                styled(Colour::Green, "kept\n")
            } else {
                "kept\n".to_string()
            };
            assert_eq!(String::from_utf8(w.0).unwrap(), expected);
        }
    }

    #[test]
    fn test_concurrent_writers_never_split_a_message() {
        let logger = Logger::with_color(LogLevel::Info, Vec::new(), true);
        let dest = SharedBuf::default();
        const PER_THREAD: usize = 200;

        std::thread::scope(|s| {
            let logger = &logger;
            for (colour, text) in [(Colour::Green, "out"), (Colour::Red, "err")] {
                let mut w = dest.clone();
                s.spawn(move || {
                    for _ in 0..PER_THREAD {
                        logger.println_to(colour, LogLevel::Info, &mut w, &[&text]).unwrap();
                    }
                });
            }
        });

        let green = styled(Colour::Green, "out\n");
        let red = styled(Colour::Red, "err\n");
        let contents = dest.contents();
        let mut rest = contents.as_str();
        let (mut greens, mut reds) = (0, 0);
        while !rest.is_empty() {
            if let Some(r) = rest.strip_prefix(green.as_str()) {
                greens += 1;
                rest = r;
            } else if let Some(r) = rest.strip_prefix(red.as_str()) {
                reds += 1;
                rest = r;
            } else {
                panic!("interleaved output at: {:?}", rest);
            }
        }
        assert_eq!(greens, PER_THREAD);
        assert_eq!(reds, PER_THREAD);
    }

    #[test]
    fn test_resolve_color_precedence() {
        let set = OsStr::new("1");
        let empty = OsStr::new("");

        assert!(resolve_color(Some(set), None, false));
        assert!(resolve_color(Some(set), Some(set), false));
        assert!(!resolve_color(None, Some(set), true));
        assert!(resolve_color(Some(empty), None, true));
        assert!(!resolve_color(Some(empty), Some(empty), false));
        assert!(resolve_color(None, None, true));
        assert!(!resolve_color(None, None, false));
    }

    #[test]
    fn test_force_color_beats_redirected_file() {
        let file = tempfile::tempfile().unwrap();
        assert!(!file.is_terminal());

        let forced = OsStr::new("1");
        assert!(resolve_color(Some(forced), None, file.is_terminal()));
    }

    #[test]
    fn test_default_colour_is_bare_even_when_colouring() {
        let logger = Logger::with_color(LogLevel::Info, Vec::new(), true);
        logger.println(Colour::Default, LogLevel::Info, &[&"plain"]).unwrap();
        assert_eq!(logger.into_inner(), b"plain\n");
    }

    #[test]
    fn test_join_line() {
        assert_eq!(join_line(&[]), "\n");
        assert_eq!(join_line(&[&"a", &1, &'c']), "a 1 c\n");
    }
}

use crate::echo::{Colour, LogLevel, Logger};
use crate::process::types::StreamKind;
use std::io::{self, BufRead, BufReader, Read, Write};
use tracing::{debug, trace, warn};

/// How lines from one stream are rendered
#[derive(Debug, Clone, Copy)]
pub(crate) struct PumpStyle {
    pub kind: StreamKind,
    pub colour: Colour,
    pub level: LogLevel,
    /// Keep every line for the caller
    pub capture: bool,
}

/// Drain `reader` to EOF, writing each line through `logger` to `sink`.
///
/// Returns the captured lines when `style.capture` is set. A read error ends
/// the pump early; write errors on `sink` are only traced.
pub(crate) fn drain<R, L, D>(reader: R, logger: &Logger<L>, sink: &mut D, style: PumpStyle) -> Vec<String>
where
    R: Read,
    L: Write,
    D: Write + ?Sized,
{
    let mut reader = BufReader::new(reader);
    let mut captured = Vec::new();
    let mut buf = Vec::new();
    let mut lines = 0usize;

    trace!(stream = %style.kind, "pump started");

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = decode_line(&buf);
                lines += 1;

                if let Err(e) = logger.println_to(style.colour, style.level, sink, &[&line]) {
                    debug!(stream = %style.kind, "failed to render line: {}", e);
                }
                if style.capture {
                    captured.push(line);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(stream = %style.kind, "stopped reading child output: {}", e);
                break;
            }
        }
    }

    trace!(stream = %style.kind, lines, "pump finished");
    captured
}

/// Strip the line terminator (`\n` or `\r\n`) and decode lossily
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

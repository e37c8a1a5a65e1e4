//! Kernel logging backend.
//!
//! Implements the `log` facade on top of a byte sink supplied by the
//! platform (a serial port, the TOS console, a test buffer). Nothing here
//! allocates, so the logger works from the first instruction of the
//! privileged entry point.
#![cfg_attr(not(test), no_std)]

use core::fmt::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record};
use spin::{Mutex, Once};

/// Destination for formatted log lines.
pub trait Sink: Send + Sync {
    fn write_str(&self, s: &str);
}

/// Five-character tag and SGR colour code for each level, most severe
/// first so that `Level as usize - 1` indexes it.
const STYLES: [(&str, u8); 5] = [
    ("ERROR", 31),
    (" WARN", 33),
    (" INFO", 32),
    ("DEBUG", 36),
    ("TRACE", 90),
];

struct SinkWriter<'a>(&'a dyn Sink);

impl fmt::Write for SinkWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s);
        Ok(())
    }
}

/// Write one complete log line.
fn write_line<W: Write>(out: &mut W, level: Level, target: &str, args: fmt::Arguments) -> fmt::Result {
    let (tag, sgr) = STYLES[level as usize - 1];
    writeln!(out, "\x1b[{}m[{}]\x1b[0m {}: {}", sgr, tag, target, args)
}

/// `log` backend writing to a [`Sink`].
pub struct KernelLogger {
    sink: &'static dyn Sink,
    // Keeps lines from interleaving when more than one context logs.
    lock: Mutex<()>,
}

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _guard = self.lock.lock();
        let mut out = SinkWriter(self.sink);
        let _ = write_line(&mut out, record.level(), record.target(), *record.args());
    }

    fn flush(&self) {}
}

static LOGGER: Once<KernelLogger> = Once::new();

/// Install the logger and set the maximum level.
///
/// Only the first call has any effect; it returns `true` if this call
/// installed the logger.
pub fn init(sink: &'static dyn Sink, max: LevelFilter) -> bool {
    let mut installed = false;
    let logger = LOGGER.call_once(|| {
        installed = true;
        KernelLogger {
            sink,
            lock: Mutex::new(()),
        }
    });
    if !installed || log::set_logger(logger).is_err() {
        return false;
    }
    log::set_max_level(max);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Capture(Mutex<String>);

    impl Sink for Capture {
        fn write_str(&self, s: &str) {
            self.0.lock().push_str(s);
        }
    }

    static CAPTURE: Capture = Capture(Mutex::new(String::new()));

    #[test]
    fn line_format() {
        let mut out = String::new();
        write_line(&mut out, Level::Warn, "kvideo::clock", format_args!("pll busy {}", 3)).unwrap();
        assert_eq!(out, "\x1b[33m[ WARN]\x1b[0m kvideo::clock: pll busy 3\n");
    }

    #[test]
    fn every_level_has_its_own_tag() {
        let tags: Vec<String> = [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace]
            .iter()
            .map(|&level| {
                let mut out = String::new();
                write_line(&mut out, level, "t", format_args!("")).unwrap();
                out
            })
            .collect();
        assert!(tags[0].starts_with("\x1b[31m[ERROR]"));
        assert!(tags[3].starts_with("\x1b[36m[DEBUG]"));
        assert!(tags[4].starts_with("\x1b[90m[TRACE]"));
    }

    #[test]
    fn installs_once_and_filters_by_level() {
        assert!(init(&CAPTURE, LevelFilter::Info));
        assert!(!init(&CAPTURE, LevelFilter::Trace));

        log::debug!(target: "t", "hidden");
        log::info!(target: "t", "shown {}", 1);

        let text = CAPTURE.0.lock().clone();
        assert!(!text.contains("hidden"));
        assert!(text.ends_with("[ INFO]\x1b[0m t: shown 1\n"));
    }
}

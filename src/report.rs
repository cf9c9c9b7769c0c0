//! The log sink of the checker.
//!
//! The sink is handed to the analysis by reference. Everything the checker
//! has to say, including the danger warnings, goes through it, so a run can
//! be captured byte for byte by passing a `Vec<u8>`.

use std::io::{self, Write};

/// Log levels, ordered by verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Debug,
    Trace,
}

impl Level {
    /// Maps the `--verbosity` switch to a level: 1 for debug, 2 for trace,
    /// everything else stays at info.
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            1 => Level::Debug,
            2 => Level::Trace,
            _ => Level::Info,
        }
    }
}

/// A levelled writer. Messages above the configured level are dropped,
/// write failures of the sink are ignored.
pub struct Log<'a> {
    sink: &'a mut dyn io::Write,
    level: Level,
}

impl<'a> Log<'a> {
    pub fn new(sink: &'a mut dyn io::Write, level: Level) -> Self {
        Log { sink, level }
    }

    /// Reports a failure that aborts the run. Always emitted.
    pub fn critical(&mut self, msg: &str) {
        let _ = writeln!(self.sink, "[critical] {}", msg);
    }

    /// Reports a finding. Always emitted; the danger warnings use this.
    pub fn info(&mut self, msg: &str) {
        let _ = writeln!(self.sink, "[info] {}", msg);
    }

    pub fn debug(&mut self, msg: &str) {
        if self.level >= Level::Debug {
            let _ = writeln!(self.sink, "[debug] {}", msg);
        }
    }

    pub fn trace(&mut self, msg: &str) {
        if self.level >= Level::Trace {
            let _ = writeln!(self.sink, "[trace] {}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filter_test() {
        let mut buf: Vec<u8> = Vec::new();
        let mut log = Log::new(&mut buf, Level::Info);
        log.info("shown");
        log.debug("hidden");
        log.trace("hidden");
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "[info] shown\n");
    }

    #[test]
    fn verbosity_mapping_test() {
        assert_eq!(Level::from_verbosity(0), Level::Info);
        assert_eq!(Level::from_verbosity(1), Level::Debug);
        assert_eq!(Level::from_verbosity(2), Level::Trace);
        assert_eq!(Level::from_verbosity(9), Level::Info);
    }
}

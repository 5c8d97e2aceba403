use log::{LevelFilter, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Writes `[LEVEL] message` lines to a file, or to stderr when no file is set.
struct LineLogger {
    file_path: Option<PathBuf>,
    level: LevelFilter,
}

impl log::Log for LineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match &self.file_path {
            Some(path) => {
                if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                    let _ = writeln!(file, "[{}] {}", record.level(), record.args());
                }
            }
            None => eprintln!("[{}] {}", record.level(), record.args()),
        }
    }

    fn flush(&self) {}
}

pub fn init_logger(path: Option<PathBuf>, level: LevelFilter) -> Result<()> {
    let logger = LineLogger {
        file_path: path,
        level,
    };
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

/// Maps a `-v` count to a level: warn, info, debug, then trace.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use tracing::Level;

use crate::config::LoggingConfig;

/// Where log lines may go given the current front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The terminal is owned by the UI; only a configured file is used.
    FileOnly,
    /// Stdout carries data; logs go to the file if set, else stderr.
    FileOrStderr,
}

pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim()).map_err(|_| eyre!("unknown log level `{level}`"))
}

/// Install the global subscriber. Returns false when logging stays disabled.
pub fn init(config: &LoggingConfig, sink: LogSink) -> Result<bool> {
    let level = parse_level(&config.level)?;
    let json = config.format.eq_ignore_ascii_case("json");

    match (&config.file, sink) {
        (Some(path), _) => {
            let file = open_log_file(path)?;
            install(level, json, Mutex::new(file))?;
        }
        (None, LogSink::FileOrStderr) => install(level, json, std::io::stderr)?,
        (None, LogSink::FileOnly) => return Ok(false),
    }
    Ok(true)
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(File::options().create(true).append(true).open(path)?)
}

fn install<W>(level: Level, json: bool, writer: W) -> Result<()>
where
    W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_writer(writer);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}

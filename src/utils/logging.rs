// Tue Jan 13 2026 - Alex

//! File-backed `log` sink. Every record goes to `<prefix>.log`; each log target
//! (the diagnostic category) also gets its own `<prefix>.<category>.log`.

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::LoggingConfig;

pub const MAX_CATEGORY_FILES: usize = 16;

const ROTATED_PREFIX: &str = "old_";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

pub fn level_from_str(s: &str) -> LevelFilter {
    match s.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Keep `[A-Za-z0-9_-]`, replace everything else with `_`.
pub fn sanitize_category(category: &str) -> String {
    let cleaned: String = category
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}

/// Move an existing log out of the way as `old_<name>`, replacing any earlier rotation.
fn rotate(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(());
    };
    let rotated = path.with_file_name(format!("{}{}", ROTATED_PREFIX, name));
    if rotated.exists() {
        fs::remove_file(&rotated)?;
    }
    fs::rename(path, rotated)
}

fn open_fresh(path: &Path) -> Result<File, LoggingError> {
    let io_err = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };
    rotate(path).map_err(io_err)?;
    OpenOptions::new().create(true).append(true).open(path).map_err(io_err)
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

pub struct CategoryLogger {
    level: LevelFilter,
    directory: PathBuf,
    prefix: String,
    echo_stderr: bool,
    main: Mutex<File>,
    categories: Mutex<HashMap<String, File>>,
}

impl CategoryLogger {
    pub fn new(directory: impl Into<PathBuf>, prefix: &str, level: LevelFilter) -> Result<Self, LoggingError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| LoggingError::Io {
            path: directory.clone(),
            source,
        })?;

        let main = open_fresh(&directory.join(format!("{}.log", prefix)))?;

        Ok(Self {
            level,
            directory,
            prefix: prefix.to_string(),
            echo_stderr: false,
            main: Mutex::new(main),
            categories: Mutex::new(HashMap::new()),
        })
    }

    pub fn from_config(config: &LoggingConfig) -> Result<Self, LoggingError> {
        Ok(Self::new(&config.directory, &config.prefix, level_from_str(&config.level))?
            .with_stderr_echo(config.echo_stderr))
    }

    pub fn with_stderr_echo(mut self, echo: bool) -> Self {
        self.echo_stderr = echo;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn category_path(&self, category: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}.log", self.prefix, sanitize_category(category)))
    }

    pub fn main_path(&self) -> PathBuf {
        self.directory.join(format!("{}.log", self.prefix))
    }

    fn write_category(&self, category: &str, line: &str) {
        let key = sanitize_category(category);
        let mut files = self.categories.lock();

        if !files.contains_key(&key) {
            if files.len() >= MAX_CATEGORY_FILES {
                return;
            }
            match open_fresh(&self.category_path(&key)) {
                Ok(file) => {
                    files.insert(key.clone(), file);
                }
                Err(_) => return,
            }
        }

        if let Some(file) = files.get_mut(&key) {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }

    fn echo(&self, record: &Record) {
        let level = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        };
        let target = format!("[{}]", record.target());
        eprintln!("{} {} {}", level, target.dimmed(), record.args());
    }
}

impl Log for CategoryLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let stamp = timestamp();
        let message = record.args().to_string();

        {
            let mut main = self.main.lock();
            let _ = writeln!(main, "{} {:5} [{}] {}", stamp, record.level(), record.target(), message);
            let _ = main.flush();
        }

        self.write_category(
            record.target(),
            &format!("{} {:5} {}\n", stamp, record.level(), message),
        );

        if self.echo_stderr {
            self.echo(record);
        }
    }

    fn flush(&self) {
        let _ = self.main.lock().flush();
        for file in self.categories.lock().values_mut() {
            let _ = file.flush();
        }
    }
}

/// Install a [`CategoryLogger`] built from `config` as the global logger.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let logger = CategoryLogger::from_config(config)?;
    let level = logger.level();
    log::set_boxed_logger(Box::new(logger)).map_err(|_| LoggingError::AlreadyInitialized)?;
    log::set_max_level(level);
    Ok(())
}

/// Stderr-only logging through `env_logger`; `RUST_LOG` still overrides `level`.
pub fn init_stderr(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

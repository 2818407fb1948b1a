//! gh-assets Logging System
//!
//! Timestamped, leveled log lines on the console, optionally mirrored into a
//! log file.

use chrono::Local;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

// ============================================================================
// Log Levels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Download,
    Warning,
    Error,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO]",
            LogLevel::Download => "[DOWNLOAD]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Error => "[ERROR]",
        }
    }

    fn is_problem(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }
}

// ============================================================================
// Logger
// ============================================================================

pub struct Logger {
    log_file: Option<File>,
    /// Hide info and download lines on the console. The log file still gets them.
    quiet: bool,
}

impl Logger {
    pub fn new(log_path: Option<&Path>, quiet: bool) -> Self {
        let log_file = log_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    eprintln!(
                        "{}",
                        timestamped(
                            LogLevel::Warning,
                            &format!("Cannot open log file {}: {}", path.display(), e),
                        )
                    );
                    None
                }
            }
        });

        let mut logger = Self { log_file, quiet };
        if let Some(ref mut file) = logger.log_file {
            let _ = writeln!(
                file,
                "==== gh-assets v{} - {} ====",
                env!("CARGO_PKG_VERSION"),
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
        }
        logger
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        let line = timestamped(level, message);

        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(file, "{}", line);
            let _ = file.flush();
        }

        if level.is_problem() {
            eprintln!("{}", line);
        } else if !self.quiet {
            println!("{}", line);
        }
    }
}

fn timestamped(level: LogLevel, message: &str) -> String {
    format_line(&Local::now().format("%H:%M:%S").to_string(), level, message)
}

fn format_line(timestamp: &str, level: LogLevel, message: &str) -> String {
    format!("[{}] {} {}", timestamp, level.prefix(), message)
}

// ============================================================================
// Global Logger Access
// ============================================================================

/// Initialize the global logger (call once at startup). Later calls are no-ops.
pub fn init_logger(log_path: Option<&Path>, quiet: bool) {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(log_path, quiet)));
}

fn logger() -> &'static Mutex<Logger> {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(None, false)))
}

pub fn log_info(message: &str) {
    logger().lock().log(LogLevel::Info, message);
}

pub fn log_download(message: &str) {
    logger().lock().log(LogLevel::Download, message);
}

pub fn log_warning(message: &str) {
    logger().lock().log(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    logger().lock().log(LogLevel::Error, message);
}

//! Logger for the kiln CLI
//!
//! Plain `[LEVEL] message` lines on stderr, no timestamps and no module paths.
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary.
//!
//! # Usage
//!
//! ```rust
//! use kiln::util::logger;
//!
//! logger::init();
//! tracing::info!("Permutation {}/{}", 1, 4);
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `Debug` when verbose output was requested, otherwise `self`.
    pub fn or_verbose(
        self,
        verbose: bool,
    ) -> LogLevel {
        if verbose && self > LogLevel::Debug {
            LogLevel::Debug
        } else {
            self
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Initialize logger with default configuration (INFO level)
pub fn init() -> bool {
    init_with_level(LogLevel::Info)
}

/// Initialize logger with custom level.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with_level(level: LogLevel) -> bool {
    let filter = tracing_subscriber::filter::LevelFilter::from_level(level.into());

    // 显示 [LEVEL] 前缀，不显示时间、不显示模块路径、无颜色
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).try_init().is_ok()
}

/// Initialize logger for CLI use (INFO level)
pub fn init_cli() -> bool {
    init_with_level(LogLevel::Info)
}

/// Initialize logger for debug use (DEBUG level)
pub fn init_debug() -> bool {
    init_with_level(LogLevel::Debug)
}

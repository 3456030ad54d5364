//! Logger setup for the terminal front-end.
//!
//! The app owns the whole screen while it runs, so logs written to stderr
//! would tear the picture. Pass a log file to keep them readable.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "projector_core=trace").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub log_file: Option<PathBuf>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            log_file: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Fails only when the log file cannot be
/// created.
pub fn init_logging(config: LoggingConfig) -> io::Result<()> {
    let file = match &config.log_file {
        Some(path) => Some(File::create(path)?),
        None => None,
    };

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        match file {
            Some(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
                builder.write_style(env_logger::WriteStyle::Never);
            }
            None => {
                builder.write_style(config.write_style);
            }
        }

        // A logger installed by someone else wins.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });

    Ok(())
}

//! Logger initialization.

use std::io::{IsTerminal, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and the CLI level is applied on top of it, so
/// `RUST_LOG=reqwest=debug` still works for dependency modules while
/// `--log-level` controls this crate. Logs go to stderr so that stdout stays
/// reserved for the run summary.
///
/// ```bash
/// RUST_LOG=debug audit-redirects --in=legacy-urls.txt
/// audit-redirects --in=legacy-urls.txt --log-format=json 2> audit.log.jsonl
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(std::io::stderr().is_terminal());

    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("legacy_redirects", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let label = format!("{level:<5}");
                let colored_level = match level {
                    log::Level::Error => label.red().bold(),
                    log::Level::Warn => label.yellow(),
                    log::Level::Info => label.green(),
                    log::Level::Debug => label.blue(),
                    log::Level::Trace => label.purple(),
                };

                writeln!(
                    buf,
                    "{} {} {} {}",
                    chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    colored_level,
                    record.target().cyan(),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

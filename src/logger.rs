use std::io::Write;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::config::LogConfig;

/// Build a logger honouring `RUST_LOG`, falling back to `config.filter`.
///
/// Lines are written as `timestamp [LEVEL] target - message`, to stderr or
/// appended to `config.file`.
pub fn build_logger(config: &LogConfig) -> Result<Builder> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(config.filter.as_str()));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{:<5}] {} - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = &config.file {
        // Create the log dir.
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log dir {}", dir.display()))?;
        }
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(log_file)));
    }
    Ok(builder)
}

/// Install the global logger. Fails if a logger is already installed.
pub fn init_logger(config: &LogConfig) -> Result<()> {
    build_logger(config)?
        .try_init()
        .context("a global logger is already installed")
}

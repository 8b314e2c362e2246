use std::fs::OpenOptions;

use simplelog::{ColorChoice, Config as LogConfig, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};

use netcam::Config;

use crate::error::CliResult;

fn log_config() -> LogConfig {
    ConfigBuilder::new()
        .add_filter_allow_str("netcam")
        .add_filter_allow_str("cli")
        .build()
}

/// The panel owns the terminal, so its log goes to a file
pub fn init_file_logger(config: &Config) -> CliResult<()> {
    let level = config.level_filter()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    WriteLogger::init(level, log_config(), file)?;
    Ok(())
}

pub fn init_term_logger(config: &Config) -> CliResult<()> {
    let level = config.level_filter()?;
    TermLogger::init(level, log_config(), TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

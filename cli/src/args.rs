use std::path::PathBuf;

use clap::{Parser, Subcommand};
use netcam::{parse_value, Command, Config};

/// Control panel for the network camera media server
#[derive(Debug, Parser)]
#[command(name = "netcam", version, about)]
pub struct Args {
    /// Media server base URL, e.g. http://dm365.local
    #[arg(short, long)]
    pub url: Option<String>,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds; requests wait indefinitely when unset or 0
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log file used while the control panel is open
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Run a single command instead of opening the control panel
    #[command(subcommand)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Action {
    /// Start camera streaming
    Play,
    /// Stop camera streaming
    Stop,
    /// Print general server information
    GetInfo,
    /// Set the encoder target bitrate
    SetBitrate {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Set the stream framerate in frames per second
    SetFramerate {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Serve the media server emulator on 127.0.0.1 until Enter is pressed
    Emulate {
        #[arg(short, long, default_value_t = 8088)]
        port: u16,
    },
}

impl Action {
    /// The request this action sends, if any
    pub fn to_command(&self) -> Option<Command> {
        match self {
            Action::Play => Some(Command::Play),
            Action::Stop => Some(Command::Stop),
            Action::GetInfo => Some(Command::GetInfo),
            Action::SetBitrate { value } => Some(Command::SetBitrate(parse_value(value))),
            Action::SetFramerate { value } => Some(Command::SetFramerate(parse_value(value))),
            Action::Emulate { .. } => None,
        }
    }
}

impl Args {
    /// Configuration file and environment, with command-line flags on top
    pub fn resolve_config(&self) -> netcam::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout);
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }

        Ok(config)
    }
}

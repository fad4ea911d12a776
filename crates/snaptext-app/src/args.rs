use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Select a screen region, OCR it and copy the text")]
pub struct Args {
    /// Config file, relative paths resolve against --base-dir
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Directory holding res/ and tmp/
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use global_hotkey::hotkey::HotKey;
use snaptext_config::{Config, ConfigError};
use snaptext_io::{Notice, NoticeStyle};
use snaptext_ocr::HotkeyError;

/// Title used before the config, and with it the configured title, is known
pub const DEFAULT_NOTICE_TITLE: &str = "Screenshot OCR";

/// Files and directories the app relies on, all under one base directory
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub base_dir: PathBuf,
    pub config: PathBuf,
    pub icon: PathBuf,
    pub tmp_dir: PathBuf,
    /// Reused for every capture, never content-addressed
    pub capture: PathBuf,
}

impl AppPaths {
    pub fn new(base_dir: impl Into<PathBuf>, config: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.into();
        let config = config.as_ref();
        let config = if config.is_absolute() {
            config.to_path_buf()
        } else {
            base_dir.join(config)
        };
        let tmp_dir = base_dir.join("tmp");

        Self {
            icon: base_dir.join("res").join("icon.ico"),
            capture: tmp_dir.join("tmp.png"),
            tmp_dir,
            config,
            base_dir,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to create temp directory {path}: {source}")]
    TempDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Required file is missing: {0}")]
    MissingIcon(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid hot-key: {0}")]
    Hotkey(#[from] HotkeyError),
}

impl StartupError {
    /// Text shown to the user in the exit notification
    pub fn user_message(&self) -> &'static str {
        match self {
            StartupError::TempDir { .. } => {
                "Could not create the temporary directory, the program will exit"
            }
            StartupError::MissingIcon(_) => "A required file is missing, the program will exit",
            StartupError::Config(_) => {
                "Failed to read the config file, please check it and try again"
            }
            StartupError::Hotkey(_) => {
                "The configured hot-key is not supported, please check the config and try again"
            }
        }
    }
}

/// Everything checked and loaded before any window or tray icon exists
#[derive(Debug)]
pub struct Startup {
    pub config: Config,
    pub hotkey: HotKey,
    pub paths: AppPaths,
}

impl Startup {
    pub fn notice_style(&self) -> NoticeStyle {
        NoticeStyle::new(
            self.config.notification.title.clone(),
            Duration::from_millis(self.config.notification.timeout_ms),
        )
        .with_icon(&self.paths.icon)
    }
}

pub fn preflight(paths: AppPaths) -> Result<Startup, StartupError> {
    tracing::debug!("Base directory: {}", paths.base_dir.display());

    fs::create_dir_all(&paths.tmp_dir).map_err(|source| StartupError::TempDir {
        path: paths.tmp_dir.clone(),
        source,
    })?;

    if !paths.icon.is_file() {
        return Err(StartupError::MissingIcon(paths.icon.clone()));
    }

    let config = snaptext_config::load_config(&paths.config)?;
    let hotkey = snaptext_ocr::parse_hotkey(&config.hotkey)?;

    tracing::info!(
        "Startup checks passed (endpoint {}, hot-key {})",
        config.url,
        config.hotkey
    );

    Ok(Startup {
        config,
        hotkey,
        paths,
    })
}

/// Notice announcing that the app is about to exit
pub fn fatal_notice(error: &StartupError, paths: &AppPaths) -> Notice {
    let notice = Notice::new(DEFAULT_NOTICE_TITLE, error.user_message());
    if paths.icon.is_file() {
        notice.with_icon(&paths.icon)
    } else {
        notice
    }
}

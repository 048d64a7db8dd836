use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::theme::Theme;

const DICT_NAME: &str = "prefs";
const KEY_THEME: &str = "theme";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no home directory to keep preferences in")]
    NoDataDir,

    #[error("stored value is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Platform data directory for this app, e.g. `~/.local/share/stopwatch`.
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "stopwatch")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}

/// Small key/value store: one file per key under `<root>/<dict>/`.
pub struct PrefStorage {
    root: PathBuf,
}

impl PrefStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(DICT_NAME).join(key)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut file = match fs::File::open(self.key_path(key)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(Some(String::from_utf8(buf)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = fs::File::create(&path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    pub fn load_theme(&self) -> Theme {
        match self.get(KEY_THEME) {
            Ok(Some(value)) => Theme::parse(&value),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::error!("Failed to load theme: {}", e);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) {
        match self.set(KEY_THEME, theme.as_str()) {
            Ok(()) => log::debug!("saved theme {}", theme.as_str()),
            Err(e) => log::error!("Failed to save theme: {}", e),
        }
    }
}

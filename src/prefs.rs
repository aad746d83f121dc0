//! Persistent light/dark theme preference.
//!
//! A single value stored as plain text in the preference directory. Read
//! once at startup and written on every toggle.

use crate::config;
use crate::error::{Result, SpoilerError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl FromStr for Theme {
    type Err = SpoilerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(SpoilerError::InvalidArgument(format!(
                "unknown theme: {other}"
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File-backed store for the [`Theme`] preference.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    /// Store under `dir`, or the platform config directory when `None`.
    pub fn new(dir: Option<PathBuf>) -> Self {
        let dir = dir.unwrap_or_else(config::default_prefs_dir);
        Self {
            path: dir.join(config::THEME_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, `None` if nothing has been saved yet.
    pub fn read(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        contents.parse().map(Some)
    }

    /// Stored theme, falling back to the default on any problem.
    pub fn load(&self) -> Theme {
        match self.read() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable theme preference");
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, theme.as_str())?;
        Ok(())
    }

    /// Flip `current`, persist it and return the new theme.
    pub fn toggle(&self, current: Theme) -> Result<Theme> {
        let next = current.toggled();
        self.save(next)?;
        Ok(next)
    }

    /// Remove the stored preference.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

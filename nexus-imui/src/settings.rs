//! Persisted UI settings: style plus saved window placements.
//!
//! The engine never touches disk on its own. Hosts load settings at startup,
//! `restore` them into a fresh context, and `capture` + `save` on shutdown.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::context::Context;
use crate::primitives::Rect;
use crate::style::Style;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a window was last seen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowPlacement {
    pub rect: Rect,
    /// Host-defined dock slot, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dock: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub style: Style,
    /// Keyed by window title.
    pub windows: BTreeMap<String, WindowPlacement>,
}

impl UiSettings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!(path = %path.display(), windows = self.windows.len(), "settings saved");
        Ok(())
    }

    /// Apply the style and pre-place every saved window.
    pub fn restore(&self, ctx: &mut Context) {
        ctx.style = self.style.clone();
        for (name, placement) in &self.windows {
            ctx.restore_window(name, placement.rect);
        }
    }

    /// Record the current rectangle of each named window that exists.
    /// Dock slots of already-known windows are kept.
    pub fn capture<'n>(&mut self, ctx: &Context, names: impl IntoIterator<Item = &'n str>) {
        self.style = ctx.style.clone();
        for name in names {
            if let Some(rect) = ctx.window_rect(name) {
                self.windows.entry(name.to_owned()).or_default().rect = rect;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::text::MonospaceMetrics;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = UiSettings::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, UiSettings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(UiSettings::load(&path), Err(SettingsError::Json(_))));
    }

    #[test]
    fn save_then_load_keeps_windows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ui.json");
        let mut settings = UiSettings::default();
        settings.windows.insert(
            "Log".to_owned(),
            WindowPlacement {
                rect: Rect::new(10.0, 20.0, 300.0, 200.0),
                dock: Some(2),
            },
        );
        settings.save(&path).unwrap();

        let loaded = UiSettings::load(&path).unwrap();
        assert_eq!(loaded.windows, settings.windows);
    }

    #[test]
    fn restore_and_capture_round_trip_through_context() {
        let mut settings = UiSettings::default();
        let placed = Rect::new(40.0, 40.0, 250.0, 180.0);
        settings.windows.insert(
            "Tools".to_owned(),
            WindowPlacement {
                rect: placed,
                dock: Some(1),
            },
        );

        let mut ctx = Context::new(MonospaceMetrics::default());
        settings.restore(&mut ctx);
        ctx.begin();
        // The saved rect wins over the initial one.
        assert!(ctx.begin_window("Tools", Rect::new(0.0, 0.0, 10.0, 10.0), Options::empty()));
        ctx.end_window();
        ctx.end().unwrap();
        assert_eq!(ctx.window_rect("Tools"), Some(placed));

        let mut captured = UiSettings::default();
        captured.windows.insert(
            "Tools".to_owned(),
            WindowPlacement {
                rect: Rect::ZERO,
                dock: Some(1),
            },
        );
        captured.capture(&ctx, ["Tools", "Missing"]);
        assert_eq!(captured.windows["Tools"].rect, placed);
        assert_eq!(captured.windows["Tools"].dock, Some(1));
        assert!(!captured.windows.contains_key("Missing"));
    }
}

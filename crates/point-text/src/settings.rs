//! Persisted generation settings, stored as a JSON object keyed by field id.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, GenerationParams, InvalidParameterError};

/// Settings file used when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = ".point-text.json";

/// The last-used value of every input field.
///
/// Keys missing from a stored file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub text: String,
    pub font: String,
    pub point_size: f64,
    /// Angular steps per half-ring
    pub density: u32,
    pub rings: u32,
    pub jitter: f64,
    pub spread: f64,
    /// Radians
    pub tilt: f64,
    pub color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&GenerationParams::default())
    }
}

impl From<&GenerationParams> for Settings {
    fn from(params: &GenerationParams) -> Self {
        Self {
            text: params.text.clone(),
            font: params.font.clone(),
            point_size: params.point_size,
            density: params.steps,
            rings: params.rings,
            jitter: params.jitter,
            spread: params.spread,
            tilt: params.tilt,
            color: params.color.clone(),
        }
    }
}

impl From<Settings> for GenerationParams {
    fn from(settings: Settings) -> Self {
        Self {
            text: settings.text,
            font: settings.font,
            point_size: settings.point_size,
            steps: settings.density,
            rings: settings.rings,
            jitter: settings.jitter,
            spread: settings.spread,
            tilt: settings.tilt,
            color: settings.color,
        }
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> InvalidParameterError {
    InvalidParameterError {
        name,
        reason: reason.into(),
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults if it does not exist yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        serde_json::from_str(&content).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Reject input the form would never produce.
    pub fn check(&self) -> Result<(), InvalidParameterError> {
        let finite = [
            ("pointSize", self.point_size),
            ("jitter", self.jitter),
            ("spread", self.spread),
            ("tilt", self.tilt),
        ];
        if let Some(&(name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(name, format!("must be a finite number, got {value}")));
        }

        if self.point_size < 0.0 {
            return Err(invalid("pointSize", "must not be negative"));
        }
        if self.jitter < 0.0 {
            return Err(invalid("jitter", "must not be negative"));
        }
        if self.density == 0 {
            return Err(invalid("density", "must be at least 1"));
        }
        if self.spread == 0.0 {
            return Err(invalid("spread", "must not be zero"));
        }
        Ok(())
    }
}

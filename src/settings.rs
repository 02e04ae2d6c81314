//! Runtime configuration for tendril motion and drawing.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::{
    DEFAULT_CONTACT_RADIUS, DEFAULT_FADE_FRAMES, DEFAULT_SPEED, DEFAULT_THICKNESS,
    DEFAULT_TURN_ACCELERATION, DEFAULT_TURN_RATE,
};

/// Tunables shared by every tendril in a world.
///
/// Inserted as a resource by `TendrilPlugin` unless the host provides its
/// own. Each tendril copies the settings at construction, so later changes
/// only affect tendrils created afterwards.
///
/// # Examples
///
/// ```
/// use magic_tendril::TendrilSettings;
///
/// let settings = TendrilSettings::from_json_str(r#"{ "speed": 2.5 }"#)
///     .expect("valid settings");
/// assert!((settings.speed - 2.5).abs() < f32::EPSILON);
/// assert_eq!(settings.fade_frames, TendrilSettings::default().fade_frames);
/// ```
#[derive(Resource, Reflect, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[reflect(Resource, Default)]
#[serde(default, deny_unknown_fields)]
pub struct TendrilSettings {
    /// Distance the lead travels per frame, in world units.
    pub speed: f32,
    /// Base steering allowance per frame, in radians.
    pub turn_rate: f32,
    /// Extra steering allowance granted per elapsed frame, in radians.
    pub turn_acceleration: f32,
    /// Inclusive lead-to-sink distance counted as touching.
    pub contact_radius: f32,
    /// Drawn width of the tendril segment.
    pub thickness: f32,
    /// Frames a terminated node lingers while fading; `0` removes it at once.
    pub fade_frames: u32,
}

impl Default for TendrilSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
            turn_acceleration: DEFAULT_TURN_ACCELERATION,
            contact_radius: DEFAULT_CONTACT_RADIUS,
            thickness: DEFAULT_THICKNESS,
            fade_frames: DEFAULT_FADE_FRAMES,
        }
    }
}

impl TendrilSettings {
    /// Parses settings from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON or unknown fields
    /// and [`SettingsError::Invalid`] when a value fails [`Self::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a JSON settings file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|source| SettingsError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks every field lies within its accepted domain.
    ///
    /// # Errors
    /// Returns the first offending field as [`SettingsError::Invalid`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("speed", self.speed, |v| v > 0.0, "must be finite and positive")?;
        check(
            "turn_rate",
            self.turn_rate,
            |v| v >= 0.0,
            "must be finite and non-negative",
        )?;
        check(
            "turn_acceleration",
            self.turn_acceleration,
            |v| v >= 0.0,
            "must be finite and non-negative",
        )?;
        check(
            "contact_radius",
            self.contact_radius,
            |v| v >= 0.0,
            "must be finite and non-negative",
        )?;
        check(
            "thickness",
            self.thickness,
            |v| v > 0.0,
            "must be finite and positive",
        )
    }
}

fn check(
    field: &'static str,
    value: f32,
    accept: impl Fn(f32) -> bool,
    reason: &'static str,
) -> Result<(), SettingsError> {
    if value.is_finite() && accept(value) {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            value,
            reason,
        })
    }
}

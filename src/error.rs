//! Error types surfaced by tendrils and their settings.
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which end of a tendril a ball handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorRole {
    Source,
    Sink,
}

impl fmt::Display for AnchorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Sink => f.write_str("sink"),
        }
    }
}

/// Failures raised while creating or advancing a tendril.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TendrilError<H: fmt::Debug> {
    /// A ball handle no longer resolves in the registry.
    #[error("{role} ball {ball:?} no longer exists")]
    AnchorLost {
        /// End of the tendril whose ball vanished.
        role: AnchorRole,
        /// The dangling handle.
        ball: H,
    },
}

/// Failures raised while loading or validating [`crate::TendrilSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field was present but outside its accepted domain.
    #[error("invalid `{field}` = {value}: {reason}")]
    Invalid {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

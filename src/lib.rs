#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate providing magic tendrils: frame-driven links that grow from a
//! source ball toward a sink ball and report when they touch it.
//!
//! The [`tendril`] core is independent of any engine; [`TendrilPlugin`]
//! hosts it inside a Bevy app.
pub mod components;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod plugin;
pub mod presentation;
pub mod settings;
pub mod tendril;
pub use constants::*;

// Re-export commonly used items
pub use components::{Ball, Dissolving, TendrilNode, TendrilRequest};
pub use error::{AnchorRole, SettingsError, TendrilError};
pub use geometry::TendrilPose;
pub use logging::init as init_logging;
pub use plugin::{
    attach_requested_tendrils_system, update_tendrils_system, TendrilContactChanged,
    TendrilFault, TendrilPlugin, TendrilSystems, TerminateTendril,
};
pub use presentation::{dissolve_tendrils_system, BallLookup, NodePresentation};
pub use settings::TendrilSettings;
pub use tendril::{BallRegistry, Presentation, Tendril, TendrilState};

pub mod prelude {
    //! Prelude exports used by host applications.
    //!
    //! ```rust,no_run
    //! use magic_tendril::prelude::*;
    //! ```

    pub use crate::Ball;
    pub use crate::TendrilContactChanged;
    pub use crate::TendrilNode;
    pub use crate::TendrilPlugin;
    pub use crate::TendrilRequest;
    pub use crate::TendrilSettings;
    pub use crate::TerminateTendril;
}

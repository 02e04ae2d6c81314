//! ECS component types used by the tendril plugin.
//! Includes the ball marker, spawn requests, live tendril nodes, and fade-out state.
use bevy::prelude::*;

use crate::tendril::Tendril;

/// Marks an entity as a ball a tendril can anchor to.
///
/// The ball's position is its local `Transform` translation on the xy plane,
/// so balls are expected to be root entities; a ball parented under another
/// entity would be read at its offset from the parent.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Ball;

/// Asks the plugin to grow a tendril on this entity.
///
/// The entity spawned with the request becomes the tendril's scene node, so
/// the host can keep its id for later [`crate::TerminateTendril`] events.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct TendrilRequest {
    pub source: Entity,
    pub sink: Entity,
    /// Initial heading in radians, counter-clockwise from +x.
    pub angle: f32,
}

impl TendrilRequest {
    #[must_use]
    pub const fn new(source: Entity, sink: Entity, angle: f32) -> Self {
        Self {
            source,
            sink,
            angle,
        }
    }
}

/// A live (or terminated but still fading) tendril owned by its scene node.
#[derive(Component, Debug)]
pub struct TendrilNode {
    pub(crate) tendril: Tendril<Entity>,
}

impl TendrilNode {
    pub(crate) const fn new(tendril: Tendril<Entity>) -> Self {
        Self { tendril }
    }

    /// Read-only view of the underlying tendril.
    #[must_use]
    pub const fn tendril(&self) -> &Tendril<Entity> {
        &self.tendril
    }

    #[must_use]
    pub const fn is_touching_target(&self) -> bool {
        self.tendril.is_touching_target()
    }
}

/// Countdown for a detached node that is fading out before removal.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dissolving {
    pub(crate) remaining: u32,
    pub(crate) total: u32,
}

impl Dissolving {
    #[must_use]
    pub const fn new(frames: u32) -> Self {
        Self {
            remaining: frames,
            total: frames,
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Share of the fade still to play, from `1.0` down to `0.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "Fade lengths are a handful of frames."
        )]
        let share = self.remaining as f32 / self.total as f32;
        share
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use static_assertions::assert_impl_all;

    assert_impl_all!(TendrilNode: Send, Sync);
    assert_impl_all!(TendrilRequest: Send, Sync, Copy);

    #[test]
    fn dissolving_fraction_counts_down() {
        let mut fade = Dissolving::new(4);
        assert_relative_eq!(fade.fraction(), 1.0);
        fade.remaining = 1;
        assert_relative_eq!(fade.fraction(), 0.25);
    }

    #[test]
    fn empty_fade_is_fully_gone() {
        assert_relative_eq!(Dissolving::new(0).fraction(), 0.0);
    }
}

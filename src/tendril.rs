//! Framework-agnostic tendril lifecycle.
//!
//! A [`Tendril`] links a source ball to a sink ball. Its lead grows out of
//! the source along the initial angle, steers toward the sink once per
//! frame, and reports whether it currently touches the sink. Balls are read
//! through a [`BallRegistry`] so the tendril never owns them, and the scene
//! graph is reached through an injected [`Presentation`].

use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use glam::Vec2;
use hashbrown::HashMap;
use log::{debug, info};

use crate::error::{AnchorRole, TendrilError};
use crate::geometry::{heading_from_angle, steer_towards, TendrilPose};
use crate::settings::TendrilSettings;

/// Read-only lookup of ball positions by handle.
///
/// Returning `None` means the handle is dangling: the ball was destroyed by
/// its owner.
pub trait BallRegistry<H> {
    fn position_of(&self, ball: H) -> Option<Vec2>;
}

impl<H, S> BallRegistry<H> for HashMap<H, Vec2, S>
where
    H: Eq + Hash,
    S: BuildHasher,
{
    fn position_of(&self, ball: H) -> Option<Vec2> {
        self.get(&ball).copied()
    }
}

/// Scene-graph capability injected into a tendril.
///
/// `attach` is called once on construction and `detach` at most once, when
/// the tendril terminates. `redraw` follows every active update.
#[cfg_attr(test, mockall::automock)]
pub trait Presentation {
    fn attach(&mut self, label: &'static str, pose: TendrilPose);

    fn redraw(&mut self, _pose: TendrilPose) {}

    fn detach(&mut self);
}

/// Lifecycle state of a tendril. `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TendrilState {
    #[default]
    Active,
    Terminated,
}

/// A growing link from a source ball toward a sink ball.
#[derive(Debug, Clone, PartialEq)]
pub struct Tendril<H> {
    source: H,
    sink: H,
    angle: f32,
    lead: Vec2,
    heading: Vec2,
    frames: u32,
    touching_target: bool,
    state: TendrilState,
    settings: TendrilSettings,
}

impl<H> Tendril<H>
where
    H: Copy + Eq + Debug,
{
    /// Scene-graph label shared by every tendril.
    pub const NAME: &'static str = "MagicTendril";

    /// Returns [`Self::NAME`].
    #[must_use]
    pub const fn name() -> &'static str {
        Self::NAME
    }

    /// Creates a tendril whose lead starts on the source ball, heading along
    /// `angle` (radians, counter-clockwise from +x).
    ///
    /// The new tendril is not touching its target, whatever the balls'
    /// positions; contact is only established by [`Self::update`].
    ///
    /// # Errors
    /// Returns [`TendrilError::AnchorLost`] when `source` does not resolve.
    /// Nothing is attached in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use hashbrown::HashMap;
    /// use magic_tendril::{Presentation, Tendril, TendrilPose, TendrilSettings};
    ///
    /// struct Headless;
    /// impl Presentation for Headless {
    ///     fn attach(&mut self, _label: &'static str, _pose: TendrilPose) {}
    ///     fn detach(&mut self) {}
    /// }
    ///
    /// let balls = HashMap::from([(1_u8, Vec2::ZERO), (2, Vec2::new(10.0, 0.0))]);
    /// let tendril = Tendril::new(1, 2, 0.0, TendrilSettings::default(), &balls, &mut Headless)
    ///     .expect("source exists");
    /// assert!(!tendril.is_touching_target());
    /// ```
    pub fn new(
        source: H,
        sink: H,
        angle: f32,
        settings: TendrilSettings,
        balls: &impl BallRegistry<H>,
        presentation: &mut impl Presentation,
    ) -> Result<Self, TendrilError<H>> {
        let origin = balls.position_of(source).ok_or(TendrilError::AnchorLost {
            role: AnchorRole::Source,
            ball: source,
        })?;
        let tendril = Self {
            source,
            sink,
            angle,
            lead: origin,
            heading: heading_from_angle(angle),
            frames: 0,
            touching_target: false,
            state: TendrilState::Active,
            settings,
        };
        presentation.attach(Self::NAME, TendrilPose::new(origin, origin));
        info!("tendril created from {source:?} toward {sink:?} at angle {angle}");
        Ok(tendril)
    }

    /// Advances the tendril by one frame and recomputes the touching flag.
    ///
    /// Does nothing once terminated. A dangling source or sink terminates the
    /// tendril, detaching its node, and is reported as an error; the last
    /// touching value is kept.
    ///
    /// # Errors
    /// Returns [`TendrilError::AnchorLost`] naming the vanished ball.
    pub fn update(
        &mut self,
        balls: &impl BallRegistry<H>,
        presentation: &mut impl Presentation,
    ) -> Result<(), TendrilError<H>> {
        if self.is_terminated() {
            return Ok(());
        }
        let (base, target) = match self.resolve(balls) {
            Ok(anchors) => anchors,
            Err(err) => {
                self.terminate(presentation);
                return Err(err);
            }
        };

        self.advance(target);
        let was_touching = self.touching_target;
        self.touching_target = self.lead.distance(target) <= self.settings.contact_radius;
        self.frames = self.frames.saturating_add(1);
        if was_touching != self.touching_target {
            debug!(
                "tendril {:?}->{:?} touching={} after {} frames",
                self.source, self.sink, self.touching_target, self.frames
            );
        }
        presentation.redraw(TendrilPose::new(base, self.lead));
        Ok(())
    }

    /// Ends the tendril and detaches its node. Idempotent.
    pub fn terminate(&mut self, presentation: &mut impl Presentation) {
        if self.is_terminated() {
            return;
        }
        self.state = TendrilState::Terminated;
        presentation.detach();
        info!(
            "tendril {:?}->{:?} terminated after {} frames",
            self.source, self.sink, self.frames
        );
    }

    fn resolve(&self, balls: &impl BallRegistry<H>) -> Result<(Vec2, Vec2), TendrilError<H>> {
        let base = balls
            .position_of(self.source)
            .ok_or(TendrilError::AnchorLost {
                role: AnchorRole::Source,
                ball: self.source,
            })?;
        let target = balls.position_of(self.sink).ok_or(TendrilError::AnchorLost {
            role: AnchorRole::Sink,
            ball: self.sink,
        })?;
        Ok((base, target))
    }

    fn advance(&mut self, target: Vec2) {
        let to_sink = target - self.lead;
        if to_sink.length() <= self.settings.speed {
            // Within one step: capture the sink outright.
            if let Some(direction) = to_sink.try_normalize() {
                self.heading = direction;
            }
            self.lead = target;
            return;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "Frame counts stay far below f32's exact integer range."
        )]
        let allowance =
            self.settings.turn_rate + self.frames as f32 * self.settings.turn_acceleration;
        self.heading = steer_towards(self.heading, to_sink, allowance);
        self.lead += self.heading * self.settings.speed;
    }

    /// Current segment geometry, if the source ball still exists.
    #[must_use]
    pub fn pose(&self, balls: &impl BallRegistry<H>) -> Option<TendrilPose> {
        balls
            .position_of(self.source)
            .map(|base| TendrilPose::new(base, self.lead))
    }

    /// Whether the lead touched the sink on the most recent update.
    #[must_use]
    pub const fn is_touching_target(&self) -> bool {
        self.touching_target
    }

    #[must_use]
    pub const fn source(&self) -> H {
        self.source
    }

    #[must_use]
    pub const fn sink(&self) -> H {
        self.sink
    }

    /// Initial heading in radians, as given at construction.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    #[must_use]
    pub const fn lead(&self) -> Vec2 {
        self.lead
    }

    #[must_use]
    pub const fn heading(&self) -> Vec2 {
        self.heading
    }

    /// Number of active updates applied so far.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    #[must_use]
    pub const fn state(&self) -> TendrilState {
        self.state
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state == TendrilState::Terminated
    }

    #[must_use]
    pub const fn settings(&self) -> &TendrilSettings {
        &self.settings
    }
}

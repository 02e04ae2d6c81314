//! Scene-graph side of tendrils.
//!
//! [`NodePresentation`] implements the core [`Presentation`] capability on
//! top of Bevy `Commands`: a tendril is one entity whose `Transform` stretches
//! a unit quad from the source ball to the lead. [`BallLookup`] gives the
//! core read access to ball positions. Neither infers gameplay state; the
//! core tendril stays the only source of truth for contact.

use bevy::prelude::*;
use bevy_ecs::system::SystemParam;

use crate::components::{Ball, Dissolving};
use crate::geometry::TendrilPose;
use crate::settings::TendrilSettings;
use crate::tendril::{BallRegistry, Presentation};
use crate::TENDRIL_Z;

/// Tint applied to tendril sprites.
#[cfg(feature = "render")]
pub const TENDRIL_COLOR: Color = Color::srgb(0.55, 0.85, 1.0);

/// Ball positions read from `Transform`s of entities marked [`Ball`].
///
/// The local translation is used as the world position, so balls must be
/// root entities rather than children of a moving parent.
#[derive(SystemParam)]
pub struct BallLookup<'w, 's> {
    balls: Query<'w, 's, &'static Transform, With<Ball>>,
}

impl BallRegistry<Entity> for BallLookup<'_, '_> {
    fn position_of(&self, ball: Entity) -> Option<Vec2> {
        self.balls
            .get(ball)
            .ok()
            .map(|transform| transform.translation.truncate())
    }
}

/// Builds the transform stretching a unit quad over `pose`.
///
/// # Examples
///
/// ```
/// use bevy::math::Vec2;
/// use magic_tendril::geometry::TendrilPose;
/// use magic_tendril::presentation::segment_transform;
///
/// let transform = segment_transform(TendrilPose::new(Vec2::ZERO, Vec2::new(6.0, 0.0)), 2.0);
/// assert!((transform.translation.x - 3.0).abs() < 1e-6);
/// assert!((transform.scale.x - 6.0).abs() < 1e-6);
/// assert!((transform.scale.y - 2.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn segment_transform(pose: TendrilPose, thickness: f32) -> Transform {
    Transform {
        translation: pose.midpoint().extend(TENDRIL_Z),
        rotation: Quat::from_rotation_z(pose.rotation()),
        scale: Vec3::new(pose.length(), thickness, 1.0),
    }
}

/// [`Presentation`] writing to a single tendril node through `Commands`.
pub struct NodePresentation<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    node: Entity,
    thickness: f32,
    fade_frames: u32,
}

impl<'a, 'w, 's> NodePresentation<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, node: Entity, settings: &TendrilSettings) -> Self {
        Self {
            commands,
            node,
            thickness: settings.thickness,
            fade_frames: settings.fade_frames,
        }
    }
}

impl Presentation for NodePresentation<'_, '_, '_> {
    fn attach(&mut self, label: &'static str, pose: TendrilPose) {
        let mut node = self.commands.entity(self.node);
        node.insert((Name::new(label), segment_transform(pose, self.thickness)));
        #[cfg(feature = "render")]
        node.insert(Sprite::from_color(TENDRIL_COLOR, Vec2::ONE));
    }

    fn redraw(&mut self, pose: TendrilPose) {
        self.commands
            .entity(self.node)
            .insert(segment_transform(pose, self.thickness));
    }

    fn detach(&mut self) {
        if self.fade_frames == 0 {
            self.commands.entity(self.node).despawn();
        } else {
            self.commands
                .entity(self.node)
                .insert(Dissolving::new(self.fade_frames));
        }
    }
}

/// Counts fading nodes down and despawns them when the fade completes.
pub fn dissolve_tendrils_system(
    mut commands: Commands,
    mut dissolving: Query<(Entity, &mut Dissolving)>,
) {
    for (entity, mut fade) in &mut dissolving {
        if fade.remaining == 0 {
            commands.entity(entity).despawn();
        } else {
            fade.remaining -= 1;
        }
    }
}

/// Scales sprite alpha with the remaining fade.
///
/// Runs after [`dissolve_tendrils_system`] so the last visible frame is drawn
/// fully transparent.
#[cfg(feature = "render")]
pub fn fade_dissolving_sprites_system(mut sprites: Query<(&Dissolving, &mut Sprite)>) {
    use bevy::color::Alpha;

    for (fade, mut sprite) in &mut sprites {
        sprite.color.set_alpha(fade.fraction());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn segment_transform_sits_behind_balls() {
        let transform = segment_transform(TendrilPose::new(Vec2::ZERO, Vec2::ZERO), 1.0);
        assert!(transform.translation.z < 0.0);
    }

    #[test]
    fn segment_transform_rotates_with_pose() {
        let pose = TendrilPose::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 5.0));
        let transform = segment_transform(pose, 3.0);
        assert_relative_eq!(transform.translation.y, 3.0);
        assert_relative_eq!(transform.scale.x, 4.0);
        let (axis, angle) = transform.rotation.to_axis_angle();
        assert_relative_eq!(axis.z.abs(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn lookup_reads_ball_translation() {
        let mut world = World::new();
        let ball = world.spawn((Ball, Transform::from_xyz(2.0, -3.0, 7.0))).id();
        let stranger = world.spawn(Transform::default()).id();

        let mut state = bevy::ecs::system::SystemState::<BallLookup>::new(&mut world);
        let lookup = state.get(&world);
        assert_eq!(lookup.position_of(ball), Some(Vec2::new(2.0, -3.0)));
        assert_eq!(lookup.position_of(stranger), None);
    }

    #[test]
    fn parented_ball_is_read_at_its_local_offset() {
        let mut world = World::new();
        let parent = world.spawn(Transform::from_xyz(10.0, 10.0, 0.0)).id();
        let ball = world
            .spawn((Ball, Transform::from_xyz(1.0, 0.0, 0.0), ChildOf(parent)))
            .id();

        let mut state = bevy::ecs::system::SystemState::<BallLookup>::new(&mut world);
        let lookup = state.get(&world);
        assert_eq!(lookup.position_of(ball), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn dissolve_despawns_after_countdown() {
        let mut world = World::new();
        let node = world.spawn(Dissolving::new(2)).id();
        let mut schedule = bevy::ecs::schedule::Schedule::default();
        schedule.add_systems(dissolve_tendrils_system);

        schedule.run(&mut world);
        schedule.run(&mut world);
        assert!(world.get_entity(node).is_ok());
        schedule.run(&mut world);
        assert!(world.get_entity(node).is_err());
    }

    #[cfg(feature = "render")]
    #[test]
    fn fade_reaches_transparent_before_despawn() {
        let mut world = World::new();
        let node = world
            .spawn((Dissolving::new(2), Sprite::from_color(TENDRIL_COLOR, Vec2::ONE)))
            .id();
        let mut schedule = bevy::ecs::schedule::Schedule::default();
        schedule.add_systems((dissolve_tendrils_system, fade_dissolving_sprites_system).chain());

        let mut alphas = Vec::new();
        while let Some(sprite) = {
            schedule.run(&mut world);
            world.get::<Sprite>(node)
        } {
            alphas.push(sprite.color.alpha());
        }
        assert_eq!(alphas.len(), 2);
        assert_relative_eq!(alphas[0], 0.5);
        assert_relative_eq!(alphas[1], 0.0);
    }
}

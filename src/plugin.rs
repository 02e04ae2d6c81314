//! Bevy plugin wiring tendrils into the frame schedule.
//!
//! The host spawns [`TendrilRequest`]s next to its [`Ball`]s; the plugin
//! grows them into [`TendrilNode`]s, advances each exactly once per `Update`,
//! and reports contact changes and faults as observer events.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, info, warn};
use thiserror::Error;

use crate::components::{Ball, TendrilNode, TendrilRequest};
use crate::error::TendrilError;
use crate::presentation::{dissolve_tendrils_system, BallLookup, NodePresentation};
use crate::settings::TendrilSettings;
use crate::tendril::Tendril;

#[cfg(feature = "render")]
use crate::presentation::fade_dissolving_sprites_system;

/// System set containing every tendril system, for host-side ordering.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TendrilSystems;

/// Raised when a tendril's lead starts or stops touching its sink.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TendrilContactChanged {
    pub tendril: Entity,
    pub sink: Entity,
    pub touching: bool,
}

/// Asks the plugin to terminate the tendril living on `tendril`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminateTendril {
    pub tendril: Entity,
}

/// Raised when a tendril cannot be created or loses one of its balls.
///
/// The tendril is already terminated (or was never attached) by the time
/// observers see this.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tendril {tendril:?}: {error}")]
pub struct TendrilFault {
    pub tendril: Entity,
    pub error: TendrilError<Entity>,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_tendril_fault(event: On<TendrilFault>) {
    warn!("{}", event.event());
}

/// Turns pending [`TendrilRequest`]s into live tendril nodes.
///
/// A request whose source ball is missing is despawned and reported as a
/// [`TendrilFault`].
pub fn attach_requested_tendrils_system(
    mut commands: Commands,
    balls: BallLookup,
    settings: Res<TendrilSettings>,
    requests: Query<(Entity, &TendrilRequest), Without<TendrilNode>>,
) {
    for (entity, request) in &requests {
        let created = {
            let mut presentation = NodePresentation::new(&mut commands, entity, &settings);
            Tendril::new(
                request.source,
                request.sink,
                request.angle,
                *settings,
                &balls,
                &mut presentation,
            )
        };
        match created {
            Ok(tendril) => {
                commands
                    .entity(entity)
                    .insert(TendrilNode::new(tendril))
                    .remove::<TendrilRequest>();
            }
            Err(error) => {
                commands.entity(entity).despawn();
                commands.trigger(TendrilFault {
                    tendril: entity,
                    error,
                });
            }
        }
    }
}

/// Advances every tendril by one frame.
pub fn update_tendrils_system(
    mut commands: Commands,
    balls: BallLookup,
    mut tendrils: Query<(Entity, &mut TendrilNode)>,
) {
    for (entity, mut node) in &mut tendrils {
        if node.tendril.is_terminated() {
            continue;
        }
        let settings = *node.tendril.settings();
        let was_touching = node.tendril.is_touching_target();
        let outcome = {
            let mut presentation = NodePresentation::new(&mut commands, entity, &settings);
            node.tendril.update(&balls, &mut presentation)
        };
        if let Err(error) = outcome {
            commands.trigger(TendrilFault {
                tendril: entity,
                error,
            });
            continue;
        }
        let touching = node.tendril.is_touching_target();
        if touching != was_touching {
            commands.trigger(TendrilContactChanged {
                tendril: entity,
                sink: node.tendril.sink(),
                touching,
            });
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn terminate_tendril(
    event: On<TerminateTendril>,
    mut commands: Commands,
    mut tendrils: Query<&mut TendrilNode>,
    pending: Query<(), (With<TendrilRequest>, Without<TendrilNode>)>,
) {
    let target = event.event().tendril;
    if pending.contains(target) {
        info!("cancelling tendril request {target:?} before it attached");
        commands.entity(target).despawn();
        return;
    }
    let Ok(mut node) = tendrils.get_mut(target) else {
        debug!("ignoring terminate for {target:?}: not a live tendril");
        return;
    };
    let settings = *node.tendril.settings();
    let mut presentation = NodePresentation::new(&mut commands, target, &settings);
    node.tendril.terminate(&mut presentation);
}

/// Bevy plugin installing tendril systems, observers, and settings.
///
/// # Examples
///
/// ```ignore
/// use bevy::prelude::*;
/// use magic_tendril::{Ball, TendrilPlugin, TendrilRequest};
///
/// let mut app = App::new();
/// app.add_plugins((MinimalPlugins, TendrilPlugin));
/// let source = app.world_mut().spawn((Ball, Transform::default())).id();
/// let sink = app.world_mut().spawn((Ball, Transform::from_xyz(10.0, 0.0, 0.0))).id();
/// app.world_mut().spawn(TendrilRequest::new(source, sink, 0.0));
/// app.update();
/// ```
#[derive(Debug, Default)]
pub struct TendrilPlugin;

impl Plugin for TendrilPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Ball>();
        app.register_type::<TendrilSettings>();
        app.init_resource::<TendrilSettings>();
        app.add_observer(log_tendril_fault);
        app.add_observer(terminate_tendril);

        #[cfg(feature = "render")]
        app.add_systems(
            Update,
            (
                attach_requested_tendrils_system,
                update_tendrils_system,
                dissolve_tendrils_system,
                fade_dissolving_sprites_system,
            )
                .chain()
                .in_set(TendrilSystems),
        );

        #[cfg(not(feature = "render"))]
        app.add_systems(
            Update,
            (
                attach_requested_tendrils_system,
                update_tendrils_system,
                dissolve_tendrils_system,
            )
                .chain()
                .in_set(TendrilSystems),
        );
    }
}

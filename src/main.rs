use std::path::PathBuf;

use bevy::ecs::prelude::On;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use magic_tendril::prelude::*;
use magic_tendril::init_logging;

/// Radius of the circle the sink ball wanders around.
const ORBIT_RADIUS: f32 = 180.0;
/// Angle added to each successive tendril's launch heading.
const LAUNCH_STEP: f32 = 1.1;

/// Magic tendril playground: one ball reaching for another
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON file overriding tendril settings
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

#[derive(Resource, Debug)]
struct Playground {
    source: Entity,
    sink: Entity,
    launches: u32,
}

#[derive(Component)]
struct Wanderer;

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
    let source = commands
        .spawn((
            Ball,
            Sprite::from_color(Color::srgb(1.0, 0.6, 0.2), Vec2::splat(24.0)),
            Transform::from_xyz(-ORBIT_RADIUS, 0.0, 0.0),
        ))
        .id();
    let sink = commands
        .spawn((
            Ball,
            Wanderer,
            Sprite::from_color(Color::srgb(0.4, 1.0, 0.5), Vec2::splat(24.0)),
            Transform::from_xyz(ORBIT_RADIUS, 0.0, 0.0),
        ))
        .id();
    commands.spawn(TendrilRequest::new(source, sink, 0.0));
    commands.insert_resource(Playground {
        source,
        sink,
        launches: 1,
    });
}

fn wander(time: Res<Time>, mut sinks: Query<&mut Transform, With<Wanderer>>) {
    let t = time.elapsed_secs() * 0.4;
    for mut transform in &mut sinks {
        transform.translation.x = ORBIT_RADIUS * t.cos();
        transform.translation.y = ORBIT_RADIUS * 0.6 * (2.0 * t).sin();
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn relaunch_on_contact(
    event: On<TendrilContactChanged>,
    mut commands: Commands,
    mut playground: ResMut<Playground>,
) {
    let contact = event.event();
    if !contact.touching {
        return;
    }
    info!("tendril {:?} reached {:?}", contact.tendril, contact.sink);
    commands.trigger(TerminateTendril {
        tendril: contact.tendril,
    });

    #[expect(
        clippy::cast_precision_loss,
        reason = "Launch counts stay small in an interactive session."
    )]
    let angle = playground.launches as f32 * LAUNCH_STEP;
    playground.launches += 1;
    commands.spawn(TendrilRequest::new(
        playground.source,
        playground.sink,
        angle,
    ));
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match args.settings {
        Some(path) => TendrilSettings::load(&path)?,
        None => TendrilSettings::default(),
    };
    info!("starting with {settings:?}");

    App::new()
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .insert_resource(settings)
        .add_plugins(TendrilPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, wander.before(magic_tendril::TendrilSystems))
        .add_observer(relaunch_on_contact)
        .run();
    Ok(())
}

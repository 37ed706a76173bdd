//! Bevy 2D presentation adapter for the elevator simulation.
//!
//! Mirrors the reference layout: two blue reservoirs on the right, the gray
//! platform with its black car in the middle, the green counterweight on the
//! left, cables up to the pulley line, and text readouts for water masses,
//! flow rate, and lifted mass.
//!
//! The engine is driven by a fixed 100 ms timer while the Play/Pause button
//! has it running; the engine itself never sees a Bevy type. On halt the
//! button relabels to "Restart", which rebuilds a fresh engine from the
//! stored config.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use tracing::info;

use crate::configuration::config::ElevatorConfig;
use crate::simulation::engine::Engine;
use crate::simulation::states::{HaltReason, Snapshot, TickOutcome};

/// Reference-space → screen-space scaling factor
const SCALE: f32 = 12.0;

/// Width of the reference scene in layout units
const SCENE_WIDTH: f32 = 15.0;

/// Wall-clock seconds between ticks
const TICK_INTERVAL: f32 = 0.1;

/// Scene shapes, one variant per sprite the sync system repositions.
#[derive(Component)]
enum SceneElement {
    TopReservoir,
    BottomReservoir,
    Platform,
    Car,
    Counterweight,
    ElevatorCable,
    CounterweightCable,
}

/// Text readouts updated every frame.
#[derive(Component)]
enum HudLabel {
    WaterTop,
    WaterBottom,
    FlowRate,
    LiftedMass,
}

/// Marker for the Play/Pause/Restart button caption.
#[derive(Component)]
struct PlayButtonLabel;

/// The engine plus everything needed to render and restart it.
#[derive(Resource)]
struct Sim {
    engine: Engine,
    config: ElevatorConfig,
    last: Snapshot,
    halted: Option<HaltReason>,
}

/// Frame clock: fires ticks while `running` is set. Starts paused, like the
/// reference demonstration.
#[derive(Resource)]
struct SimClock {
    timer: Timer,
    running: bool,
}

pub fn run_2d(engine: Engine, config: ElevatorConfig) {
    info!(
        "run_2d: starting Bevy 2D viewer, reservoir {} kg, height {} m",
        config.reservoir_capacity, config.height
    );

    let last = engine.snapshot();
    App::new()
        .insert_resource(Sim {
            engine,
            config,
            last,
            halted: None,
        })
        .insert_resource(SimClock {
            timer: Timer::from_seconds(TICK_INTERVAL, TimerMode::Repeating),
            running: false,
        })
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (drive_simulation, sync_scene, play_button_system))
        .run();
}

/// Map reference-space coordinates (x right, y up, origin bottom-left) to
/// world space centered on the camera.
fn to_world(x: f32, y: f32, scene_h: f32, z: f32) -> Vec3 {
    Vec3::new(
        (x - SCENE_WIDTH / 2.0) * SCALE,
        (y - scene_h / 2.0) * SCALE,
        z,
    )
}

fn scene_sprite(
    kind: SceneElement,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: Color,
    anchor: Anchor,
    scene_h: f32,
    z: f32,
) -> (SpriteBundle, SceneElement) {
    (
        SpriteBundle {
            sprite: Sprite {
                color,
                custom_size: Some(Vec2::new(w * SCALE, h * SCALE)),
                anchor,
                ..Default::default()
            },
            transform: Transform::from_translation(to_world(x, y, scene_h, z)),
            ..Default::default()
        },
        kind,
    )
}

fn hud_text(value: String, x: f32, y: f32, scene_h: f32, color: Color) -> Text2dBundle {
    Text2dBundle {
        text: Text::from_section(
            value,
            TextStyle {
                font_size: 18.0,
                color,
                ..Default::default()
            },
        ),
        transform: Transform::from_translation(to_world(x, y, scene_h, 1.0)),
        ..Default::default()
    }
}

/// Startup system: camera, scene shapes, readouts, legend, and the button.
fn setup_scene(mut commands: Commands, sim: Res<Sim>) {
    let cfg = &sim.config;
    let height = cfg.height as f32;
    let scene_h = height + 10.0;

    let blue = Color::srgb(0.25, 0.45, 0.9);
    let gray = Color::srgb(0.6, 0.6, 0.6);
    let black = Color::srgb(0.05, 0.05, 0.05);
    let green = Color::srgb(0.2, 0.7, 0.3);
    let cable = Color::srgb(0.3, 0.3, 0.3);

    commands.spawn(Camera2dBundle::default());

    // Reservoirs: top one hangs below the pulley line, bottom one sits on the
    // floor. Fill heights are resized per frame from the snapshot.
    commands.spawn(scene_sprite(
        SceneElement::TopReservoir,
        10.0,
        height + 5.0,
        3.0,
        5.0,
        blue,
        Anchor::TopLeft,
        scene_h,
        0.0,
    ));
    commands.spawn(scene_sprite(
        SceneElement::BottomReservoir,
        10.0,
        0.0,
        3.0,
        0.0,
        blue,
        Anchor::BottomLeft,
        scene_h,
        0.0,
    ));

    // Elevator platform, car, counterweight
    commands.spawn(scene_sprite(
        SceneElement::Platform,
        5.0,
        0.0,
        3.0,
        1.0,
        gray,
        Anchor::BottomLeft,
        scene_h,
        0.0,
    ));
    commands.spawn(scene_sprite(
        SceneElement::Car,
        5.5,
        1.0,
        2.0,
        1.0,
        black,
        Anchor::BottomLeft,
        scene_h,
        0.0,
    ));
    commands.spawn(scene_sprite(
        SceneElement::Counterweight,
        2.0,
        height,
        2.0,
        2.0,
        green,
        Anchor::BottomLeft,
        scene_h,
        0.0,
    ));

    // Cables, resized per frame to reach the pulley line
    commands.spawn(scene_sprite(
        SceneElement::ElevatorCable,
        6.5,
        1.0,
        0.06,
        height - 1.0,
        cable,
        Anchor::BottomCenter,
        scene_h,
        -1.0,
    ));
    commands.spawn(scene_sprite(
        SceneElement::CounterweightCable,
        3.0,
        height + 2.0,
        0.06,
        0.0,
        cable,
        Anchor::BottomCenter,
        scene_h,
        -1.0,
    ));

    // Readouts
    commands.spawn((
        hud_text(
            format!("Water: {:.1} kg", cfg.reservoir_capacity),
            11.5,
            height + 7.0,
            scene_h,
            Color::WHITE,
        ),
        HudLabel::WaterTop,
    ));
    commands.spawn((
        hud_text("Water: 0.0 kg".to_string(), 11.5, 7.0, scene_h, Color::WHITE),
        HudLabel::WaterBottom,
    ));
    commands.spawn((
        hud_text("Flow Rate: 0.00 kg/s".to_string(), 11.5, 3.0, scene_h, blue),
        HudLabel::FlowRate,
    ));
    commands.spawn((
        hud_text(
            format!("Mass: {:.1} kg", cfg.platform_mass + cfg.car_mass),
            6.0,
            3.0,
            scene_h,
            Color::srgb(0.9, 0.2, 0.2),
        ),
        HudLabel::LiftedMass,
    ));

    // Title and legend
    commands.spawn(hud_text(
        "Elevator and Water Flow Simulation".to_string(),
        SCENE_WIDTH / 2.0,
        scene_h - 1.0,
        scene_h,
        Color::WHITE,
    ));
    commands.spawn(hud_text(
        format!("Platform ({:.0} kg)", cfg.platform_mass),
        2.5,
        scene_h - 2.5,
        scene_h,
        gray,
    ));
    commands.spawn(hud_text(
        format!("Car ({:.0} kg)", cfg.car_mass),
        2.5,
        scene_h - 4.0,
        scene_h,
        Color::WHITE,
    ));
    commands.spawn(hud_text(
        format!("Counterweight ({:.0} kg)", cfg.counterweight_mass),
        2.5,
        scene_h - 5.5,
        scene_h,
        green,
    ));

    // Play/Pause control, bottom-right like the reference
    commands
        .spawn(ButtonBundle {
            style: Style {
                position_type: PositionType::Absolute,
                right: Val::Px(24.0),
                bottom: Val::Px(24.0),
                width: Val::Px(110.0),
                height: Val::Px(40.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..Default::default()
            },
            background_color: BackgroundColor(Color::srgb(0.25, 0.25, 0.3)),
            ..Default::default()
        })
        .with_children(|parent| {
            parent.spawn((
                TextBundle::from_section(
                    "Play",
                    TextStyle {
                        font_size: 20.0,
                        color: Color::WHITE,
                        ..Default::default()
                    },
                ),
                PlayButtonLabel,
            ));
        });
}

/// Tick the engine at the fixed cadence while the clock is running.
fn drive_simulation(
    time: Res<Time>,
    mut clock: ResMut<SimClock>,
    mut sim: ResMut<Sim>,
    mut label_query: Query<&mut Text, With<PlayButtonLabel>>,
) {
    if !clock.running {
        return;
    }
    clock.timer.tick(time.delta());
    if !clock.timer.just_finished() {
        return;
    }

    let outcome = sim.engine.tick();
    match outcome {
        TickOutcome::Step(snapshot) => sim.last = snapshot,
        TickOutcome::Halt(reason) => {
            let final_state = sim.engine.snapshot();
            sim.last = final_state;
            sim.halted = Some(reason);
            clock.running = false;
            for mut text in &mut label_query {
                text.sections[0].value = "Restart".to_string();
            }
        }
    }
}

/// Render the latest snapshot onto the scene shapes and readouts.
fn sync_scene(
    sim: Res<Sim>,
    mut sprites: Query<(&SceneElement, &mut Sprite, &mut Transform, &mut Visibility)>,
    mut labels: Query<(&HudLabel, &mut Text, &mut Transform), Without<SceneElement>>,
) {
    let snapshot = &sim.last;
    let c = sim.engine.constants();
    let height = c.height as f32;
    let capacity = c.reservoir_capacity as f32;
    let scene_h = height + 10.0;

    let elevator_y = snapshot.elevator_position as f32;
    let counterweight_y = snapshot.counterweight_position as f32;
    let frac_top = if capacity > 0.0 {
        (snapshot.water_top as f32 / capacity).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let frac_bottom = if capacity > 0.0 {
        (snapshot.water_bottom as f32 / capacity).clamp(0.0, 1.0)
    } else {
        0.0
    };

    for (kind, mut sprite, mut transform, mut visibility) in &mut sprites {
        match kind {
            SceneElement::TopReservoir => {
                if let Some(size) = sprite.custom_size.as_mut() {
                    size.y = 5.0 * frac_top * SCALE;
                }
            }
            SceneElement::BottomReservoir => {
                if let Some(size) = sprite.custom_size.as_mut() {
                    size.y = 5.0 * frac_bottom * SCALE;
                }
            }
            SceneElement::Platform => {
                transform.translation = to_world(5.0, elevator_y, scene_h, 0.0);
            }
            SceneElement::Car => {
                transform.translation = to_world(5.5, elevator_y + 1.0, scene_h, 0.0);
                *visibility = if snapshot.car_attached {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                };
            }
            SceneElement::Counterweight => {
                transform.translation = to_world(2.0, counterweight_y, scene_h, 0.0);
            }
            SceneElement::ElevatorCable => {
                transform.translation = to_world(6.5, elevator_y + 1.0, scene_h, -1.0);
                if let Some(size) = sprite.custom_size.as_mut() {
                    size.y = (height - (elevator_y + 1.0)).max(0.0) * SCALE;
                }
            }
            SceneElement::CounterweightCable => {
                transform.translation = to_world(3.0, counterweight_y + 2.0, scene_h, -1.0);
                if let Some(size) = sprite.custom_size.as_mut() {
                    size.y = (height - (counterweight_y + 2.0)).max(0.0) * SCALE;
                }
            }
        }
    }

    for (kind, mut text, mut transform) in &mut labels {
        match kind {
            HudLabel::WaterTop => {
                text.sections[0].value = format!("Water: {:.1} kg", snapshot.water_top.max(0.0));
            }
            HudLabel::WaterBottom => {
                text.sections[0].value = format!(
                    "Water: {:.1} kg",
                    snapshot.water_bottom.min(c.reservoir_capacity)
                );
            }
            HudLabel::FlowRate => {
                text.sections[0].value = format!("Flow Rate: {:.2} kg/s", snapshot.flow_rate);
            }
            HudLabel::LiftedMass => {
                text.sections[0].value = format!("Mass: {:.1} kg", snapshot.lifted_mass);
                transform.translation = to_world(6.0, elevator_y + 3.0, scene_h, 1.0);
            }
        }
    }
}

/// Toggle Play/Pause; after a halt the button restarts with a fresh engine.
fn play_button_system(
    interactions: Query<&Interaction, (Changed<Interaction>, With<Button>)>,
    mut clock: ResMut<SimClock>,
    mut sim: ResMut<Sim>,
    mut label_query: Query<&mut Text, With<PlayButtonLabel>>,
) {
    for interaction in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }

        if sim.halted.is_some() {
            // Terminal states require reconstruction, not a resume. The
            // stored config already passed validation once.
            let config = sim.config.clone();
            if let Ok(engine) = Engine::new(&config) {
                sim.last = engine.snapshot();
                sim.engine = engine;
                sim.halted = None;
                clock.running = true;
                info!("simulation restarted");
            }
        } else {
            clock.running = !clock.running;
        }

        let caption = if clock.running { "Pause" } else { "Play" };
        for mut text in &mut label_query {
            text.sections[0].value = caption.to_string();
        }
    }
}

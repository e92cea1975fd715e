//! Level domain: the static collision layout, entity placement, and the
//! kill-gated exit.

use bevy::prelude::*;

use crate::combat::spawn::{spawn_enemy, spawn_player};
use crate::content::{ContentRegistry, SelectedCharacter};
use crate::core::{GameState, LevelProgress, SimSet};
use crate::movement::collision::{CollisionRects, overlaps};
use crate::movement::{HitboxGeometry, MovementTuning, Player};

const TERRAIN_COLOR: Color = Color::srgb(0.25, 0.25, 0.3);
const GATE_LOCKED_COLOR: Color = Color::srgb(0.35, 0.3, 0.3);
const GATE_UNLOCKED_COLOR: Color = Color::srgb(0.3, 0.85, 0.4);
const GATE_SIZE: Vec2 = Vec2::new(40.0, 110.0);

/// Outer extent of the playable area; projectiles despawn a margin past
/// it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LevelBounds(pub Rect);

impl Default for LevelBounds {
    fn default() -> Self {
        Self(Rect::new(-1400.0, -400.0, 1400.0, 600.0))
    }
}

/// The level exit. Spawns locked and opens once every enemy is down.
#[derive(Component, Debug)]
pub struct ExitGate {
    pub unlocked: bool,
}

pub struct LevelsPlugin;

impl Plugin for LevelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelBounds>()
            .add_systems(OnEnter(GameState::Playing), build_level)
            .add_systems(
                Update,
                (unlock_exit, check_exit_reached)
                    .chain()
                    .in_set(SimSet::Sweep)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Static layout: a long floor, boundary walls, and two raised
/// platforms. All solids go into [`CollisionRects`] and get a sprite.
fn terrain_rects() -> Vec<Rect> {
    vec![
        // Floor.
        Rect::new(-1400.0, -400.0, 1400.0, -200.0),
        // Boundary walls.
        Rect::new(-1450.0, -400.0, -1400.0, 600.0),
        Rect::new(1400.0, -400.0, 1450.0, 600.0),
        // Platforms.
        Rect::new(-300.0, -60.0, 100.0, -40.0),
        Rect::new(400.0, 20.0, 800.0, 40.0),
    ]
}

fn build_level(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    selection: Res<SelectedCharacter>,
    mut tuning: ResMut<MovementTuning>,
    mut rects: ResMut<CollisionRects>,
    mut progress: ResMut<LevelProgress>,
) {
    let terrain = terrain_rects();
    for rect in &terrain {
        commands.spawn((
            Sprite {
                color: TERRAIN_COLOR,
                custom_size: Some(rect.size()),
                ..default()
            },
            Transform::from_xyz(rect.center().x, rect.center().y, -1.0),
        ));
    }
    rects.0 = terrain;

    let character = selection
        .character_id
        .as_deref()
        .and_then(|id| registry.characters.get(id))
        .or_else(|| registry.characters.get("character_varen"))
        .or_else(|| registry.characters.values().next());
    let Some(character) = character else {
        error!("no playable characters in the registry");
        return;
    };

    // The shared movement tuning takes the chosen character's locomotion
    // numbers for this run.
    tuning.move_speed = character.move_speed;
    tuning.jump_velocity = character.jump_velocity;

    spawn_player(
        &mut commands,
        &registry,
        character,
        Vec2::new(-1100.0, -140.0),
    );

    let mut total_enemies = 0;
    if let Some(knight) = registry.enemies.get("enemy_knight") {
        spawn_enemy(&mut commands, knight, Vec2::new(-400.0, -150.0), Some(250.0));
        spawn_enemy(&mut commands, knight, Vec2::new(600.0, 90.0), Some(150.0));
        total_enemies += 2;
    }
    if let Some(mage) = registry.enemies.get("enemy_mage") {
        spawn_enemy(&mut commands, mage, Vec2::new(1000.0, -150.0), None);
        total_enemies += 1;
    }
    progress.reset(total_enemies);

    commands.spawn((
        ExitGate { unlocked: false },
        HitboxGeometry::new(Vec2::ZERO, GATE_SIZE),
        Sprite {
            color: GATE_LOCKED_COLOR,
            custom_size: Some(GATE_SIZE),
            ..default()
        },
        Transform::from_xyz(1330.0, -200.0 + GATE_SIZE.y * 0.5, -0.5),
    ));

    info!(
        "level built: {} solids, {} enemies",
        rects.0.len(),
        total_enemies
    );
}

fn unlock_exit(
    progress: Res<LevelProgress>,
    mut gates: Query<(&mut ExitGate, &mut Sprite)>,
) {
    if !progress.is_cleared() {
        return;
    }
    for (mut gate, mut sprite) in &mut gates {
        if !gate.unlocked {
            gate.unlocked = true;
            sprite.color = GATE_UNLOCKED_COLOR;
            info!("all enemies down, exit unlocked");
        }
    }
}

fn check_exit_reached(
    mut next_state: ResMut<NextState<GameState>>,
    players: Query<(&Transform, &HitboxGeometry), With<Player>>,
    gates: Query<(&Transform, &HitboxGeometry, &ExitGate), Without<Player>>,
) {
    let Some((player_transform, player_geometry)) = players.iter().next() else {
        return;
    };
    let player_hitbox = player_geometry.rect_at(player_transform.translation.truncate());

    for (gate_transform, gate_geometry, gate) in &gates {
        if !gate.unlocked {
            continue;
        }
        let gate_rect = gate_geometry.rect_at(gate_transform.translation.truncate());
        if overlaps(player_hitbox, gate_rect) {
            info!("exit reached");
            next_state.set(GameState::LevelComplete);
        }
    }
}

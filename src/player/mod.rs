use crate::camera::SpringArm;
use crate::combat::AttackState;
use crate::*;
use avian3d::prelude::*;
use bevy::scene::SceneInstanceReady;
use bevy_enhanced_input::prelude::*;
use bevy_tnua::TnuaAnimatingState;
use bevy_tnua::prelude::*;
use bevy_tnua_avian3d::*;
use std::time::Duration;

mod animation;
pub mod control;
pub mod control_mode;

pub use animation::*;
pub use control::{ControlState, MovementInput, apply_look, apply_move, steer_towards_direction};
pub use control_mode::{RotationPolicy, next_control_mode, switch_control_mode};

/// Character spawning, movement and animation.
/// Player logic is only active during the State `Screen::Gameplay`
pub fn plugin(app: &mut App) {
    app.add_plugins((
        TnuaControllerPlugin::new(FixedUpdate),
        TnuaAvian3dPlugin::new(FixedUpdate),
        control::plugin,
        control_mode::plugin,
    ));

    app.add_systems(OnEnter(Screen::Gameplay), spawn_player)
        .add_systems(
            Update,
            (animating, track_attack_montage)
                .chain()
                .in_set(CharacterSystems::PlayAnimations)
                .run_if(in_state(Screen::Gameplay)),
        );
}

/// Every component the character starts with, apart from its model.
pub fn player_bundle(cfg: &Config) -> impl Bundle {
    let mode = cfg.player.initial_mode;
    let profile = cfg.camera.profile(mode);
    let mut arm = SpringArm::new(&cfg.camera, mode);
    arm.snap();

    let player = Player {
        speed: cfg.player.movement.speed,
        ..default()
    };
    let collider = Collider::capsule(cfg.player.hitbox.radius, cfg.player.hitbox.height);

    (
        DespawnOnExit(Screen::Gameplay),
        Transform::from_translation(Vec3::from(cfg.player.spawn_pos)),
        player,
        PlayerCtx,
        // control state
        (
            mode,
            ControlRotation::default(),
            ControlState::default(),
            MovementInput::default(),
            RotationPolicy::from(profile),
            arm,
            AttackState::default(),
        ),
        // tnua character control bundles
        (
            TnuaController::default(),
            // Tnua can fix the rotation, but the character will still get rotated before it can do so.
            // By locking the rotation we can prevent this.
            LockedAxes::ROTATION_LOCKED.unlock_rotation_y(),
            TnuaAnimatingState::<AnimationState>::default(),
            // A sensor shape is not strictly necessary, but without it we'll get weird results.
            TnuaAvian3dSensorShape(collider.clone()),
        ),
        // physics
        (
            collider,
            RigidBody::Dynamic,
            Friction::ZERO.with_combine_rule(CoefficientCombine::Multiply),
        ),
        InheritedVisibility::default(), // silence the warning because of adding SceneRoot as a child
    )
}

/// Stand-in body for a character whose model didn't load, shaped like its hitbox.
pub fn placeholder_body(
    hitbox: &HitboxPreset,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> impl Bundle {
    (
        Name::new("Placeholder body"),
        Mesh3d(meshes.add(Capsule3d::new(hitbox.radius, hitbox.height))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.45, 0.25))),
    )
}

pub fn spawn_player(
    cfg: Res<Config>,
    models: Option<Res<Models>>,
    gltf_assets: Res<Assets<Gltf>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let mut player = commands.spawn(player_bundle(&cfg));
    info!(
        "spawned player {} in {} mode",
        player.id(),
        cfg.player.initial_mode.as_str()
    );

    // The character still moves without a model, it just has no animations to play.
    let scene = models
        .as_ref()
        .and_then(|models| gltf_assets.get(&models.player))
        .and_then(|gltf| gltf.scenes.first().cloned());
    let Some(scene) = scene else {
        warn!("player model unavailable, spawning a placeholder body without animations");
        player.with_child(placeholder_body(
            &cfg.player.hitbox,
            &mut meshes,
            &mut materials,
        ));
        return;
    };

    // spawn character mesh as child to adjust mesh position relative to the player origin
    player.with_children(|parent| {
        parent
            .spawn((
                Transform::from_xyz(0.0, cfg.player.mesh_offset, 0.0),
                SceneRoot(scene),
            ))
            .observe(prepare_animations);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_body_fills_the_hitbox() {
        let hitbox = HitboxPreset::default();
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();

        let mut world = World::new();
        let body = world
            .spawn(placeholder_body(&hitbox, &mut meshes, &mut materials))
            .id();

        let mesh = world.get::<Mesh3d>(body).unwrap();
        let positions = meshes
            .get(&mesh.0)
            .unwrap()
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|positions| positions.as_float3())
            .unwrap();
        let extents = positions
            .iter()
            .fold(Vec3::ZERO, |extents, p| extents.max(Vec3::from(*p).abs()));
        assert!((extents.x - hitbox.radius).abs() < 1.0e-3);
        assert!((extents.y - hitbox.half_height()).abs() < 1.0e-3);
        // the model offset puts the feet where the capsule ends
        let cfg = PlayerPreset::default();
        assert!((extents.y + cfg.mesh_offset).abs() < 1.0e-3);

        let material = world.get::<MeshMaterial3d<StandardMaterial>>(body).unwrap();
        assert!(materials.get(&material.0).is_some());
    }
}

//! The arena the character runs around in.
//! Scene logic is only active during the State `Screen::Gameplay`
use crate::*;
use avian3d::prelude::*;

const ARENA_HALF_SIZE: f32 = 20.0;
const PILLAR_RING_RADIUS: f32 = 9.0;
const PILLAR_COUNT: usize = 6;

pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default())
        .add_systems(OnEnter(Screen::Gameplay), setup);
}

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor = materials.add(Color::srgb(0.35, 0.38, 0.32));
    let stone = materials.add(Color::srgb(0.55, 0.52, 0.48));

    commands.spawn((
        Name::new("Floor"),
        DespawnOnExit(Screen::Gameplay),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(
            ARENA_HALF_SIZE * 2.0,
            ARENA_HALF_SIZE * 2.0,
        ))),
        MeshMaterial3d(floor),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
    ));

    // Pillars give the third person camera something to collide with.
    let pillar = meshes.add(Cuboid::new(1.0, 4.0, 1.0));
    for i in 0..PILLAR_COUNT {
        let angle = i as f32 / PILLAR_COUNT as f32 * std::f32::consts::TAU;
        let pos = Vec3::new(angle.cos(), 0.0, angle.sin()) * PILLAR_RING_RADIUS;
        commands.spawn((
            Name::new(format!("Pillar {i}")),
            DespawnOnExit(Screen::Gameplay),
            Mesh3d(pillar.clone()),
            MeshMaterial3d(stone.clone()),
            Transform::from_translation(pos + Vec3::Y * 2.0),
            RigidBody::Static,
            Collider::cuboid(1.0, 4.0, 1.0),
        ));
    }

    commands.spawn((
        Name::new("Sun"),
        DespawnOnExit(Screen::Gameplay),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // to see something on the shadowed side
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 500.0,
        ..Default::default()
    });
}

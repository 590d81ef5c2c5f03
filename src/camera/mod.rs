use crate::*;

mod spring_arm;

pub use spring_arm::*;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera)
        .add_systems(
            Update,
            smooth_spring_arm
                .in_set(CharacterSystems::SmoothCamera)
                .run_if(in_state(Screen::Gameplay)),
        )
        .add_systems(
            PostUpdate,
            position_camera
                .before(TransformSystems::Propagate)
                .run_if(in_state(Screen::Gameplay)),
        )
        .add_systems(OnEnter(Screen::Gameplay), apply_camera_fov);
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        SceneCamera,
        Camera3d::default(),
        Camera::default(),
        Transform::from_xyz(0., 10., 10.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn apply_camera_fov(cfg: Res<Config>, mut commands: Commands, camera: Query<Entity, With<SceneCamera>>) {
    let Ok(cam) = camera.single() else {
        return;
    };
    commands.entity(cam).insert(Projection::from(PerspectiveProjection {
        fov: cfg.camera.fov.to_radians(),
        ..Default::default()
    }));
}

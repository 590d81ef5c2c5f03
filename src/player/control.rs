use super::*;
use crate::models::Move;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            steer_towards_direction.in_set(CharacterSystems::Steer),
            apply_movement_input
                .in_set(CharacterSystems::Move)
                .in_set(TnuaUserControlsSystems),
        )
            .run_if(in_state(Screen::Gameplay)),
    )
    .add_observer(handle_move)
    .add_observer(stop_move)
    .add_observer(handle_look)
    .add_observer(handle_jump);
}

/// Overhead mode keeps the last move input here; it is consumed every frame by
/// [`steer_towards_direction`]. Stored as `(forward, right)`.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct ControlState {
    pub direction_to_move: Vec2,
}

/// World space movement requested this frame, summed over every input source.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, Deref, DerefMut)]
#[reflect(Component)]
pub struct MovementInput(pub Vec3);

impl MovementInput {
    pub fn add(&mut self, direction: Vec3) {
        self.0 += direction;
    }

    /// Take the accumulated input, clamped to unit length, and reset it.
    pub fn consume(&mut self) -> Vec3 {
        std::mem::take(&mut self.0).clamp_length_max(1.0)
    }
}

/// Route a move input sample according to the control mode.
pub fn apply_move(
    mode: ControlMode,
    control: ViewRotation,
    value: Vec2,
    state: &mut ControlState,
    input: &mut MovementInput,
) {
    match mode {
        ControlMode::Gta => input.add(control.movement_direction(value)),
        ControlMode::Diablo => state.direction_to_move = Vec2::new(value.y, value.x),
    }
}

/// Turn look input into control rotation. Overhead mode ignores it.
pub fn apply_look(mode: ControlMode, value: Vec2, cam: &CameraPreset, control: &mut ViewRotation) {
    if mode != ControlMode::Gta {
        return;
    }
    control.yaw -= value.x * cam.look_sensitivity;
    control.pitch += value.y * cam.look_sensitivity;
    *control = control
        .with_clamped_pitch(cam.min_pitch, cam.max_pitch)
        .normalized();
}

fn handle_move(
    on: On<Fire<Move>>,
    mut players: Query<(
        &ControlMode,
        &ControlRotation,
        &mut ControlState,
        &mut MovementInput,
    )>,
) -> Result {
    let (mode, control, mut state, mut input) = players.get_mut(on.context)?;
    apply_move(*mode, **control, on.value, &mut state, &mut input);
    Ok(())
}

fn stop_move(on: On<Complete<Move>>, mut players: Query<&mut ControlState>) {
    if let Ok(mut state) = players.get_mut(on.context) {
        state.direction_to_move = Vec2::ZERO;
    }
}

fn handle_look(
    on: On<Fire<Look>>,
    cfg: Res<Config>,
    mut players: Query<(&ControlMode, &mut ControlRotation)>,
) -> Result {
    let (mode, mut control) = players.get_mut(on.context)?;
    apply_look(*mode, on.value, &cfg.camera, &mut control.0);
    Ok(())
}

fn handle_jump(
    on: On<Fire<Jump>>,
    cfg: Res<Config>,
    mut players: Query<&mut TnuaController, With<Player>>,
) -> Result {
    let mut controller = players.get_mut(on.context)?;
    controller.action(TnuaBuiltinJump {
        height: cfg.player.jump.height,
        ..Default::default()
    });
    Ok(())
}

/// Overhead steering: face the stored direction and feed it as movement.
/// An idle stick keeps the last facing.
pub fn steer_towards_direction(
    mut players: Query<(
        &ControlMode,
        &ControlState,
        &mut ControlRotation,
        &mut MovementInput,
    )>,
) {
    for (mode, state, mut control, mut input) in players.iter_mut() {
        if *mode != ControlMode::Diablo {
            continue;
        }
        let direction = state.direction_to_move.ground_direction();
        if direction == Vec3::ZERO {
            continue;
        }
        **control = ViewRotation::from_direction(direction);
        input.add(direction);
    }
}

/// Tnua configuration is tricky to grasp from the get go, this is the best demo:
/// <https://github.com/idanarye/bevy-tnua/blob/main/demos/src/character_control_systems/platformer_control_systems.rs>
fn apply_movement_input(
    cfg: Res<Config>,
    mut players: Query<(
        &Player,
        &RotationPolicy,
        &ControlRotation,
        &mut MovementInput,
        &mut TnuaController,
    )>,
) {
    let movement_cfg = &cfg.player.movement;
    let float_height = cfg.player.hitbox.half_height() + movement_cfg.float_clearance;

    for (player, policy, control, mut input, mut controller) in players.iter_mut() {
        let movement = input.consume();
        controller.basis(TnuaBuiltinWalk {
            float_height,
            cling_distance: 0.25,
            desired_velocity: movement * player.speed,
            desired_forward: policy.desired_forward(movement, **control),
            acceleration: movement_cfg.acceleration,
            air_acceleration: movement_cfg.air_acceleration,
            turning_angvel: policy.turning_angvel(),
            ..Default::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Full right stick for `seconds`, sampled at `fps`, the way the stick binding scales it.
    fn turn_with_stick(fps: u32, seconds: f32) -> ViewRotation {
        let cam = CameraPreset::default();
        let mut control = ViewRotation::ZERO;
        let dt = 1.0 / fps as f32;
        for _ in 0..(seconds * fps as f32).round() as u32 {
            apply_look(
                ControlMode::Gta,
                Vec2::X * STICK_LOOK_RATE * dt,
                &cam,
                &mut control,
            );
        }
        control
    }

    #[test]
    fn stick_turn_speed_does_not_depend_on_frame_rate() {
        let slow = turn_with_stick(30, 0.5);
        let fast = turn_with_stick(144, 0.5);

        assert!((slow.yaw - -90.0).abs() < 1.0e-2, "yaw {}", slow.yaw);
        assert!(slow.angular_distance(fast) < 1.0e-2);
        assert_eq!(fast.pitch, 0.0);
    }

    #[test]
    fn third_person_move_follows_the_control_yaw() {
        let mut state = ControlState::default();
        let mut input = MovementInput::default();
        let control = ViewRotation::new(-30.0, 90.0);

        apply_move(
            ControlMode::Gta,
            control,
            Vec2::new(0.0, 1.0),
            &mut state,
            &mut input,
        );
        assert!(input.distance(Vec3::NEG_X) < 1.0e-4);
        assert_eq!(state.direction_to_move, Vec2::ZERO);
    }

    #[test]
    fn overhead_move_is_stored_forward_right() {
        let mut state = ControlState::default();
        let mut input = MovementInput::default();

        apply_move(
            ControlMode::Diablo,
            ViewRotation::ZERO,
            Vec2::new(0.25, 0.75),
            &mut state,
            &mut input,
        );
        assert_eq!(state.direction_to_move, Vec2::new(0.75, 0.25));
        assert_eq!(*input, Vec3::ZERO);
    }

    #[test]
    fn look_turns_and_clamps_in_third_person_only() {
        let cam = CameraPreset::default();
        let mut control = ViewRotation::ZERO;

        apply_look(ControlMode::Diablo, Vec2::new(100.0, 100.0), &cam, &mut control);
        assert_eq!(control, ViewRotation::ZERO);

        apply_look(ControlMode::Gta, Vec2::new(100.0, 0.0), &cam, &mut control);
        assert!((control.yaw + 100.0 * cam.look_sensitivity).abs() < 1.0e-4);

        apply_look(ControlMode::Gta, Vec2::new(0.0, 10_000.0), &cam, &mut control);
        assert_eq!(control.pitch, cam.max_pitch);
    }

    #[test]
    fn consumed_input_is_clamped_and_reset() {
        let mut input = MovementInput::default();
        input.add(Vec3::X);
        input.add(Vec3::NEG_Z);

        let movement = input.consume();
        assert!((movement.length() - 1.0).abs() < 1.0e-5);
        assert_eq!(*input, Vec3::ZERO);

        input.add(Vec3::X * 0.5);
        assert_eq!(input.consume(), Vec3::X * 0.5);
    }
}

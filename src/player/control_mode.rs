//! Switching between the third person and overhead control modes.

use super::*;
use bevy::ecs::relationship::RelationshipTarget;

pub fn plugin(app: &mut App) {
    app.add_observer(handle_view_change);
}

/// How the body's yaw follows input, copied from the active [`ModeProfile`].
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct RotationPolicy {
    pub use_controller_rotation_yaw: bool,
    pub orient_rotation_to_movement: bool,
    pub use_controller_desired_rotation: bool,
    /// Degrees per second.
    pub rotation_rate: f32,
}

impl From<&ModeProfile> for RotationPolicy {
    fn from(profile: &ModeProfile) -> Self {
        Self {
            use_controller_rotation_yaw: profile.use_controller_rotation_yaw,
            orient_rotation_to_movement: profile.orient_rotation_to_movement,
            use_controller_desired_rotation: profile.use_controller_desired_rotation,
            rotation_rate: profile.rotation_rate,
        }
    }
}

impl RotationPolicy {
    /// Direction the body should turn toward this frame, `None` keeps the current facing.
    pub fn desired_forward(&self, movement: Vec3, control: ViewRotation) -> Option<Dir3> {
        if self.use_controller_rotation_yaw || self.use_controller_desired_rotation {
            return Dir3::new(control.flat_forward()).ok();
        }
        if self.orient_rotation_to_movement {
            return Dir3::new(Vec3::new(movement.x, 0.0, movement.z)).ok();
        }
        None
    }

    pub fn turning_angvel(&self) -> f32 {
        self.rotation_rate.to_radians()
    }
}

/// Mode to switch to after a view change press, if any.
/// The press only counts while the modifier is held.
pub fn next_control_mode(current: ControlMode, modifier_held: bool) -> Option<ControlMode> {
    modifier_held.then(|| current.toggled())
}

/// Apply `next` to a character: the arm gets the new targets, the body the new rotation
/// policy. The view the camera currently shows carries over into the new mode.
pub fn switch_control_mode(
    next: ControlMode,
    cam: &CameraPreset,
    mode: &mut ControlMode,
    arm: &mut SpringArm,
    policy: &mut RotationPolicy,
    control: &mut ControlRotation,
) {
    let profile = cam.profile(next);
    let current_view = arm.desired_rotation(**control);

    *mode = next;
    arm.retarget(profile);
    *policy = RotationPolicy::from(profile);

    match next {
        ControlMode::Gta => {
            **control = current_view
                .with_clamped_pitch(cam.min_pitch, cam.max_pitch)
                .normalized();
        }
        ControlMode::Diablo => arm.rotation = current_view,
    }
}

fn handle_view_change(
    on: On<Start<ViewChange>>,
    cfg: Res<Config>,
    contexts: Query<&Actions<PlayerCtx>>,
    modifiers: Query<&Action<ViewModifier>>,
    mut players: Query<(
        &mut ControlMode,
        &mut SpringArm,
        &mut RotationPolicy,
        &mut ControlRotation,
    )>,
    mut commands: Commands,
) {
    // only the modifier bound in the same context counts
    let held = contexts
        .get(on.context)
        .is_ok_and(|actions| modifiers.iter_many(actions.iter()).any(|held| **held));
    let Ok((mut mode, mut arm, mut policy, mut control)) = players.get_mut(on.context) else {
        return;
    };
    let Some(next) = next_control_mode(*mode, held) else {
        return;
    };

    switch_control_mode(
        next,
        &cfg.camera,
        &mut mode,
        &mut arm,
        &mut policy,
        &mut control,
    );
    commands.trigger(ControlModeChanged {
        entity: on.context,
        mode: next,
    });
}

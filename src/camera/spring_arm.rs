//! Camera boom between the character and the [`SceneCamera`].
//!
//! Length and rotation are never snapped on a mode switch: the active profile only moves
//! the targets, and [`smooth_spring_arm`] closes the gap every frame.

use super::*;
use avian3d::prelude::*;

#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct SpringArm {
    /// Current boom length, meters.
    pub arm_length: f32,
    /// Current boom rotation when it does not follow the control rotation.
    /// The boom is not parented to the body's rotation, so this is a world rotation.
    pub rotation: ViewRotation,
    pub length_to: f32,
    pub rotation_to: ViewRotation,
    pub length_speed: f32,
    pub rotation_speed: f32,
    pub use_pawn_control_rotation: bool,
    pub inherit_pitch: bool,
    pub inherit_yaw: bool,
    pub inherit_roll: bool,
    pub do_collision_test: bool,
    pub probe_size: f32,
    pub pivot_offset: Vec3,
}

impl SpringArm {
    pub fn new(cam: &CameraPreset, mode: ControlMode) -> Self {
        let profile = cam.profile(mode);
        let mut arm = Self {
            arm_length: profile.arm_length,
            rotation: profile.arm_rotation(),
            length_to: profile.arm_length,
            rotation_to: profile.arm_rotation(),
            length_speed: cam.arm_length_speed,
            rotation_speed: cam.arm_rotation_speed,
            use_pawn_control_rotation: false,
            inherit_pitch: false,
            inherit_yaw: false,
            inherit_roll: false,
            do_collision_test: false,
            probe_size: cam.probe_size,
            pivot_offset: Vec3::from(cam.pivot_offset),
        };
        arm.retarget(profile);
        arm
    }

    /// Adopt a mode profile: flags switch immediately, length and rotation become targets.
    pub fn retarget(&mut self, profile: &ModeProfile) {
        self.length_to = profile.arm_length;
        self.rotation_to = profile.arm_rotation();
        self.use_pawn_control_rotation = profile.use_pawn_control_rotation;
        self.inherit_pitch = profile.inherit_pitch;
        self.inherit_yaw = profile.inherit_yaw;
        self.inherit_roll = profile.inherit_roll;
        self.do_collision_test = profile.do_collision_test;
    }

    /// Jump straight to the targets.
    pub fn snap(&mut self) {
        self.arm_length = self.length_to;
        self.rotation = self.rotation_to;
    }

    /// One frame of smoothing. Length always converges, rotation only in overhead mode.
    pub fn smooth(&mut self, mode: ControlMode, delta: f32) {
        self.arm_length = interp_to(self.arm_length, self.length_to, delta, self.length_speed);
        if mode == ControlMode::Diablo {
            self.rotation = self
                .rotation
                .interp_to(self.rotation_to, delta, self.rotation_speed);
        }
    }

    /// Rotation the boom points the camera with, given the controller's control rotation.
    /// Axes that are not inherited keep the boom's own value.
    pub fn desired_rotation(&self, control: ViewRotation) -> ViewRotation {
        let mut rotation = if self.use_pawn_control_rotation {
            control
        } else {
            self.rotation
        };
        if !self.inherit_pitch {
            rotation.pitch = self.rotation.pitch;
        }
        if !self.inherit_yaw {
            rotation.yaw = self.rotation.yaw;
        }
        rotation
    }

    /// Unobstructed camera offset from the pivot.
    pub fn socket_offset(&self, control: ViewRotation) -> Vec3 {
        -self.desired_rotation(control).forward() * self.arm_length
    }
}

pub fn smooth_spring_arm(time: Res<Time>, mut arms: Query<(&ControlMode, &mut SpringArm)>) {
    let delta = time.delta_secs();
    for (mode, mut arm) in arms.iter_mut() {
        arm.smooth(*mode, delta);
    }
}

/// Put the camera at the end of the boom, pulled in front of anything the probe hits.
pub fn position_camera(
    spatial_query: SpatialQuery,
    arms: Query<(Entity, &Transform, &SpringArm, &ControlRotation), Without<SceneCamera>>,
    mut camera: Query<&mut Transform, With<SceneCamera>>,
) -> Result {
    let Ok((entity, body, arm, control)) = arms.single() else {
        return Ok(());
    };
    let mut cam_transform = camera.single_mut()?;

    let pivot = body.translation + arm.pivot_offset;
    let rotation = arm.desired_rotation(**control);
    let offset = arm.socket_offset(**control);
    let mut length = arm.arm_length;

    if arm.do_collision_test {
        if let Ok(direction) = Dir3::new(offset) {
            let filter = SpatialQueryFilter::from_excluded_entities([entity]);
            if let Some(hit) = spatial_query.cast_ray(pivot, direction, length, true, &filter) {
                length = (hit.distance - arm.probe_size).max(0.0);
                trace!("camera probe hit {} at {:.2}", hit.entity, hit.distance);
            }
        }
    }

    cam_transform.translation = pivot + offset.normalize_or_zero() * length;
    cam_transform.rotation = rotation.to_quat();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overhead_arm() -> SpringArm {
        SpringArm::new(&CameraPreset::default(), ControlMode::Diablo)
    }

    #[test]
    fn new_arm_starts_settled_on_its_profile() {
        let arm = overhead_arm();
        assert_eq!(arm.arm_length, 8.0);
        assert_eq!(arm.length_to, 8.0);
        assert_eq!(arm.rotation, ViewRotation::new(-45.0, 0.0));
        assert!(!arm.use_pawn_control_rotation);
        assert!(!arm.do_collision_test);
    }

    #[test]
    fn retarget_moves_targets_not_current_values() {
        let mut arm = overhead_arm();
        arm.retarget(&ModeProfile::GTA);
        assert_eq!(arm.arm_length, 8.0);
        assert_eq!(arm.length_to, 4.5);
        assert!(arm.use_pawn_control_rotation);
        assert!(arm.do_collision_test);
    }

    #[test]
    fn smoothing_rotation_only_in_overhead_mode() {
        let mut arm = overhead_arm();
        arm.rotation = ViewRotation::ZERO;

        arm.smooth(ControlMode::Gta, 0.01);
        assert_eq!(arm.rotation, ViewRotation::ZERO);

        arm.smooth(ControlMode::Diablo, 0.01);
        assert!(arm.rotation.pitch < 0.0 && arm.rotation.pitch > -45.0);
    }

    #[test]
    fn length_converges_monotonically_in_both_directions() {
        for (from, mode) in [(8.0, ControlMode::Gta), (4.5, ControlMode::Diablo)] {
            let mut arm = overhead_arm();
            arm.retarget(CameraPreset::default().profile(mode));
            arm.arm_length = from;
            let target = arm.length_to;
            let mut gap = (target - arm.arm_length).abs();
            for _ in 0..300 {
                arm.smooth(mode, 1.0 / 60.0);
                let next_gap = (target - arm.arm_length).abs();
                assert!(next_gap <= gap);
                assert!((arm.arm_length - from).abs() <= (target - from).abs() + 1.0e-6);
                gap = next_gap;
            }
            assert!(gap < 1.0e-2);
        }
    }

    #[test]
    fn following_arm_uses_control_rotation() {
        let mut arm = overhead_arm();
        arm.retarget(&ModeProfile::GTA);
        let control = ViewRotation::new(-10.0, 120.0);
        assert_eq!(arm.desired_rotation(control), control);

        arm.retarget(&ModeProfile::DIABLO);
        assert_eq!(arm.desired_rotation(control), arm.rotation);
    }

    #[test]
    fn socket_sits_behind_and_above_in_overhead_mode() {
        let arm = overhead_arm();
        let offset = arm.socket_offset(ViewRotation::ZERO);
        assert!((offset.length() - 8.0).abs() < 1.0e-4);
        assert!(offset.y > 0.0);
        assert!(offset.z > 0.0);
    }
}

use super::*;

/// Tuning loaded from `assets/config.ron`.
///
/// Every section falls back to its [`Default`], which holds the shipped values, so a
/// partial or missing file still yields a playable character.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Reflect, Asset, Resource)]
#[reflect(Resource)]
#[serde(default)]
pub struct Config {
    pub camera: CameraPreset,
    pub player: PlayerPreset,
    pub animation: AnimationPreset,
}

#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct CameraPreset {
    pub gta: ModeProfile,
    pub diablo: ModeProfile,
    /// Boom length interpolation rate, 1/s.
    pub arm_length_speed: f32,
    /// Boom rotation interpolation rate, 1/s.
    pub arm_rotation_speed: f32,
    /// Degrees of control rotation per unit of look input.
    pub look_sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Boom pivot relative to the character origin.
    pub pivot_offset: (f32, f32, f32),
    /// Radius kept between the camera and whatever the boom probe hits.
    pub probe_size: f32,
    /// Vertical field of view, degrees.
    pub fov: f32,
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self {
            gta: ModeProfile::GTA,
            diablo: ModeProfile::DIABLO,
            arm_length_speed: 3.0,
            arm_rotation_speed: 10.0,
            look_sensitivity: 0.15,
            min_pitch: -89.0,
            max_pitch: 89.0,
            pivot_offset: (0.0, 0.6, 0.0),
            probe_size: 0.12,
            fov: 60.0,
        }
    }
}

impl CameraPreset {
    pub fn profile(&self, mode: ControlMode) -> &ModeProfile {
        match mode {
            ControlMode::Gta => &self.gta,
            ControlMode::Diablo => &self.diablo,
        }
    }
}

/// One row of the per-mode camera/movement table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Reflect)]
pub struct ModeProfile {
    /// Boom length target, meters.
    pub arm_length: f32,
    /// Boom rotation target, degrees. Only used when not following the control rotation.
    pub arm_pitch: f32,
    pub arm_yaw: f32,
    /// Boom follows the controller's control rotation.
    pub use_pawn_control_rotation: bool,
    pub inherit_pitch: bool,
    pub inherit_yaw: bool,
    pub inherit_roll: bool,
    /// Pull the camera in when geometry is between it and the character.
    pub do_collision_test: bool,
    /// Body yaw snaps to the control yaw.
    pub use_controller_rotation_yaw: bool,
    /// Body turns toward its movement direction.
    pub orient_rotation_to_movement: bool,
    /// Body turns toward the control yaw at `rotation_rate`.
    pub use_controller_desired_rotation: bool,
    /// Yaw turn rate, degrees per second.
    pub rotation_rate: f32,
}

impl ModeProfile {
    pub const GTA: Self = Self {
        arm_length: 4.5,
        arm_pitch: 0.0,
        arm_yaw: 0.0,
        use_pawn_control_rotation: true,
        inherit_pitch: true,
        inherit_yaw: true,
        inherit_roll: true,
        do_collision_test: true,
        use_controller_rotation_yaw: false,
        orient_rotation_to_movement: true,
        use_controller_desired_rotation: false,
        rotation_rate: 720.0,
    };

    pub const DIABLO: Self = Self {
        arm_length: 8.0,
        arm_pitch: -45.0,
        arm_yaw: 0.0,
        use_pawn_control_rotation: false,
        inherit_pitch: false,
        inherit_yaw: false,
        inherit_roll: false,
        do_collision_test: false,
        use_controller_rotation_yaw: false,
        orient_rotation_to_movement: false,
        use_controller_desired_rotation: true,
        rotation_rate: 720.0,
    };

    pub fn arm_rotation(&self) -> ViewRotation {
        ViewRotation::new(self.arm_pitch, self.arm_yaw)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PlayerPreset {
    pub spawn_pos: (f32, f32, f32),
    pub initial_mode: ControlMode,
    pub hitbox: HitboxPreset,
    /// Vertical offset of the mesh from the capsule center.
    pub mesh_offset: f32,
    pub movement: MovementPreset,
    pub jump: JumpPreset,
}

impl Default for PlayerPreset {
    fn default() -> Self {
        Self {
            spawn_pos: (0.0, 2.0, 0.0),
            initial_mode: ControlMode::Diablo,
            hitbox: HitboxPreset::default(),
            mesh_offset: -0.88,
            movement: MovementPreset::default(),
            jump: JumpPreset::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct HitboxPreset {
    pub radius: f32,
    /// Length of the cylindrical part of the capsule.
    pub height: f32,
}

impl Default for HitboxPreset {
    fn default() -> Self {
        Self {
            radius: 0.34,
            height: 1.08,
        }
    }
}

impl HitboxPreset {
    pub fn half_height(&self) -> f32 {
        self.height * 0.5 + self.radius
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct MovementPreset {
    /// Max walk speed, m/s.
    pub speed: f32,
    pub acceleration: f32,
    pub air_acceleration: f32,
    /// Gap kept between the bottom of the capsule and the ground.
    pub float_clearance: f32,
    pub idle_to_run_threshold: f32,
}

impl Default for MovementPreset {
    fn default() -> Self {
        Self {
            speed: 6.0,
            acceleration: 20.0,
            air_acceleration: 10.0,
            float_clearance: 0.05,
            idle_to_run_threshold: 0.1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct JumpPreset {
    /// Apex height of a fully held jump, meters.
    pub height: f32,
}

impl Default for JumpPreset {
    fn default() -> Self {
        Self { height: 1.2 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct AnimationPreset {
    pub attack_montage: String,
    pub attack_speed: f32,
    pub idle: String,
    pub run: String,
    pub jump_start: String,
    pub jump_loop: String,
    pub jump_land: String,
    /// Run clip playback speed per m/s of ground speed.
    pub run_playback_scale: f32,
    pub blend_ms: u64,
}

impl Default for AnimationPreset {
    fn default() -> Self {
        Self {
            attack_montage: "Punch_Jab".to_string(),
            attack_speed: 1.3,
            idle: "Idle_Loop".to_string(),
            run: "Jog_Fwd_Loop".to_string(),
            jump_start: "Jump_Start".to_string(),
            jump_loop: "Jump_Loop".to_string(),
            jump_land: "Jump_Land".to_string(),
            run_playback_scale: 0.2,
            blend_ms: 150,
        }
    }
}

impl AnimationPreset {
    /// Clips the character graph loads; anything else in the model is skipped.
    pub fn used_clips(&self) -> [&str; 6] {
        [
            self.attack_montage.as_str(),
            self.idle.as_str(),
            self.run.as_str(),
            self.jump_start.as_str(),
            self.jump_loop.as_str(),
            self.jump_land.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_ron() {
        let cfg = Config::default();
        let text = ron::ser::to_string_pretty(&cfg, Default::default()).unwrap();
        let back: Config = ron::from_str(&text).unwrap();
        assert_eq!(back.camera.gta, ModeProfile::GTA);
        assert_eq!(back.camera.diablo, ModeProfile::DIABLO);
        assert_eq!(back.player.initial_mode, ControlMode::Diablo);
        assert_eq!(back.animation.attack_montage, "Punch_Jab");
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let cfg: Config = ron::from_str(include_str!("../../assets/config.ron")).unwrap();
        let defaults = Config::default();
        assert_eq!(cfg.camera.gta, defaults.camera.gta);
        assert_eq!(cfg.camera.diablo, defaults.camera.diablo);
        assert_eq!(cfg.camera.arm_length_speed, defaults.camera.arm_length_speed);
        assert_eq!(cfg.camera.arm_rotation_speed, defaults.camera.arm_rotation_speed);
        assert_eq!(cfg.player.initial_mode, defaults.player.initial_mode);
        assert_eq!(cfg.animation.used_clips(), defaults.animation.used_clips());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let text = "(camera: (arm_length_speed: 5.0), player: (initial_mode: Gta))";
        let cfg: Config = ron::from_str(text).unwrap();
        assert_eq!(cfg.camera.arm_length_speed, 5.0);
        assert_eq!(cfg.camera.arm_rotation_speed, 10.0);
        assert_eq!(cfg.camera.diablo.arm_length, 8.0);
        assert_eq!(cfg.player.initial_mode, ControlMode::Gta);
        assert_eq!(cfg.player.movement.speed, 6.0);
    }

    #[test]
    fn profile_table_matches_modes() {
        let cam = CameraPreset::default();
        assert!(cam.profile(ControlMode::Gta).use_pawn_control_rotation);
        assert!(cam.profile(ControlMode::Gta).do_collision_test);
        assert!(!cam.profile(ControlMode::Diablo).do_collision_test);
        assert_eq!(
            cam.profile(ControlMode::Diablo).arm_rotation(),
            ViewRotation::new(-45.0, 0.0)
        );
    }
}

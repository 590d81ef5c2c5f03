use super::*;

/// Below this squared distance an interpolation snaps to its target.
const SNAP_DISTANCE_SQUARED: f32 = 1.0e-8;

/// Exponential approach of `current` toward `target`.
///
/// Each call closes `delta * speed` of the remaining distance, clamped to the whole
/// distance, so the value never passes the target. A non-positive speed snaps.
pub fn interp_to(current: f32, target: f32, delta: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }
    let distance = target - current;
    if distance * distance < SNAP_DISTANCE_SQUARED {
        return target;
    }
    current + distance * (delta * speed).clamp(0.0, 1.0)
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Pitch/yaw pair in degrees, the shape of a controller's control rotation.
///
/// Yaw follows Bevy's right-handed convention: zero looks down `-Z` and positive yaw
/// turns toward `-X` (left). Positive pitch looks up. Roll is never used.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewRotation {
    pub pitch: f32,
    pub yaw: f32,
}

impl ViewRotation {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// Rotation whose forward axis points along `direction`.
    /// A zero direction yields [`ViewRotation::ZERO`].
    pub fn from_direction(direction: Vec3) -> Self {
        let Some(direction) = direction.try_normalize() else {
            return Self::ZERO;
        };
        Self {
            pitch: direction.y.clamp(-1.0, 1.0).asin().to_degrees(),
            yaw: (-direction.x).atan2(-direction.z).to_degrees(),
        }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        )
    }

    pub fn forward(self) -> Vec3 {
        self.to_quat() * Vec3::NEG_Z
    }

    /// Yaw-only rotation, what ground movement is projected onto.
    pub fn heading(self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    pub fn flat_forward(self) -> Vec3 {
        self.heading() * Vec3::NEG_Z
    }

    pub fn flat_right(self) -> Vec3 {
        self.heading() * Vec3::X
    }

    /// Both axes wrapped into `(-180, 180]`.
    pub fn normalized(self) -> Self {
        Self {
            pitch: wrap_degrees(self.pitch),
            yaw: wrap_degrees(self.yaw),
        }
    }

    pub fn with_clamped_pitch(self, min: f32, max: f32) -> Self {
        Self {
            pitch: self.pitch.clamp(min, max),
            ..self
        }
    }

    /// Per-axis [`interp_to`] along the shortest arc.
    pub fn interp_to(self, target: Self, delta: f32, speed: f32) -> Self {
        if speed <= 0.0 {
            return target;
        }
        let pitch_delta = wrap_degrees(target.pitch - self.pitch);
        let yaw_delta = wrap_degrees(target.yaw - self.yaw);
        if pitch_delta * pitch_delta + yaw_delta * yaw_delta < SNAP_DISTANCE_SQUARED {
            return target;
        }
        let alpha = (delta * speed).clamp(0.0, 1.0);
        Self {
            pitch: self.pitch + pitch_delta * alpha,
            yaw: self.yaw + yaw_delta * alpha,
        }
        .normalized()
    }

    pub fn angular_distance(self, other: Self) -> f32 {
        Vec2::new(
            wrap_degrees(other.pitch - self.pitch),
            wrap_degrees(other.yaw - self.yaw),
        )
        .length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interp_converges_without_overshoot() {
        let mut length = 4.5;
        let mut previous_gap = (8.0_f32 - length).abs();
        for _ in 0..600 {
            length = interp_to(length, 8.0, 1.0 / 60.0, 3.0);
            let gap = 8.0 - length;
            assert!(gap >= 0.0, "overshot target: {length}");
            assert!(gap <= previous_gap);
            previous_gap = gap;
        }
        assert!((length - 8.0).abs() < 1.0e-3);
    }

    #[test]
    fn interp_with_huge_step_lands_on_target() {
        assert_eq!(interp_to(1.0, 5.0, 10.0, 10.0), 5.0);
        assert_eq!(interp_to(1.0, 5.0, 0.1, 0.0), 5.0);
    }

    #[test]
    fn wrap_keeps_angles_in_half_open_range() {
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(540.0), 180.0);
        assert_eq!(wrap_degrees(-45.0), -45.0);
    }

    #[test]
    fn rotation_interp_takes_the_short_way_round() {
        let from = ViewRotation::new(0.0, 170.0);
        let to = ViewRotation::new(0.0, -170.0);
        let step = from.interp_to(to, 0.1, 1.0);
        // 20 degree gap through 180, not 340 through zero
        assert!((step.yaw - 172.0).abs() < 1.0e-3);
    }

    #[test]
    fn direction_round_trips_through_forward() {
        let direction = Vec3::new(1.0, 0.0, -1.0).normalize();
        let rotation = ViewRotation::from_direction(direction);
        assert!(rotation.forward().distance(direction) < 1.0e-5);
        assert!((rotation.yaw + 45.0).abs() < 1.0e-4);
        assert_eq!(ViewRotation::from_direction(Vec3::ZERO), ViewRotation::ZERO);
    }

    #[test]
    fn flat_axes_ignore_pitch() {
        let rotation = ViewRotation::new(-60.0, 90.0);
        assert!(rotation.flat_forward().distance(Vec3::NEG_X) < 1.0e-5);
        assert!(rotation.flat_right().distance(Vec3::NEG_Z) < 1.0e-5);
    }
}

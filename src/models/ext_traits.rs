use super::*;

/// Helper trait to get direction of movement based on the control rotation
pub trait MovementDirection {
    /// Ground movement for a 2D input where `x` is right and `y` is forward.
    /// Not normalized: accumulated input is clamped by the movement system instead.
    fn movement_direction(&self, input: Vec2) -> Vec3;
}

impl MovementDirection for ViewRotation {
    fn movement_direction(&self, input: Vec2) -> Vec3 {
        let forward = self.flat_forward();
        let right = self.flat_right();
        (forward * input.y) + (right * input.x)
    }
}

/// Overhead-mode direction: stored as `(forward, right)` and mapped to world ground axes.
pub trait GroundDirection {
    fn ground_direction(&self) -> Vec3;
}

impl GroundDirection for Vec2 {
    fn ground_direction(&self) -> Vec3 {
        Vec3::new(self.y, 0.0, -self.x)
    }
}

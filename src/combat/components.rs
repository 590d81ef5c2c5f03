use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.register_type::<AttackState>();
}

/// Animation side of an attack: anything that can start the attack montage.
pub trait MontagePlayer {
    /// Start `montage`, `None` when the animation instance or the clip isn't available.
    fn play_montage(&mut self, montage: &str) -> Option<AnimationNodeIndex>;
}

/// Tracks attack state for entities that can attack.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct AttackState {
    /// Whether we're currently in an attack animation.
    pub is_attacking: bool,
    /// Graph node of the montage in progress.
    pub montage: Option<AnimationNodeIndex>,
    /// Attacks started so far.
    pub attack_count: u32,
}

impl AttackState {
    /// Start an attack unless one is already running.
    ///
    /// The flag only goes up once the montage actually started, so a character without
    /// animations never gets stuck mid attack.
    pub fn request_attack(
        &mut self,
        montage: &str,
        animator: &mut impl MontagePlayer,
    ) -> Option<AnimationNodeIndex> {
        if self.is_attacking {
            return None;
        }
        let node = animator.play_montage(montage)?;
        self.is_attacking = true;
        self.montage = Some(node);
        self.attack_count += 1;
        Some(node)
    }

    /// The montage stopped, finished or interrupted; either way the attack is over.
    pub fn end_montage(&mut self) {
        self.is_attacking = false;
        self.montage = None;
    }
}

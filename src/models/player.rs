use super::*;
use std::collections::HashMap;

#[derive(Component, Reflect, Clone)]
#[reflect(Component)]
pub struct Player {
    pub speed: f32,
    pub animation_state: AnimationState,
    /// Clip name to graph node, filled once the model scene is ready.
    pub animations: HashMap<String, AnimationNodeIndex>,
    /// Entity holding the [`AnimationPlayer`]; `None` until the model resolves.
    pub anim_player_entity: Option<Entity>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            speed: 1.0,
            animation_state: AnimationState::Idle,
            animations: HashMap::new(),
            anim_player_entity: None,
        }
    }
}

#[derive(Component, Reflect, Default, Clone, Debug, PartialEq)]
#[reflect(Component)]
pub enum AnimationState {
    #[default]
    Idle,
    Run(f32),
    JumpStart,
    JumpLoop,
    JumpLand,
    Fall,
    Attack,
}

/// Camera and movement profile the character is driven by.
#[derive(
    Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[reflect(Component)]
pub enum ControlMode {
    /// Third person: look input drives the camera, the body turns toward where it walks.
    Gta,
    /// Overhead: fixed pitched camera, the body faces the stored move direction.
    #[default]
    Diablo,
}

impl ControlMode {
    pub fn toggled(self) -> Self {
        match self {
            ControlMode::Gta => ControlMode::Diablo,
            ControlMode::Diablo => ControlMode::Gta,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Gta => "GTA",
            ControlMode::Diablo => "DIABLO",
        }
    }
}

/// The controller's control rotation: where the player is looking, independent of the body.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, Deref, DerefMut)]
#[reflect(Component)]
pub struct ControlRotation(pub ViewRotation);

use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use serde::{Deserialize, Serialize};

mod config;
mod event_dispatch;
mod ext_traits;
mod input;
mod player;
mod primitives;
mod rotation;
mod states;

pub use config::*;
pub use event_dispatch::*;
pub use ext_traits::*;
pub use input::*;
pub use input::Move; // disambiguate from bevy::prelude::Move (picking event)
pub use player::*;
pub use primitives::*;
pub use rotation::*;
pub use states::*;

pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (
            CharacterSystems::SmoothCamera,
            CharacterSystems::Steer,
            CharacterSystems::Move,
            CharacterSystems::PlayAnimations,
        )
            .chain(),
    );

    app.add_plugins((input::plugin, event_dispatch::plugin));
}

/// Per-frame character work in the [`Update`] schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum CharacterSystems {
    /// Interpolate the spring arm toward its targets.
    SmoothCamera,
    /// Mode dependent steering (overhead mode drives facing from the stored direction).
    Steer,
    /// Hand accumulated movement input to the character controller.
    Move,
    /// Play animations.
    PlayAnimations,
}

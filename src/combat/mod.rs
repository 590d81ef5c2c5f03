use crate::*;
use bevy_enhanced_input::prelude::Start;

mod attack;
mod components;

pub use attack::GraphMontagePlayer;
pub use components::*;

pub fn plugin(app: &mut App) {
    app.add_plugins((components::plugin, attack::plugin));
}

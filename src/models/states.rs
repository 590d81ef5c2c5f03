use super::*;

/// The game's screen states.
/// See <https://bevy-cheatbook.github.io/programming/states.html>
#[derive(States, Default, Clone, Eq, PartialEq, Debug, Hash, Reflect)]
pub enum Screen {
    // Config and player model are resolved here
    #[default]
    Loading,
    // During this State the actual game logic is executed
    Gameplay,
}

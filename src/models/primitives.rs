use super::*;

/// Macro to hide the derive trait boilerplate
macro_rules! markers {
  ( $( $name:ident ),* ) => {
        $(
            #[derive(Component, Reflect, Clone, Default)]
            #[reflect(Component)]
            pub struct $name;
        )*
    };
}

markers!(
    SceneCamera,
    // user input contexts
    PlayerCtx
);

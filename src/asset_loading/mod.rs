use crate::*;
use bevy::{asset::Asset, gltf::GltfLoaderSettings};

mod ron;
mod tracking;

pub use ron::*;
pub use tracking::*;

pub fn plugin(app: &mut App) {
    // Defaults stay in place if `config.ron` is missing or broken.
    app.init_resource::<Config>();

    // start asset loading
    app.add_plugins(tracking::plugin)
        .add_plugins(RonAssetPlugin::<Config>::default())
        .load_resource_from_path::<Config>("config.ron")
        .load_resource::<Models>();
}

#[derive(Asset, Clone, Reflect, Resource)]
#[reflect(Resource)]
pub struct Models {
    #[dependency]
    pub player: Handle<Gltf>,
}

impl FromWorld for Models {
    fn from_world(world: &mut World) -> Self {
        let assets = world.resource::<AssetServer>();
        Self {
            player: assets.load_with_settings(
                "models/player.glb",
                |settings: &mut GltfLoaderSettings| {
                    settings.use_model_forward_direction = Some(true);
                },
            ),
        }
    }
}

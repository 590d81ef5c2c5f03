use crate::*;

pub fn plugin(app: &mut App) {
    app.add_plugins((
        asset_loading::plugin,
        models::plugin,
        screens::plugin,
        scene::plugin,
        camera::plugin,
        player::plugin,
        combat::plugin,
    ));
}

//! The game's main screen states and transitions between them.

use crate::*;

pub fn plugin(app: &mut App) {
    app.init_state::<Screen>();

    app.add_systems(
        Update,
        continue_to_gameplay.run_if(in_state(Screen::Loading).and(all_assets_loaded)),
    );
}

fn continue_to_gameplay(
    resource_handles: Res<ResourceHandles>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    if resource_handles.failed_count() > 0 {
        warn!(
            "{} asset(s) failed to load, continuing with what is available",
            resource_handles.failed_count()
        );
    }
    next_screen.set(Screen::Gameplay);
}

fn all_assets_loaded(resource_handles: Res<ResourceHandles>) -> bool {
    resource_handles.is_all_done()
}

//! A high-level way to load collections of asset handles as resources.

use super::*;
use bevy::asset::RecursiveDependencyLoadState;
use std::collections::VecDeque;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ResourceHandles>();
    app.add_systems(PreUpdate, load_resource_assets);
}

pub trait LoadResource {
    /// This will load the [`Resource`] as an [`Asset`]. When all of its asset dependencies
    /// have been loaded, it will be inserted as a resource. This ensures that the resource only
    /// exists when the assets are ready.
    fn load_resource<T: Resource + Asset + Clone + FromWorld>(&mut self) -> &mut Self;
    fn load_resource_from_path<T: Resource + Asset + Clone>(
        &mut self,
        path: impl Into<String>,
    ) -> &mut Self;
}

impl LoadResource for App {
    fn load_resource<T: Resource + Asset + Clone + FromWorld>(&mut self) -> &mut Self {
        self.init_asset::<T>();
        let world = self.world_mut();
        let value = T::from_world(world);
        let assets = world.resource::<AssetServer>();
        let handle = assets.add(value);
        let mut handles = world.resource_mut::<ResourceHandles>();
        handles.push_handle(handle);
        self
    }

    fn load_resource_from_path<T: Resource + Asset + Clone>(
        &mut self,
        path: impl Into<String>,
    ) -> &mut Self {
        self.init_asset::<T>();
        let _handle = {
            let world = self.world_mut();
            let assets = world.resource::<AssetServer>();
            let handle: Handle<T> = assets.load::<T>(path.into());
            let src_handle = handle.clone();
            let mut handles = world.resource_mut::<ResourceHandles>();
            handles.push_handle(handle);
            src_handle
        };

        // Desktop dev builds watch the file and swap the resource on every edit.
        #[cfg(feature = "dev")]
        self.add_systems(
            Update,
            move |mut commands: Commands,
                  mut events: MessageReader<AssetEvent<T>>,
                  assets: Res<Assets<T>>| {
                for event in events.read() {
                    if let AssetEvent::Modified { id } = event
                        && *id == _handle.id()
                        && let Some(asset) = assets.get(&_handle)
                    {
                        info!("reloaded {}", std::any::type_name::<T>());
                        commands.insert_resource(asset.clone());
                    }
                }
            },
        );

        self
    }
}

/// A function that inserts a loaded resource.
type InsertLoadedResource = fn(&mut World, &UntypedHandle);

#[derive(Resource, Default)]
pub struct ResourceHandles {
    // Use a queue for waiting assets so they can be cycled through and moved to
    // `finished` one at a time.
    waiting: VecDeque<(UntypedHandle, InsertLoadedResource)>,
    finished: Vec<UntypedHandle>,
    failed: Vec<UntypedHandle>,
}

impl ResourceHandles {
    /// Returns true once every requested [`Asset`] either became a [`Resource`] or failed to load.
    pub fn is_all_done(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Number of tracked assets that failed to load.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Adds an asset handle to the list of pending assets to be tracked and converted to resources
    /// on load.
    pub fn push_handle<T: Asset + Resource + Clone>(&mut self, handle: Handle<T>) {
        self.waiting.push_back((handle.untyped(), |world, handle| {
            let assets = world.resource::<Assets<T>>();
            if let Some(value) = assets.get(handle.id().typed::<T>()) {
                world.insert_resource(value.clone());
            }
        }));
    }
}

fn load_resource_assets(world: &mut World) {
    world.resource_scope(|world, mut resource_handles: Mut<ResourceHandles>| {
        world.resource_scope(|world, assets: Mut<AssetServer>| {
            for _ in 0..resource_handles.waiting.len() {
                let Some((handle, insert_fn)) = resource_handles.waiting.pop_front() else {
                    break;
                };
                if assets.is_loaded_with_dependencies(&handle) {
                    insert_fn(world, &handle);
                    resource_handles.finished.push(handle);
                } else if let RecursiveDependencyLoadState::Failed(err) =
                    assets.recursive_dependency_load_state(&handle)
                {
                    // whatever was there before (defaults, or nothing) stays in place
                    warn!("failed to load {:?}: {err}", handle.path());
                    resource_handles.failed.push(handle);
                } else {
                    resource_handles.waiting.push_back((handle, insert_fn));
                }
            }
        });
    });
}

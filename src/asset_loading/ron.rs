//! Loads any deserializable asset from a `.ron` file.

use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use thiserror::Error;

pub struct RonAssetPlugin<T> {
    _marker: PhantomData<T>,
}

impl<T> Default for RonAssetPlugin<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

/// Registers the `.ron` loader for `T`. The asset type itself is initialized by whoever
/// loads it, see [`LoadResource`](super::LoadResource).
impl<T: Asset + DeserializeOwned> Plugin for RonAssetPlugin<T> {
    fn build(&self, app: &mut App) {
        app.register_asset_loader(RonAssetLoader::<T>::default());
    }
}

#[derive(TypePath)]
pub struct RonAssetLoader<T> {
    _marker: PhantomData<T>,
}

impl<T> Default for RonAssetLoader<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

#[derive(Debug, Error)]
pub enum RonLoaderError {
    #[error("could not read asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

impl<T: Asset + DeserializeOwned> AssetLoader for RonAssetLoader<T> {
    type Asset = T;
    type Settings = ();
    type Error = RonLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        Ok(ron::de::from_bytes::<T>(&bytes)?)
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}

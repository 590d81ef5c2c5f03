//! Player character for an arena brawler: a Tnua-driven body, a spring-arm camera that
//! switches between a free-look third-person rig and a fixed overhead rig, jump, and a
//! single melee attack synchronized with its animation montage.

use bevy::prelude::*;

pub mod asset_loading;
pub mod camera;
pub mod combat;
pub mod game;
pub mod models;
pub mod player;
pub mod scene;
pub mod screens;

use asset_loading::{Models, ResourceHandles};
use models::*;

pub use game::plugin;

// Disable console on Windows for non-dev builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::{app::App, asset::AssetMetaCheck, log, prelude::*};

fn main() {
    let mut app = App::new();

    let window = WindowPlugin {
        primary_window: Some(Window {
            title: "Arena Battle".to_string(),
            fit_canvas_to_parent: true,
            // Tells wasm not to override default event handling, like F5 and Ctrl+R
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };
    let assets = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };
    // DEBUG
    // let filter = "debug,naga=off,wgpu=warn,bevy_enhanced_input=debug".to_string();
    let filter = "info,arena_battle=debug,calloop=off,naga=off,wgpu=warn,wgpu_core=error,bevy_render=warn".to_string();
    let log_level = log::LogPlugin {
        level: log::Level::TRACE,
        filter,
        ..Default::default()
    };

    app.add_plugins(DefaultPlugins.set(window).set(assets).set(log_level));

    // custom plugins. the order is important
    // be sure you use resources/types AFTER you add plugins that insert them
    app.add_plugins(arena_battle::plugin);

    app.run();
}

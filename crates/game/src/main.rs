mod config;
mod core;
mod player;
mod tool_ui;
mod world;

use std::path::PathBuf;

use bevy::{prelude::*, window::WindowResolution};
use bevy_camera_tool::{CameraToolInputPlugin, CameraToolPlugin};
use clap::Parser;

/// Third-person photo walk: wander around and capture the notable props.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
  /// Path to the game config. Hot reloads when it lives under `assets/`.
  #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
  config: PathBuf,
}

fn main() {
  let args = Args::parse();

  // The logger is not up yet; ConfigPlugin reports problems once it is
  let window = config::read_config(&args.config)
    .map(|config| config.window)
    .unwrap_or_default();

  App::new()
    .add_plugins(DefaultPlugins.set(WindowPlugin {
      primary_window: Some(Window {
        resolution: WindowResolution::new(window.width, window.height),
        title: window.title,
        ..default()
      }),
      ..default()
    }))
    .add_plugins(config::ConfigPlugin { path: args.config })
    .add_plugins(core::CorePlugin)
    .add_plugins((CameraToolPlugin, CameraToolInputPlugin))
    .add_plugins(player::PlayerPlugin)
    .add_plugins(world::WorldPlugin)
    .add_plugins(tool_ui::ToolUiPlugin)
    .run();
}

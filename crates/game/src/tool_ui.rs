//! Reticle overlay drawn while the camera tool is up.

use bevy::prelude::*;
use bevy_camera_tool::{FocusTracker, ToolUi};
use bevy_egui::{EguiContext, egui};

pub struct ToolUiPlugin;

/// Marker resource indicating egui is ready for UI drawing
#[derive(Resource, Default)]
struct EguiReady(u32);

impl Plugin for ToolUiPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<bevy_egui::EguiPlugin>() {
      app.add_plugins(bevy_egui::EguiPlugin::default());
    }
    app.init_resource::<EguiReady>();
    app.add_systems(Update, draw_reticle);
  }
}

fn draw_reticle(
  mut egui_ctx: Query<&mut EguiContext>,
  ui_state: Res<ToolUi>,
  focus: Res<FocusTracker>,
  mut ready: ResMut<EguiReady>,
) {
  // Skip early frames to allow egui to fully initialize
  if ready.0 < 5 {
    ready.0 += 1;
    return;
  }
  if !ui_state.shown {
    return;
  }
  let Ok(ctx) = egui_ctx.single_mut() else {
    return;
  };
  let ctx: &egui::Context = ctx.into_inner().get_mut();

  let size = 48.0;
  let reticle = ui_state.reticle_position();
  let color = if focus.held().is_some() {
    egui::Color32::from_rgb(255, 210, 90)
  } else {
    egui::Color32::WHITE
  };

  egui::Area::new(egui::Id::new("camera_tool_reticle"))
    .fixed_pos(egui::pos2(reticle.x - size / 2.0, reticle.y - size / 2.0))
    .interactable(false)
    .show(ctx, |ui| {
      let (response, painter) = ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
      let center = response.rect.center();
      let stroke = egui::Stroke::new(2.0, color);

      painter.circle_stroke(center, size / 2.0 - 2.0, stroke);
      // Corner brackets of a viewfinder
      let r = size / 2.0 - 2.0;
      let arm = 8.0;
      for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        let corner = center + egui::vec2(sx * r, sy * r);
        painter.line_segment([corner, corner - egui::vec2(sx * arm, 0.0)], stroke);
        painter.line_segment([corner, corner - egui::vec2(0.0, sy * arm)], stroke);
      }
      painter.circle_filled(center, 2.0, color);
    });
}

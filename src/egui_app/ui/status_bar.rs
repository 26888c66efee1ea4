//! Footer status line.

use eframe::egui;

use crate::egui_app::controller::AppController;
use crate::egui_app::state::StatusTone;

pub fn draw(ctx: &egui::Context, controller: &AppController) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.colored_label(tone_color(controller.ui.status.tone), &controller.ui.status.text);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let count = controller.ui.selection.len();
                if count > 0 {
                    ui.weak(format!("{count} selected"));
                }
            });
        });
    });
}

fn tone_color(tone: StatusTone) -> egui::Color32 {
    match tone {
        StatusTone::Idle => egui::Color32::GRAY,
        StatusTone::Busy => egui::Color32::LIGHT_BLUE,
        StatusTone::Error => egui::Color32::LIGHT_RED,
    }
}

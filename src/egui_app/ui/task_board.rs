//! Bottom strip of background task rows.

use eframe::egui;

use crate::egui_app::controller::AppController;
use crate::egui_app::state::TaskStage;

pub fn draw(ctx: &egui::Context, controller: &AppController) {
    if controller.ui.tasks.rows.is_empty() {
        return;
    }
    egui::TopBottomPanel::bottom("task_board").show(ctx, |ui| {
        for task in &controller.ui.tasks.rows {
            ui.horizontal(|ui| {
                ui.monospace(&task.kind);
                ui.label(stage_label(task.stage));
                if task.stage == TaskStage::Running {
                    ui.add(egui::ProgressBar::new(task.progress).desired_width(140.0));
                }
                if let Some(detail) = &task.detail {
                    ui.weak(detail);
                }
            });
        }
    });
}

fn stage_label(stage: TaskStage) -> &'static str {
    match stage {
        TaskStage::Started => "started",
        TaskStage::Running => "running",
        TaskStage::Failed => "failed",
        TaskStage::Completed => "completed",
        TaskStage::Canceled => "canceled",
    }
}

//! Modal window for creating a basket.

use eframe::egui;

use crate::egui_app::controller::AppController;

pub fn draw(ctx: &egui::Context, controller: &mut AppController) {
    let Some(dialog) = controller.ui.baskets.dialog.clone() else {
        return;
    };

    let mut name = dialog.name.clone();
    let mut add_directory = false;
    let mut removed = None;
    let mut create = false;
    let mut cancel = false;

    egui::Window::new("Create basket")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut name);
            });
            ui.add_space(4.0);
            ui.label("Directories");
            for (index, directory) in dialog.directories.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.monospace(directory.display().to_string());
                    if ui.small_button("✕").clicked() {
                        removed = Some(index);
                    }
                });
            }
            if ui.button("Add directory…").clicked() {
                add_directory = true;
            }
            if let Some(error) = &dialog.error {
                ui.colored_label(ui.visuals().error_fg_color, error);
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Create").clicked() {
                    create = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if let Some(state) = controller.ui.baskets.dialog.as_mut() {
        if state.name != name {
            state.name = name;
            state.error = None;
        }
        if let Some(index) = removed {
            state.directories.remove(index);
        }
    }
    if add_directory {
        // Blocks the UI thread; acceptable for a modal pick.
        let picked = rfd::FileDialog::new().pick_folder();
        controller.add_draft_directory(picked);
    }
    if create {
        controller.create_basket_from_dialog();
    }
    if cancel {
        controller.close_basket_dialog();
    }
}

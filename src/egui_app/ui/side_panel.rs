//! Left panel: basket list above the folder tree of the selected basket.

use eframe::egui;

use super::MenuHandles;
use crate::egui_app::controller::AppController;
use crate::egui_app::state::MenuContext;
use crate::menu::PointerEvent;

pub fn draw(ctx: &egui::Context, controller: &mut AppController, menus: &MenuHandles) {
    egui::SidePanel::left("side_panel")
        .default_width(220.0)
        .show(ctx, |ui| {
            draw_baskets(ui, controller);
            ui.separator();
            draw_folders(ui, controller, menus);
        });
}

fn draw_baskets(ui: &mut egui::Ui, controller: &mut AppController) {
    ui.horizontal(|ui| {
        ui.heading("Baskets");
        if ui.small_button("+").on_hover_text("Create basket").clicked() {
            controller.open_basket_dialog();
        }
    });

    let rows = controller.ui.baskets.rows.clone();
    let selected = controller.ui.baskets.selected;
    let mut clicked_row = None;
    let mut deleted_row = None;
    for (index, row) in rows.iter().enumerate() {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(selected == Some(index), &row.name)
                .clicked()
            {
                clicked_row = Some(index);
            }
            if ui.small_button("✕").on_hover_text("Delete basket").clicked() {
                deleted_row = Some(row.id.clone());
            }
        });
    }
    if let Some(index) = clicked_row {
        controller.select_basket(index);
    }
    if let Some(id) = deleted_row {
        controller.delete_basket(&id);
    }
}

fn draw_folders(ui: &mut egui::Ui, controller: &mut AppController, menus: &MenuHandles) {
    ui.label("Folders");
    if controller.ui.folders.loading {
        ui.weak("Loading…");
    }

    let rows = controller.ui.folders.rows.clone();
    let current = controller.ui.folders.current.clone();
    let mut toggled = None;
    let mut selected = None;
    egui::ScrollArea::vertical()
        .id_salt("folder_tree")
        .show(ui, |ui| {
            for row in &rows {
                ui.horizontal(|ui| {
                    ui.add_space(row.depth as f32 * 12.0);
                    if row.has_children {
                        let chevron = if row.expanded { "⏷" } else { "⏵" };
                        if ui.small_button(chevron).clicked() {
                            toggled = Some(row.id.clone());
                        }
                    } else {
                        ui.add_space(18.0);
                    }
                    let response =
                        ui.selectable_label(current.as_deref() == Some(&row.id), &row.name);
                    if response.clicked() {
                        selected = Some(row.id.clone());
                    }
                    if response.secondary_clicked()
                        && let Some(pos) = response.interact_pointer_pos()
                    {
                        let event = PointerEvent::new(pos.x as i32, pos.y as i32);
                        menus.main.trigger_with(
                            &event,
                            MenuContext::Folder {
                                id: row.id.clone(),
                            },
                        );
                        // Single-open-menu policy lives here, not in the registry.
                        controller
                            .menu_registry()
                            .close_all_except(Some(menus.main.key()));
                    }
                });
            }
        });
    if let Some(id) = toggled {
        controller.toggle_folder(&id);
    }
    if let Some(id) = selected {
        controller.select_folder(&id);
    }
}

//! Central panel: file rows of the current folder.

use eframe::egui;

use super::MenuHandles;
use crate::egui_app::controller::AppController;
use crate::egui_app::state::MenuContext;
use crate::menu::PointerEvent;

pub fn draw(ctx: &egui::Context, controller: &mut AppController, menus: &MenuHandles) {
    let panel = egui::CentralPanel::default().show(ctx, |ui| {
        match &controller.ui.browser.current_path {
            Some(path) => {
                ui.horizontal(|ui| {
                    ui.heading(path);
                    if controller.ui.browser.from_cache {
                        ui.weak("(cached)");
                    }
                    if controller.ui.browser.loading {
                        ui.weak("Loading…");
                    }
                });
            }
            None => {
                ui.heading("Select a folder");
            }
        }
        ui.separator();

        let rows = controller.ui.browser.rows.clone();
        let mut clicked = None;
        let mut toggled = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in &rows {
                let selected = controller.ui.selection.contains(&row.id);
                let label = format!("{}  ({})", row.name, format_size(row.size));
                let response = ui.selectable_label(selected, label);
                if response.clicked() {
                    if ui.input(|input| input.modifiers.ctrl) {
                        toggled = Some(row.id.clone());
                    } else {
                        clicked = Some(row.id.clone());
                    }
                }
                if response.secondary_clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                {
                    let event = PointerEvent::new(pos.x as i32, pos.y as i32);
                    menus
                        .file
                        .trigger_with(&event, MenuContext::File { id: row.id.clone() });
                    controller
                        .menu_registry()
                        .close_all_except(Some(menus.file.key()));
                }
            }
        });
        if let Some(id) = clicked {
            controller.ui.selection.select_only(&id);
        }
        if let Some(id) = toggled {
            controller.ui.selection.toggle(&id);
        }
    });

    // Right-click on empty panel space opens the background menu.
    let response = panel.response.interact(egui::Sense::click());
    if response.secondary_clicked()
        && let Some(pos) = response.interact_pointer_pos()
    {
        let event = PointerEvent::new(pos.x as i32, pos.y as i32);
        menus.main.trigger_with(&event, MenuContext::Background);
        controller
            .menu_registry()
            .close_all_except(Some(menus.main.key()));
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn formats_sizes_with_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }
}

//! Menu registration and rendering.
//!
//! The renderer owns the policies the registry deliberately does not:
//! at most one menu open at a time (enforced by trigger sites via
//! `close_all_except`) and click-away closing (enforced here, skipped when
//! the click landed inside a menu).

use std::rc::Rc;

use eframe::egui;

use crate::egui_app::controller::{AppCommand, CommandQueue};
use crate::egui_app::state::MenuContext;
use crate::menu::{
    MenuDefinition, MenuGroup, MenuHandle, MenuItem, MenuKey, MenuRegistry, MenuSource,
};

/// Key of the background context menu.
pub const MAIN_MENU_KEY: &str = "main";
/// Key of the per-file context menu.
pub const FILE_MENU_KEY: &str = "file";

/// Handles for the menus the panels trigger.
pub struct MenuHandles {
    pub main: MenuHandle<MenuContext>,
    pub file: MenuHandle<MenuContext>,
}

/// Register the app's menus. Safe to call from several mount points; the
/// registry hands every caller the same per-key state.
pub fn register_menus(
    registry: &Rc<MenuRegistry<MenuContext>>,
    commands: CommandQueue,
) -> MenuHandles {
    let main = registry.register(
        MAIN_MENU_KEY,
        MenuSource::Static(main_definition(commands.clone())),
    );
    let file = {
        let registry_for_lazy = registry.clone();
        registry.register(
            FILE_MENU_KEY,
            MenuSource::Lazy(Box::new(move || {
                file_definition(registry_for_lazy, commands)
            })),
        )
    };
    MenuHandles { main, file }
}

fn main_definition(commands: CommandQueue) -> MenuDefinition {
    let create = {
        let commands = commands.clone();
        MenuItem::new("basket.create", "Create basket…").on_activate(move || {
            commands
                .borrow_mut()
                .push_back(AppCommand::OpenBasketDialog);
        })
    };
    let refresh = {
        let commands = commands.clone();
        MenuItem::new("basket.refresh", "Refresh").on_activate(move || {
            commands.borrow_mut().push_back(AppCommand::RefreshBaskets);
        })
    };
    let baskets = MenuItem::new("basket", "Baskets")
        .shortcut("Alt+A")
        .submenu(vec![MenuGroup::new(vec![create, refresh])]);
    let clear = MenuItem::new("selection.clear", "Clear selection").on_activate(move || {
        commands.borrow_mut().push_back(AppCommand::ClearSelection);
    });
    MenuDefinition::new(vec![
        MenuGroup::new(vec![baskets]),
        MenuGroup::new(vec![clear]),
    ])
}

fn file_definition(
    registry: Rc<MenuRegistry<MenuContext>>,
    commands: CommandQueue,
) -> MenuDefinition {
    let open = MenuItem::new("open", "Open").shortcut("F5");
    let remove = MenuItem::new("remove", "Remove from basket").on_activate({
        let commands = commands.clone();
        move || {
            // The payload names the row the menu was triggered on.
            let Some(handle) = registry.handle(&MenuKey::from(FILE_MENU_KEY)) else {
                return;
            };
            let payload = handle.display().payload.clone();
            if let MenuContext::File { id } = payload {
                commands.borrow_mut().push_back(AppCommand::RemoveFile(id));
            }
        }
    });
    let clear = MenuItem::new("selection.clear", "Clear selection").on_activate(move || {
        commands.borrow_mut().push_back(AppCommand::ClearSelection);
    });
    MenuDefinition::new(vec![
        MenuGroup::new(vec![open, remove]),
        MenuGroup::new(vec![clear]),
    ])
}

/// Draw every visible menu at its triggered position.
pub fn draw(ctx: &egui::Context, registry: &Rc<MenuRegistry<MenuContext>>) {
    let clicked = ctx.input(|input| input.pointer.primary_clicked());
    let pointer = ctx.input(|input| input.pointer.interact_pos());
    let mut clicked_inside_menu = false;

    for key in registry.visible_keys() {
        let Some(handle) = registry.handle(&key) else {
            continue;
        };
        let position = {
            let display = handle.display();
            egui::pos2(display.position.x as f32, display.position.y as f32)
        };
        let mut close_requested = false;
        let area = egui::Area::new(egui::Id::new(("context_menu", key.as_str())))
            .fixed_pos(position)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(160.0);
                    draw_groups(ui, &handle.definition().groups, &mut close_requested);
                });
            });
        let inside = pointer.is_some_and(|pos| area.response.rect.contains(pos));
        if clicked && inside {
            clicked_inside_menu = true;
        }
        if close_requested {
            handle.hide();
        }
    }

    if clicked && !clicked_inside_menu {
        registry.close_all();
    }
}

fn draw_groups(ui: &mut egui::Ui, groups: &[MenuGroup], close_requested: &mut bool) {
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            ui.separator();
        }
        for item in &group.items {
            draw_item(ui, item, close_requested);
        }
    }
}

fn draw_item(ui: &mut egui::Ui, item: &MenuItem, close_requested: &mut bool) {
    if item.has_submenu() {
        ui.menu_button(&item.label, |ui| {
            draw_groups(ui, &item.children, close_requested);
        });
        return;
    }
    let mut button = egui::Button::new(&item.label);
    if let Some(shortcut) = &item.shortcut {
        button = button.shortcut_text(shortcut);
    }
    if ui.add(button).clicked() {
        item.activate();
        *close_requested = true;
    }
}

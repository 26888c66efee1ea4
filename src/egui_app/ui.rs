//! egui renderer: panels, dialogs, and the positioned context menus.

mod basket_dialog;
mod browser_panel;
mod menus;
mod side_panel;
mod status_bar;
mod task_board;

pub use menus::{FILE_MENU_KEY, MAIN_MENU_KEY, MenuHandles, register_menus};

use eframe::egui;

use super::controller::AppController;

/// Minimum window size the layout is designed for.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 480.0);

/// Top-level eframe application.
pub struct PannierApp {
    controller: AppController,
    menus: MenuHandles,
}

impl PannierApp {
    /// Wire menus, bootstrap state, and hand the app to eframe.
    pub fn new(mut controller: AppController) -> Self {
        let menus = menus::register_menus(&controller.menu_registry(), controller.command_queue());
        controller.bootstrap();
        Self { controller, menus }
    }
}

impl eframe::App for PannierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.tick();

        side_panel::draw(ctx, &mut self.controller, &self.menus);
        status_bar::draw(ctx, &self.controller);
        task_board::draw(ctx, &self.controller);
        browser_panel::draw(ctx, &mut self.controller, &self.menus);
        basket_dialog::draw(ctx, &mut self.controller);
        menus::draw(ctx, &self.controller.menu_registry());

        if self.controller.ui.folders.loading || self.controller.ui.browser.loading {
            ctx.request_repaint();
        }
    }
}

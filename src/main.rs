//! Entry point for the egui-based Pannier UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use std::rc::Rc;

use eframe::egui;
use pannier::egui_app::controller::AppController;
use pannier::egui_app::ui::{MIN_VIEWPORT_SIZE, PannierApp};
use pannier::menu::MenuRegistry;
use pannier::store::Store;
use pannier::{app_dirs, logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(1100.0, 700.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Pannier",
        native_options,
        Box::new(|_cc| match build_app() {
            Ok(app) => Ok(Box::new(app)),
            Err(message) => Ok(Box::new(LaunchError { message })),
        }),
    )?;
    Ok(())
}

fn build_app() -> Result<PannierApp, String> {
    let db_path = app_dirs::database_path().map_err(|err| err.to_string())?;
    let store = Store::open(&db_path).map_err(|err| err.to_string())?;
    let registry = Rc::new(MenuRegistry::new());
    let controller = AppController::new(store, db_path, registry);
    Ok(PannierApp::new(controller))
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}

#![deny(missing_docs)]

//! Entry point for the egui churn prediction form.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use churnsight::artifacts;
use churnsight::config;
use churnsight::egui_app::ui::{ChurnApp, MIN_VIEWPORT_SIZE};
use churnsight::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let app_config = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {err}");
        config::AppConfig::default()
    });
    let display = app_config.display.clone();
    let loaded = artifacts::shared(&app_config.artifacts);

    let viewport = egui::ViewportBuilder::default()
        .with_title("Customer Churn Prediction")
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([1100.0, 760.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Customer Churn Prediction",
        native_options,
        Box::new(move |_cc| {
            let app: Box<dyn eframe::App> = match ChurnApp::new(loaded, display) {
                Ok(app) => Box::new(app),
                Err(message) => Box::new(LaunchError { message }),
            };
            Ok(app)
        }),
    )?;
    Ok(())
}

/// Shown instead of the form when the artifacts could not be loaded.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Customer Churn Prediction System");
                ui.add_space(12.0);
                ui.colored_label(ui.visuals().error_fg_color, &self.message);
            });
        });
    }
}

//! egui renderer for the churn prediction form.

mod form;
mod result;
pub mod style;

use std::sync::Arc;

use egui::{RichText, Vec2};

use crate::artifacts::{ArtifactError, Artifacts};
use crate::config::DisplaySettings;
use crate::egui_app::controller::ChurnController;

/// Smallest window that still fits the three form columns.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(900.0, 640.0);

/// Renders the form using the shared controller state.
pub struct ChurnApp {
    controller: ChurnController,
    visuals_set: bool,
}

impl ChurnApp {
    /// Create the app from the artifact load outcome; a failed load is returned as the
    /// message to display instead of the form.
    pub fn new(
        artifacts: Result<Arc<Artifacts>, &ArtifactError>,
        display: DisplaySettings,
    ) -> Result<Self, String> {
        let controller = ChurnController::from_artifacts(artifacts, display)?;
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Customer Churn Prediction System")
                    .size(30.0)
                    .strong()
                    .color(palette.text_heading),
            );
            ui.label(
                RichText::new("Enter Customer Details to Predict Churn")
                    .size(18.0)
                    .color(palette.text_muted),
            );
        });
        ui.add_space(8.0);
        ui.separator();
    }
}

impl eframe::App for ChurnApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("churn_form_scroll")
                .show(ui, |ui| {
                    self.render_header(ui);
                    self.render_form(ui);
                    self.render_result(ui);
                });
        });
    }
}

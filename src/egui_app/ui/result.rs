use egui::{Color32, CornerRadius, Frame, Margin, RichText, Ui};

use super::{ChurnApp, style};
use crate::egui_app::state::{PredictionView, ResultState, ResultTone};

impl ChurnApp {
    pub(super) fn render_result(&mut self, ui: &mut Ui) {
        ui.add_space(12.0);
        match &self.controller.ui.result {
            ResultState::Empty => {}
            ResultState::Prediction(view) => {
                ui.separator();
                prediction_banner(ui, view);
            }
            ResultState::Failed(message) => {
                ui.separator();
                banner(ui, ResultTone::Churn, |ui, text| {
                    ui.label(RichText::new("Prediction failed").strong().color(text));
                    ui.label(RichText::new(message).color(text));
                });
            }
        }
    }
}

fn prediction_banner(ui: &mut Ui, view: &PredictionView) {
    banner(ui, view.tone, |ui, text| {
        ui.label(RichText::new(&view.headline).size(18.0).strong().color(text));
        if let Some(probability) = &view.probability {
            ui.label(RichText::new(probability).color(text));
        }
    });
    if let Some(suggestion) = &view.suggestion {
        ui.add_space(6.0);
        ui.label(RichText::new(suggestion).color(style::palette().text_primary));
    }
}

fn banner(ui: &mut Ui, tone: ResultTone, add_contents: impl FnOnce(&mut Ui, Color32)) {
    let (fill, text) = style::result_colors(tone);
    Frame::new()
        .fill(fill)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            add_contents(ui, text);
        });
}

use std::ops::RangeInclusive;

use egui::{Color32, CornerRadius, Frame, Margin, RichText, Ui};

use super::{ChurnApp, style};
use crate::features::{
    AGE_RANGE, CREDIT_SCORE_RANGE, GENDERS, GEOGRAPHIES, PRODUCTS_RANGE, TENURE_RANGE, YES_NO,
};

const SUBMIT_HEIGHT: f32 = 48.0;

impl ChurnApp {
    pub(super) fn render_form(&mut self, ui: &mut Ui) {
        let form = &mut self.controller.ui.form;
        ui.add_space(8.0);
        ui.columns(3, |columns| {
            section(&mut columns[0], "Personal Info", |ui| {
                number_u32(ui, "Age", &mut form.age, AGE_RANGE);
                choice(ui, "gender", "Gender", &mut form.gender, &GENDERS);
                choice(
                    ui,
                    "geography",
                    "Geography (Country)",
                    &mut form.geography,
                    &GEOGRAPHIES,
                );
                number_f64(ui, "Estimated Salary", &mut form.estimated_salary, 100.0);
            });
            section(&mut columns[1], "Bank Details", |ui| {
                number_u32(ui, "Credit Score", &mut form.credit_score, CREDIT_SCORE_RANGE);
                number_f64(ui, "Balance", &mut form.balance, 100.0);
                number_u32(
                    ui,
                    "Number of Products",
                    &mut form.num_of_products,
                    PRODUCTS_RANGE,
                );
                number_u32(ui, "Tenure (Years)", &mut form.tenure, TENURE_RANGE);
            });
            section(&mut columns[2], "Activity & Score", |ui| {
                choice(ui, "has_cr_card", "Has Credit Card?", &mut form.has_cr_card, &YES_NO);
                choice(
                    ui,
                    "is_active_member",
                    "Is Active Member?",
                    &mut form.is_active_member,
                    &YES_NO,
                );
                choice(ui, "complain", "Any Complain?", &mut form.complain, &YES_NO);
                number_u32(
                    ui,
                    "Satisfaction Score",
                    &mut form.satisfaction_score,
                    0..=u32::MAX,
                );
                number_u32(ui, "Points Earned", &mut form.point_earned, 0..=u32::MAX);
            });
        });

        ui.add_space(12.0);
        ui.separator();
        self.render_actions(ui);
    }

    fn render_actions(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let submit = egui::Button::new(
            RichText::new("Predict Result")
                .size(20.0)
                .strong()
                .color(Color32::WHITE),
        )
        .fill(palette.accent)
        .corner_radius(CornerRadius::same(10));
        if ui
            .add_sized([ui.available_width(), SUBMIT_HEIGHT], submit)
            .clicked()
        {
            self.controller.submit();
        }
        ui.horizontal(|ui| {
            if ui.link("Reset form").clicked() {
                self.controller.reset_form();
            }
            let mut show_probability = self.controller.show_probability();
            if ui
                .checkbox(&mut show_probability, "Show churn probability")
                .changed()
            {
                self.controller.set_show_probability(show_probability);
            }
        });
    }
}

fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    let palette = style::palette();
    Frame::new()
        .fill(palette.bg_panel)
        .stroke(style::panel_stroke())
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                RichText::new(title)
                    .size(18.0)
                    .strong()
                    .color(palette.text_heading),
            );
            ui.add_space(6.0);
            add_contents(ui);
        });
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(style::palette().text_muted));
}

fn number_u32(ui: &mut Ui, label: &str, value: &mut u32, range: RangeInclusive<u32>) {
    field_label(ui, label);
    ui.add(egui::DragValue::new(value).range(range));
    ui.add_space(6.0);
}

fn number_f64(ui: &mut Ui, label: &str, value: &mut f64, speed: f64) {
    field_label(ui, label);
    ui.add(
        egui::DragValue::new(value)
            .range(0.0..=f64::MAX)
            .speed(speed)
            .fixed_decimals(2),
    );
    ui.add_space(6.0);
}

fn choice(ui: &mut Ui, id: &str, label: &str, value: &mut String, options: &[&str]) {
    field_label(ui, label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.clone())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(&mut *value, option.to_string(), *option);
            }
        });
    ui.add_space(6.0);
}

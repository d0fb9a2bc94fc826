//! Shared UI components.

use eframe::egui::{self, Color32, RichText, Sense, Ui};
use egui_phosphor::regular::CHECK;

use crate::wizard::StepIndicator;

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const ACCENT: Color32 = Color32::from_rgb(100, 150, 230);
}

/// Render one entry of the wizard step indicator bar.
///
/// Completed steps show a check mark, the active step is highlighted, and
/// upcoming steps are dimmed.
pub fn step_dot(ui: &mut Ui, step: usize, title: &str, marker: StepIndicator) {
    let diameter = 28.0;

    ui.vertical(|ui| {
        ui.set_width(90.0);

        let (rect, _response) = ui.allocate_exact_size(egui::vec2(diameter, diameter), Sense::hover());
        if ui.is_rect_visible(rect) {
            let (fill, text_color) = match marker {
                StepIndicator::Completed => (colors::SUCCESS, Color32::WHITE),
                StepIndicator::Active => (colors::ACCENT, Color32::WHITE),
                StepIndicator::Upcoming => (ui.visuals().faint_bg_color, ui.visuals().weak_text_color()),
            };

            ui.painter().circle_filled(rect.center(), diameter / 2.0, fill);

            let glyph = match marker {
                StepIndicator::Completed => CHECK.to_string(),
                _ => step.to_string(),
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                glyph,
                egui::FontId::proportional(14.0),
                text_color,
            );
        }

        let label = RichText::new(title).small();
        ui.label(if matches!(marker, StepIndicator::Upcoming) {
            label.weak()
        } else {
            label
        });
    });
}

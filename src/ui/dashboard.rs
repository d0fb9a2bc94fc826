//! Dashboard panel with reconciliation stats and activity log.
//!
//! All numbers come from the backend summary; nothing is computed here.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::ARROWS_CLOCKWISE;

use super::app::{App, LogLevel};

/// Show the dashboard panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        // Header
        ui.label(RichText::new("VatDesk").size(32.0).strong());
        ui.add_space(5.0);
        let subtitle = if app.config.organization.name.is_empty() {
            "VAT Compliance Dashboard".to_string()
        } else {
            format!("{} - VAT Compliance Dashboard", app.config.organization.name)
        };
        ui.label(RichText::new(subtitle).size(14.0).weak());

        ui.add_space(30.0);

        // Stat cards row
        match &app.summary {
            Some(summary) => {
                let period = summary.period_label.clone();
                ui.horizontal(|ui| {
                    let available = ui.available_width();
                    let start_offset = ((available - 680.0) / 2.0).max(0.0);
                    ui.add_space(start_offset);

                    stat_card(ui, "Total Invoices", &summary.total_invoices.to_string(), &period);
                    stat_card(ui, "Matched", &summary.matched_invoices.to_string(), "Reconciled invoices");
                    stat_card(
                        ui,
                        "Exceptions",
                        &summary.unmatched_invoices.to_string(),
                        "Need attention",
                    );
                    stat_card(
                        ui,
                        "Compliance Score",
                        &format!("{:.0}%", summary.compliance_score),
                        "Computed by backend",
                    );
                });
            }
            None if app.is_loading => {
                ui.spinner();
                ui.label("Loading summary...");
            }
            None => {
                ui.label(RichText::new("No summary available").weak());
            }
        }

        ui.add_space(20.0);

        ui.add_enabled_ui(!app.is_loading, |ui| {
            if ui.button(format!("{ARROWS_CLOCKWISE} Refresh")).clicked() {
                app.log(LogLevel::Info, "Refreshing summary");
                app.refresh_summary();
            }
        });

        ui.add_space(30.0);
    });

    // Recent Activity
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::symmetric(10, 0))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(RichText::new("Recent Activity").strong());
            ui.add_space(10.0);

            ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                if app.log_messages.is_empty() {
                    ui.label(RichText::new("No recent activity").weak());
                } else {
                    for entry in app.log_messages.iter().rev().take(10) {
                        let color = match entry.level {
                            LogLevel::Info => Color32::GRAY,
                            LogLevel::Success => Color32::from_rgb(100, 200, 100),
                            LogLevel::Warning => Color32::from_rgb(230, 180, 50),
                            LogLevel::Error => Color32::from_rgb(230, 100, 100),
                        };

                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                    .small()
                                    .color(Color32::DARK_GRAY),
                            );
                            ui.label(RichText::new(&entry.message).color(color));
                        });
                    }
                }
            });
        });
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

//! First-run setup wizard screen.
//!
//! Renders whichever step the flow controller says is active and binds the
//! widgets directly to the flow's form model. All step logic (validation,
//! capture, completion) lives in the controller; this module only draws.

use std::path::PathBuf;

use eframe::egui::{self, RichText};

use crate::config::AppConfig;
use crate::models::InviteRole;
use crate::ui::components::{colors, step_dot};
use crate::wizard::{CompletionOutcome, Destination, FilingPeriod, PendingNavigation, SetupFlow, SetupForm};

/// Setup wizard screen state.
pub struct SetupScreen {
    flow: SetupFlow,
    config: AppConfig,
    config_path: PathBuf,
    /// Error from a failed config load on startup, shown once.
    initial_error: Option<String>,
    /// Current validation message, shown as a blocking dialog.
    validation_error: Option<String>,
}

impl SetupScreen {
    pub fn new(flow: SetupFlow, config: AppConfig, config_path: PathBuf, initial_error: Option<String>) -> Self {
        Self {
            flow,
            config,
            config_path,
            initial_error,
            validation_error: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render one frame. Returns the destination once setup has finished.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Destination> {
        // Resolve an in-flight completion call
        let mut nav = PendingNavigation::default();
        if let Some(outcome) = self.flow.poll_completion(&mut nav) {
            self.persist_profile(outcome);
        }

        // Keep polling while the backend call is pending
        if self.flow.is_submitting() {
            ctx.request_repaint();
        }

        // Show initial error dialog
        if let Some(err) = self.initial_error.clone() {
            egui::Window::new("Configuration Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, &err);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.initial_error = None;
                    }
                });
            return None;
        }

        // Blocking validation dialog
        let mut dismiss = false;
        if let Some(msg) = &self.validation_error {
            egui::Window::new("Check Your Input")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        dismiss = true;
                    }
                });
        }
        if dismiss {
            self.validation_error = None;
        }

        let dialog_open = self.validation_error.is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!dialog_open, |ui| {
                self.show_wizard(ui);
            });
        });

        nav.take()
    }

    fn show_wizard(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);

            // Header
            ui.horizontal(|ui| {
                ui.heading(RichText::new("VatDesk Setup").size(24.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "Step {} of {}",
                        self.flow.current_step(),
                        SetupFlow::TOTAL_STEPS
                    ));
                });
            });

            ui.separator();
            ui.add_space(10.0);

            // Step indicator bar
            ui.horizontal(|ui| {
                let available = ui.available_width();
                let bar_width = 90.0 * SetupFlow::TOTAL_STEPS as f32;
                ui.add_space(((available - bar_width) / 2.0).max(0.0));

                for step in 1..=SetupFlow::TOTAL_STEPS {
                    step_dot(ui, step, SetupFlow::step_title(step), self.flow.indicator(step));
                }
            });

            ui.add_space(20.0);
            ui.heading(SetupFlow::step_title(self.flow.current_step()));
            ui.add_space(20.0);

            // Step content
            match self.flow.current_step() {
                1 => show_organization_step(ui, &mut self.flow.form),
                2 => show_filing_step(ui, &mut self.flow.form),
                3 => show_team_step(ui, &mut self.flow.form),
                4 => show_review_step(ui, &self.flow.form),
                _ => {}
            }

            ui.add_space(30.0);
            ui.separator();

            // Navigation buttons
            if self.flow.is_submitting() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Finalizing setup...");
                });
            } else {
                ui.horizontal(|ui| {
                    if self.flow.back_visible() && ui.button("< Back").clicked() {
                        self.flow.retreat();
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = format!("{} >", self.flow.next_label());
                        if ui.button(label).clicked()
                            && let Err(e) = self.flow.advance()
                        {
                            self.validation_error = Some(e.to_string());
                        }
                    });
                });
            }
        });
    }

    /// Write the organization profile into the local config once setup ends.
    ///
    /// A save failure is logged but never blocks reaching the dashboard.
    fn persist_profile(&mut self, outcome: CompletionOutcome) {
        tracing::info!("Setup finished: {outcome:?}");

        let collected = self.flow.collected();
        self.config.organization.name = collected.get("organization_name").cloned().unwrap_or_default();
        self.config.organization.tax_registration_number = collected
            .get("tax_registration_number")
            .cloned()
            .unwrap_or_default();

        if let Err(e) = self.config.save(&self.config_path) {
            tracing::warn!("Failed to save config after setup: {e}");
        }
    }
}

fn show_organization_step(ui: &mut egui::Ui, form: &mut SetupForm) {
    ui.label("Tell us about your organization.");
    ui.add_space(10.0);

    egui::Grid::new("organization_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Organization name:");
            ui.text_edit_singleline(&mut form.organization_name);
            ui.end_row();

            ui.label("Tax registration number:");
            ui.text_edit_singleline(&mut form.tax_registration_number);
            ui.end_row();
        });

    ui.add_space(10.0);
    ui.label(RichText::new("The tax registration number is the 15-character TRN on your VAT certificate.").weak());
}

fn show_filing_step(ui: &mut egui::Ui, form: &mut SetupForm) {
    ui.label("Configure your VAT filing preferences.");
    ui.add_space(10.0);

    egui::Grid::new("filing_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Filing period:");
            egui::ComboBox::from_id_salt("filing_period")
                .selected_text(form.filing_period.label())
                .show_ui(ui, |ui| {
                    for period in FilingPeriod::ALL {
                        ui.selectable_value(&mut form.filing_period, period, period.label());
                    }
                });
            ui.end_row();

            ui.label("Base currency:");
            ui.text_edit_singleline(&mut form.base_currency);
            ui.end_row();

            ui.label("First filing month:");
            ui.text_edit_singleline(&mut form.first_filing_month);
            ui.end_row();
        });
}

fn show_team_step(ui: &mut egui::Ui, form: &mut SetupForm) {
    ui.label("Invite teammates to your workspace.");
    ui.label(RichText::new("This step is optional - rows without an email are skipped.").italics());
    ui.add_space(10.0);

    egui::Grid::new("team_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            for (idx, row) in form.invitations.iter_mut().enumerate() {
                ui.text_edit_singleline(&mut row.email);
                egui::ComboBox::from_id_salt(("invite_role", idx))
                    .selected_text(row.role.label())
                    .show_ui(ui, |ui| {
                        for role in InviteRole::ALL {
                            ui.selectable_value(&mut row.role, role, role.label());
                        }
                    });
                ui.end_row();
            }
        });

    ui.add_space(5.0);
    if ui.button("+ Add Invitation").clicked() {
        form.add_invitation_row();
    }

    ui.add_space(15.0);
    ui.label("Note to include in the invitation email:");
    ui.text_edit_multiline(&mut form.invite_note);
}

fn show_review_step(ui: &mut egui::Ui, form: &SetupForm) {
    ui.label("Review your configuration:");
    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Organization");
        ui.label(format!("  {}", form.organization_name.trim()));
        ui.label(format!("  TRN: {}", form.tax_registration_number.trim()));
    });

    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Filing");
        ui.label(format!("  Period: {}", form.filing_period.label()));
        ui.label(format!("  Currency: {}", form.base_currency.trim()));
        if !form.first_filing_month.trim().is_empty() {
            ui.label(format!("  First filing: {}", form.first_filing_month.trim()));
        }
    });

    ui.add_space(10.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Team");
        let invitations = form.invitation_records();
        if invitations.is_empty() {
            ui.label("  No invitations");
        } else {
            for invitation in &invitations {
                ui.label(format!("  {} ({})", invitation.email, invitation.role.label()));
            }
        }
    });

    ui.add_space(20.0);
    ui.label(RichText::new("Finishing setup sends this configuration to the compliance backend.").weak());
}

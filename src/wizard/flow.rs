//! Guided setup flow state machine.
//!
//! Drives the user through the ordered setup steps, validating and
//! accumulating input at each step, and finalizing by submitting the
//! aggregated configuration to the backend.

use std::collections::HashMap;
use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::{Invitation, SetupPayload};

use super::form::SetupForm;

/// How long to wait for the backend's confirmation before proceeding anyway.
const COMPLETION_FALLBACK: Duration = Duration::from_secs(3);

/// Marker state for one entry in the step indicator bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIndicator {
    Completed,
    Active,
    Upcoming,
}

/// How setup finished.
///
/// `AssumedComplete` means the backend never confirmed (failure, dropped
/// connection, or silence past the fallback delay) but the flow proceeded to
/// the dashboard anyway. Onboarding deliberately fails open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Confirmed,
    AssumedComplete,
}

/// Logical navigation targets requested by the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Dashboard,
}

/// Router seam: whoever hosts the flow decides what "open" means.
pub trait Navigator {
    fn open(&mut self, destination: Destination);
}

/// Navigator that records the requested destination for the caller to act on.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    destination: Option<Destination>,
}

impl PendingNavigation {
    pub fn take(&mut self) -> Option<Destination> {
        self.destination.take()
    }
}

impl Navigator for PendingNavigation {
    fn open(&mut self, destination: Destination) {
        self.destination = Some(destination);
    }
}

/// Completion collaborator seam.
///
/// `submit` fires the setup-completion call and returns a receiver carrying
/// the backend's boolean success flag. A dropped sender counts as no answer.
pub trait SetupSubmitter {
    fn submit(&self, payload: SetupPayload) -> mpsc::Receiver<bool>;
}

/// Flow lifecycle phase.
enum FlowPhase {
    /// User is moving between steps.
    InProgress,
    /// Payload submitted, waiting for confirmation or the fallback deadline.
    Submitting { rx: mpsc::Receiver<bool>, deadline: Instant },
    /// Terminal. No transitions leave this phase.
    Completed,
}

/// Setup flow controller.
pub struct SetupFlow {
    /// Current step (1-based).
    current_step: usize,
    /// Bound form model edited directly by the UI.
    pub form: SetupForm,
    /// Validated field values, merged across visited steps.
    collected: HashMap<String, String>,
    /// Invitation records, re-derived from the form on each team-step capture.
    invitations: Vec<Invitation>,
    phase: FlowPhase,
    submitter: Box<dyn SetupSubmitter>,
    fallback: Duration,
}

impl SetupFlow {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 4;

    pub fn new(submitter: Box<dyn SetupSubmitter>) -> Self {
        Self {
            current_step: 1,
            form: SetupForm::default(),
            collected: HashMap::new(),
            invitations: Vec::new(),
            phase: FlowPhase::InProgress,
            submitter,
            fallback: COMPLETION_FALLBACK,
        }
    }

    /// Override the completion fallback delay.
    pub fn with_fallback(mut self, fallback: Duration) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn collected(&self) -> &HashMap<String, String> {
        &self.collected
    }

    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FlowPhase::Submitting { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, FlowPhase::Completed)
    }

    /// Get the title for a step.
    pub fn step_title(step: usize) -> &'static str {
        match step {
            1 => "Organization",
            2 => "Filing Settings",
            3 => "Invite Your Team",
            4 => "Review",
            _ => "Setup",
        }
    }

    /// Validate the fields bound to a step.
    ///
    /// Only the organization step carries rules; the others always pass.
    fn validate_step(&self, step: usize) -> Result<()> {
        if step == 1 {
            if self.form.organization_name.trim().is_empty() {
                return Err(AppError::validation("Organization name is required"));
            }
            if self.form.tax_registration_number.trim().chars().count() != 15 {
                return Err(AppError::validation(
                    "Tax registration number must be exactly 15 characters",
                ));
            }
        }
        Ok(())
    }

    /// Merge a step's current field values into the collected data.
    ///
    /// Scalar values overwrite any previously captured value for the same
    /// field. The team step re-derives the invitation list wholesale, so
    /// revisiting it never leaves stale rows behind.
    fn capture_step_data(&mut self, step: usize) {
        for (name, value) in self.form.step_fields(step) {
            self.collected.insert(name.to_string(), value);
        }
        if step == 3 {
            self.invitations = self.form.invitation_records();
        }
    }

    /// Move forward one step, or finish from the last step.
    ///
    /// Validation failure leaves the flow unchanged and returns the
    /// user-facing message.
    pub fn advance(&mut self) -> Result<()> {
        if !matches!(self.phase, FlowPhase::InProgress) {
            return Ok(());
        }

        self.validate_step(self.current_step)?;
        self.capture_step_data(self.current_step);

        if self.current_step == Self::TOTAL_STEPS {
            self.complete();
        } else {
            self.current_step += 1;
            info!("Setup advanced to step {}", self.current_step);
        }
        Ok(())
    }

    /// Move back one step. No validation, no data capture.
    pub fn retreat(&mut self) {
        if matches!(self.phase, FlowPhase::InProgress) && self.current_step > 1 {
            self.current_step -= 1;
        }
    }

    /// Submit the aggregated configuration. Fires at most once.
    fn complete(&mut self) {
        let payload = SetupPayload {
            fields: self.collected.clone(),
            invitations: self.invitations.clone(),
        };

        info!(
            "Submitting setup: {} fields, {} invitations",
            payload.fields.len(),
            payload.invitations.len()
        );

        let rx = self.submitter.submit(payload);
        self.phase = FlowPhase::Submitting {
            rx,
            deadline: Instant::now() + self.fallback,
        };
    }

    /// Resolve an in-flight completion call.
    ///
    /// Called once per frame while submitting. An explicit success flag
    /// confirms immediately; anything else (explicit failure, dropped
    /// channel, silence) resolves as `AssumedComplete` once the fallback
    /// deadline passes. Either way the navigator is asked for the dashboard
    /// exactly once.
    pub fn poll_completion(&mut self, navigator: &mut dyn Navigator) -> Option<CompletionOutcome> {
        let (answer, deadline) = match &self.phase {
            FlowPhase::Submitting { rx, deadline } => (rx.try_recv(), *deadline),
            _ => return None,
        };

        let outcome = match answer {
            Ok(true) => CompletionOutcome::Confirmed,
            Ok(false) | Err(TryRecvError::Disconnected) | Err(TryRecvError::Empty) => {
                if Instant::now() < deadline {
                    return None;
                }
                CompletionOutcome::AssumedComplete
            }
        };

        match outcome {
            CompletionOutcome::Confirmed => info!("Setup confirmed by backend"),
            CompletionOutcome::AssumedComplete => {
                warn!("Setup completion unconfirmed, proceeding to dashboard anyway")
            }
        }

        self.phase = FlowPhase::Completed;
        navigator.open(Destination::Dashboard);
        Some(outcome)
    }

    /// Indicator marker for a step position.
    pub fn indicator(&self, step: usize) -> StepIndicator {
        if step < self.current_step {
            StepIndicator::Completed
        } else if step == self.current_step {
            StepIndicator::Active
        } else {
            StepIndicator::Upcoming
        }
    }

    /// Whether the back control should be shown.
    pub fn back_visible(&self) -> bool {
        self.current_step > 1
    }

    /// Label for the forward control.
    pub fn next_label(&self) -> &'static str {
        if self.current_step == Self::TOTAL_STEPS {
            "Go to Dashboard"
        } else {
            "Continue"
        }
    }
}

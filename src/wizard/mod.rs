//! Guided first-run setup flow.
//!
//! The flow controller owns the step state machine and the collected data;
//! the UI layer renders whatever step is active and binds its widgets to the
//! form model.

pub mod flow;
pub mod form;

#[cfg(test)]
mod tests;

pub use flow::{
    CompletionOutcome, Destination, Navigator, PendingNavigation, SetupFlow, SetupSubmitter, StepIndicator,
};
pub use form::{FilingPeriod, InvitationRow, SetupForm};

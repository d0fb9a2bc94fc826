//! Unit tests for the setup flow controller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::time::{Duration, Instant};

use super::flow::{CompletionOutcome, Destination, Navigator, SetupFlow, SetupSubmitter, StepIndicator};
use crate::models::{InviteRole, SetupPayload};

/// How the mock backend answers a submission.
#[derive(Clone, Copy)]
enum Reply {
    Confirm,
    Reject,
    Silence,
}

struct MockSubmitter {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    last_payload: Arc<Mutex<Option<SetupPayload>>>,
    // Keeps senders alive so a silent backend reads as "no answer yet"
    // rather than a dropped channel.
    held: Mutex<Vec<mpsc::Sender<bool>>>,
}

impl SetupSubmitter for MockSubmitter {
    fn submit(&self, payload: SetupPayload) -> mpsc::Receiver<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload);

        let (tx, rx) = mpsc::channel();
        match self.reply {
            Reply::Confirm => tx.send(true).unwrap(),
            Reply::Reject => tx.send(false).unwrap(),
            Reply::Silence => self.held.lock().unwrap().push(tx),
        }
        rx
    }
}

#[derive(Default)]
struct RecordingNavigator {
    opened: Vec<Destination>,
}

impl Navigator for RecordingNavigator {
    fn open(&mut self, destination: Destination) {
        self.opened.push(destination);
    }
}

fn flow_with(reply: Reply) -> (SetupFlow, Arc<AtomicUsize>, Arc<Mutex<Option<SetupPayload>>>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_payload = Arc::new(Mutex::new(None));
    let submitter = MockSubmitter {
        reply,
        calls: Arc::clone(&calls),
        last_payload: Arc::clone(&last_payload),
        held: Mutex::new(Vec::new()),
    };
    let flow = SetupFlow::new(Box::new(submitter)).with_fallback(Duration::from_millis(50));
    (flow, calls, last_payload)
}

fn fill_organization_step(flow: &mut SetupFlow) {
    flow.form.organization_name = "Acme Trading LLC".to_string();
    flow.form.tax_registration_number = "100123456700003".to_string();
}

/// Drive the flow to completion, polling until the navigator fires.
fn poll_until_resolved(flow: &mut SetupFlow, nav: &mut RecordingNavigator) -> CompletionOutcome {
    let start = Instant::now();
    loop {
        if let Some(outcome) = flow.poll_completion(nav) {
            return outcome;
        }
        assert!(start.elapsed() < Duration::from_secs(2), "completion never resolved");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_retreat_decrements_and_stops_at_first_step() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    fill_organization_step(&mut flow);
    flow.advance().unwrap();
    flow.advance().unwrap();
    assert_eq!(flow.current_step(), 3);

    flow.retreat();
    assert_eq!(flow.current_step(), 2);
    flow.retreat();
    assert_eq!(flow.current_step(), 1);

    // Repeated retreat from step 1 is a no-op
    flow.retreat();
    assert_eq!(flow.current_step(), 1);
}

#[test]
fn test_advance_blocked_on_empty_organization_name() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    flow.form.tax_registration_number = "100123456700003".to_string();

    let err = flow.advance().unwrap_err();
    assert_eq!(flow.current_step(), 1);
    assert!(err.to_string().contains("Organization name"));
}

#[test]
fn test_advance_blocked_on_wrong_registration_number_length() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    flow.form.organization_name = "Acme Trading LLC".to_string();

    flow.form.tax_registration_number = "12345".to_string();
    assert!(flow.advance().is_err());
    assert_eq!(flow.current_step(), 1);

    flow.form.tax_registration_number = "1001234567000031".to_string();
    assert!(flow.advance().is_err());
    assert_eq!(flow.current_step(), 1);
}

#[test]
fn test_valid_organization_step_advances_and_captures() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    fill_organization_step(&mut flow);

    flow.advance().unwrap();

    assert_eq!(flow.current_step(), 2);
    assert_eq!(flow.collected()["organization_name"], "Acme Trading LLC");
    assert_eq!(flow.collected()["tax_registration_number"], "100123456700003");
}

#[test]
fn test_full_walk_submits_union_of_fields_exactly_once() {
    let (mut flow, calls, last_payload) = flow_with(Reply::Confirm);
    fill_organization_step(&mut flow);
    flow.form.invite_note = "Welcome aboard".to_string();

    for _ in 0..SetupFlow::TOTAL_STEPS {
        flow.advance().unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(flow.is_submitting());

    let payload = last_payload.lock().unwrap().clone().unwrap();
    assert_eq!(payload.fields["organization_name"], "Acme Trading LLC");
    assert_eq!(payload.fields["filing_period"], "Quarterly");
    assert_eq!(payload.fields["base_currency"], "AED");
    assert_eq!(payload.fields["invite_note"], "Welcome aboard");

    // Further advance calls are no-ops and never re-submit
    flow.advance().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_invitation_rows_are_skipped_at_capture() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    fill_organization_step(&mut flow);
    flow.advance().unwrap();
    flow.advance().unwrap();
    assert_eq!(flow.current_step(), 3);

    flow.form.add_invitation_row();
    flow.form.add_invitation_row();
    flow.form.invitations[0].email = "lee@acme.example".to_string();
    flow.form.invitations[0].role = InviteRole::Admin;

    flow.advance().unwrap();

    assert_eq!(flow.invitations().len(), 1);
    assert_eq!(flow.invitations()[0].email, "lee@acme.example");
}

#[test]
fn test_revisiting_team_step_rederives_invitations_from_form() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    fill_organization_step(&mut flow);
    flow.advance().unwrap();
    flow.advance().unwrap();
    assert_eq!(flow.current_step(), 3);

    flow.form.add_invitation_row();
    flow.form.add_invitation_row();
    flow.form.invitations[0].email = "lee@acme.example".to_string();
    flow.form.invitations[1].email = "sam@acme.example".to_string();
    flow.advance().unwrap();
    assert_eq!(flow.invitations().len(), 2);

    // Go back, clear one email, and capture again: the list is rebuilt
    // from the current rows, so the cleared entry does not linger.
    flow.retreat();
    flow.form.invitations[0].email.clear();
    flow.advance().unwrap();

    assert_eq!(flow.invitations().len(), 1);
    assert_eq!(flow.invitations()[0].email, "sam@acme.example");
}

#[test]
fn test_revisiting_a_step_overwrites_captured_values() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    fill_organization_step(&mut flow);
    flow.advance().unwrap();

    flow.retreat();
    flow.form.organization_name = "Acme Holdings LLC".to_string();
    flow.advance().unwrap();

    assert_eq!(flow.collected()["organization_name"], "Acme Holdings LLC");
    assert_eq!(flow.collected().len(), 2);
}

#[test]
fn test_confirmed_completion_navigates_to_dashboard() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    fill_organization_step(&mut flow);
    for _ in 0..SetupFlow::TOTAL_STEPS {
        flow.advance().unwrap();
    }

    let mut nav = RecordingNavigator::default();
    let outcome = poll_until_resolved(&mut flow, &mut nav);

    assert_eq!(outcome, CompletionOutcome::Confirmed);
    assert_eq!(nav.opened, vec![Destination::Dashboard]);
    assert!(flow.is_completed());

    // Terminal: polling again does nothing
    assert!(flow.poll_completion(&mut nav).is_none());
    assert_eq!(nav.opened.len(), 1);
}

#[test]
fn test_silent_backend_still_reaches_dashboard_after_fallback() {
    let (mut flow, _, _) = flow_with(Reply::Silence);
    fill_organization_step(&mut flow);
    for _ in 0..SetupFlow::TOTAL_STEPS {
        flow.advance().unwrap();
    }

    let mut nav = RecordingNavigator::default();
    let outcome = poll_until_resolved(&mut flow, &mut nav);

    assert_eq!(outcome, CompletionOutcome::AssumedComplete);
    assert_eq!(nav.opened, vec![Destination::Dashboard]);
}

#[test]
fn test_rejected_completion_fails_open_after_fallback() {
    let (mut flow, _, _) = flow_with(Reply::Reject);
    fill_organization_step(&mut flow);
    for _ in 0..SetupFlow::TOTAL_STEPS {
        flow.advance().unwrap();
    }

    let mut nav = RecordingNavigator::default();

    // An explicit rejection still waits out the fallback delay
    assert!(flow.poll_completion(&mut nav).is_none());

    let outcome = poll_until_resolved(&mut flow, &mut nav);
    assert_eq!(outcome, CompletionOutcome::AssumedComplete);
    assert_eq!(nav.opened, vec![Destination::Dashboard]);
}

#[test]
fn test_retreat_ignored_once_submitting() {
    let (mut flow, _, _) = flow_with(Reply::Silence);
    fill_organization_step(&mut flow);
    for _ in 0..SetupFlow::TOTAL_STEPS {
        flow.advance().unwrap();
    }

    assert!(flow.is_submitting());
    flow.retreat();
    assert_eq!(flow.current_step(), SetupFlow::TOTAL_STEPS);
}

#[test]
fn test_indicator_markers_track_current_step() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    fill_organization_step(&mut flow);
    flow.advance().unwrap();
    flow.advance().unwrap();

    assert_eq!(flow.indicator(1), StepIndicator::Completed);
    assert_eq!(flow.indicator(2), StepIndicator::Completed);
    assert_eq!(flow.indicator(3), StepIndicator::Active);
    assert_eq!(flow.indicator(4), StepIndicator::Upcoming);
}

#[test]
fn test_navigation_controls_follow_step_position() {
    let (mut flow, _, _) = flow_with(Reply::Confirm);
    assert!(!flow.back_visible());
    assert_eq!(flow.next_label(), "Continue");

    fill_organization_step(&mut flow);
    flow.advance().unwrap();
    assert!(flow.back_visible());
    assert_eq!(flow.next_label(), "Continue");

    flow.advance().unwrap();
    flow.advance().unwrap();
    assert_eq!(flow.current_step(), SetupFlow::TOTAL_STEPS);
    assert_eq!(flow.next_label(), "Go to Dashboard");
}

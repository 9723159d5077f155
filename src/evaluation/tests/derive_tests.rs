//! Tests for time-based effective-status derivation.

use crate::application::domain::ApplicationId;
use crate::evaluation::domain::{
    Evaluation, EvaluationStatus, Interviewer, SessionBooking, derive_status,
};
use crate::round::domain::{InterviewMode, RoundId};
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use rstest::rstest;

fn start() -> DateTime<Utc> {
    "2026-03-02T10:00:00Z"
        .parse()
        .expect("valid fixture instant")
}

fn scheduled_evaluation(scheduled_at: DateTime<Utc>, duration_minutes: u32) -> Evaluation {
    let clock = DefaultClock;
    let mut evaluation = Evaluation::new(ApplicationId::new(), RoundId::new(), &clock);
    let interviewer = Interviewer::new("Priya Nair", "priya@example.com").expect("valid interviewer");
    let mode = InterviewMode::online("meet").expect("valid mode");
    let booking = SessionBooking::new(interviewer, scheduled_at, duration_minutes, mode)
        .expect("valid booking");
    evaluation
        .assign_interviewer(booking, &clock)
        .expect("booking should succeed");
    evaluation
}

// A 60-minute session at T has its deadline at T + 75 minutes: the session
// span plus the grace period. Only instants strictly past the deadline
// derive as missed.
#[rstest]
#[case(Duration::minutes(0), EvaluationStatus::Scheduled)]
#[case(Duration::minutes(74), EvaluationStatus::Scheduled)]
#[case(Duration::minutes(75), EvaluationStatus::Scheduled)]
#[case(Duration::minutes(76), EvaluationStatus::Missed)]
#[case(Duration::hours(24), EvaluationStatus::Missed)]
fn derivation_respects_grace_deadline(
    #[case] elapsed: Duration,
    #[case] expected: EvaluationStatus,
) {
    let evaluation = scheduled_evaluation(start(), 60);
    assert_eq!(derive_status(&evaluation, start() + elapsed), expected);
}

#[rstest]
fn derivation_before_session_start_stays_scheduled() {
    let evaluation = scheduled_evaluation(start(), 60);
    assert_eq!(
        derive_status(&evaluation, start() - Duration::hours(2)),
        EvaluationStatus::Scheduled
    );
}

#[rstest]
fn derivation_leaves_non_scheduled_statuses_untouched() {
    let clock = DefaultClock;
    let evaluation = Evaluation::new(ApplicationId::new(), RoundId::new(), &clock);
    assert_eq!(evaluation.status(), EvaluationStatus::Pending);
    assert_eq!(
        derive_status(&evaluation, start() + Duration::days(30)),
        EvaluationStatus::Pending
    );
}

#[rstest]
fn derivation_never_mutates_the_record() {
    let evaluation = scheduled_evaluation(start(), 60);
    let before = evaluation.clone();

    let derived = derive_status(&evaluation, start() + Duration::hours(5));

    assert_eq!(derived, EvaluationStatus::Missed);
    assert_eq!(evaluation, before);
    assert_eq!(evaluation.status(), EvaluationStatus::Scheduled);
}

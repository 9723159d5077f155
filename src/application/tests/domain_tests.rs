//! Domain-focused tests for the application aggregate.

use crate::application::domain::{Application, ApplicationDomainError, ApplicationStatus};
use crate::round::domain::{JobId, RoundId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
fn new_application_starts_applied_without_a_round(clock: DefaultClock) {
    let application = Application::new(JobId::new(), "referred by Sam", &clock);

    assert_eq!(application.status(), ApplicationStatus::Applied);
    assert!(application.current_round_id().is_none());
    assert_eq!(application.notes(), "referred by Sam");
    assert_eq!(application.created_at(), application.updated_at());
}

#[rstest]
fn enter_round_sets_review_status_and_pointer(clock: DefaultClock) {
    let mut application = Application::new(JobId::new(), "", &clock);
    let round_id = RoundId::new();

    application
        .enter_round(round_id, &clock)
        .expect("entering review should succeed");

    assert_eq!(application.status(), ApplicationStatus::UnderReview);
    assert_eq!(application.current_round_id(), Some(round_id));
}

#[rstest]
fn enter_round_advances_the_pointer_while_under_review(clock: DefaultClock) {
    let mut application = Application::new(JobId::new(), "", &clock);
    let first_round = RoundId::new();
    let second_round = RoundId::new();
    application
        .enter_round(first_round, &clock)
        .expect("entering review should succeed");

    application
        .enter_round(second_round, &clock)
        .expect("round-advance should succeed");

    assert_eq!(application.status(), ApplicationStatus::UnderReview);
    assert_eq!(application.current_round_id(), Some(second_round));
}

#[rstest]
fn enter_round_is_rejected_from_a_terminal_status(clock: DefaultClock) {
    let mut application = Application::new(JobId::new(), "", &clock);
    application
        .enter_round(RoundId::new(), &clock)
        .expect("entering review should succeed");
    application
        .transition_to(ApplicationStatus::Shortlisted, &clock)
        .expect("shortlisting should succeed");
    application
        .transition_to(ApplicationStatus::Hired, &clock)
        .expect("hiring should succeed");

    let result = application.enter_round(RoundId::new(), &clock);
    assert_eq!(
        result,
        Err(ApplicationDomainError::InvalidTransition {
            id: application.id(),
            from: ApplicationStatus::Hired,
            to: ApplicationStatus::UnderReview,
        })
    );
}

#[rstest]
fn transition_away_from_review_clears_the_round_pointer(clock: DefaultClock) {
    let mut application = Application::new(JobId::new(), "", &clock);
    application
        .enter_round(RoundId::new(), &clock)
        .expect("entering review should succeed");

    application
        .transition_to(ApplicationStatus::Hold, &clock)
        .expect("holding should succeed");

    assert_eq!(application.status(), ApplicationStatus::Hold);
    assert!(application.current_round_id().is_none());
}

#[rstest]
fn transition_to_rejects_review_as_a_plain_target(clock: DefaultClock) {
    let mut application = Application::new(JobId::new(), "", &clock);

    let result = application.transition_to(ApplicationStatus::UnderReview, &clock);
    assert_eq!(
        result,
        Err(ApplicationDomainError::InvalidTransition {
            id: application.id(),
            from: ApplicationStatus::Applied,
            to: ApplicationStatus::UnderReview,
        })
    );
}

#[rstest]
fn transition_to_rejects_moves_outside_the_table(clock: DefaultClock) {
    let mut application = Application::new(JobId::new(), "", &clock);

    let result = application.transition_to(ApplicationStatus::Hired, &clock);
    assert_eq!(
        result,
        Err(ApplicationDomainError::InvalidTransition {
            id: application.id(),
            from: ApplicationStatus::Applied,
            to: ApplicationStatus::Hired,
        })
    );
    assert_eq!(application.status(), ApplicationStatus::Applied);
}

//! Service orchestration tests for evaluation scheduling.

use std::sync::Arc;

use crate::application::domain::ApplicationId;
use crate::evaluation::{
    adapters::InMemoryEvaluationRepository,
    domain::{
        EvaluationDomainError, EvaluationId, EvaluationStatus, FinalStatus, Interviewer,
        SessionBooking,
    },
    ports::EvaluationRepositoryError,
    services::{EvaluationSchedulingService, SchedulingError},
};
use crate::notify::{NotificationEvent, RecordingDispatcher};
use crate::round::domain::{InterviewMode, RoundId};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    EvaluationSchedulingService<InMemoryEvaluationRepository, RecordingDispatcher, DefaultClock>;

#[fixture]
fn dispatcher() -> RecordingDispatcher {
    RecordingDispatcher::new()
}

#[fixture]
fn service(dispatcher: RecordingDispatcher) -> (TestService, RecordingDispatcher) {
    let service = EvaluationSchedulingService::new(
        Arc::new(InMemoryEvaluationRepository::new()),
        Arc::new(dispatcher.clone()),
        Arc::new(DefaultClock),
    );
    (service, dispatcher)
}

fn booking_at(offset: Duration) -> SessionBooking {
    let interviewer = Interviewer::new("Priya Nair", "priya@example.com").expect("valid interviewer");
    let mode = InterviewMode::online("meet").expect("valid mode");
    SessionBooking::new(interviewer, Utc::now() + offset, 60, mode).expect("valid booking")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_or_create_returns_the_same_record_per_pair(
    service: (TestService, RecordingDispatcher),
) {
    let (service, _) = service;
    let application_id = ApplicationId::new();
    let round_id = RoundId::new();

    let first = service
        .get_or_create(application_id, round_id)
        .await
        .expect("creation should succeed");
    let second = service
        .get_or_create(application_id, round_id)
        .await
        .expect("re-entry should succeed");

    assert_eq!(first.id(), second.id());
    assert_eq!(first.status(), EvaluationStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_interviewer_books_and_notifies(service: (TestService, RecordingDispatcher)) {
    let (service, dispatcher) = service;
    let created = service
        .get_or_create(ApplicationId::new(), RoundId::new())
        .await
        .expect("creation should succeed");

    let committed = service
        .assign_interviewer(created.id(), booking_at(Duration::hours(2)))
        .await
        .expect("booking should succeed");

    assert_eq!(committed.status(), EvaluationStatus::Scheduled);
    let events = dispatcher.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events.first(),
        Some(NotificationEvent::EvaluationScheduled { evaluation_id, .. })
            if *evaluation_id == created.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacement_booking_notifies_as_rescheduled(service: (TestService, RecordingDispatcher)) {
    let (service, dispatcher) = service;
    let created = service
        .get_or_create(ApplicationId::new(), RoundId::new())
        .await
        .expect("creation should succeed");
    service
        .assign_interviewer(created.id(), booking_at(Duration::hours(-4)))
        .await
        .expect("initial booking should succeed");
    service
        .reschedule(created.id())
        .await
        .expect("reschedule should succeed");

    let committed = service
        .assign_interviewer(created.id(), booking_at(Duration::hours(6)))
        .await
        .expect("replacement booking should succeed");

    assert_eq!(committed.status(), EvaluationStatus::Scheduled);
    let events = dispatcher.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events.last(),
        Some(NotificationEvent::EvaluationRescheduled { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_interviewer_rejects_unknown_evaluation(
    service: (TestService, RecordingDispatcher),
) {
    let (service, _) = service;
    let missing = EvaluationId::new();
    let result = service
        .assign_interviewer(missing, booking_at(Duration::hours(1)))
        .await;
    assert!(matches!(
        result,
        Err(SchedulingError::Repository(
            EvaluationRepositoryError::NotFound(id)
        )) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_completed_persists_the_locked_outcome(service: (TestService, RecordingDispatcher)) {
    let (service, _) = service;
    let created = service
        .get_or_create(ApplicationId::new(), RoundId::new())
        .await
        .expect("creation should succeed");
    service
        .assign_interviewer(created.id(), booking_at(Duration::hours(1)))
        .await
        .expect("booking should succeed");

    service
        .mark_completed(created.id(), FinalStatus::Passed, Some(8), None)
        .await
        .expect("finalization should succeed");

    let fetched = service
        .find(created.id())
        .await
        .expect("lookup should succeed")
        .expect("evaluation should exist");
    assert_eq!(fetched.status(), EvaluationStatus::Passed);
    assert!(fetched.is_final());
    assert_eq!(fetched.score(), Some(8));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reschedule_rejects_a_session_still_in_the_future(
    service: (TestService, RecordingDispatcher),
) {
    let (service, _) = service;
    let created = service
        .get_or_create(ApplicationId::new(), RoundId::new())
        .await
        .expect("creation should succeed");
    service
        .assign_interviewer(created.id(), booking_at(Duration::hours(2)))
        .await
        .expect("booking should succeed");

    let result = service.reschedule(created.id()).await;
    assert!(matches!(
        result,
        Err(SchedulingError::Domain(EvaluationDomainError::InvalidState {
            effective: EvaluationStatus::Scheduled,
            ..
        }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_missed_makes_a_lapsed_session_durable(
    service: (TestService, RecordingDispatcher),
) {
    let (service, _) = service;
    let created = service
        .get_or_create(ApplicationId::new(), RoundId::new())
        .await
        .expect("creation should succeed");
    service
        .assign_interviewer(created.id(), booking_at(Duration::hours(-4)))
        .await
        .expect("booking should succeed");

    let committed = service
        .record_missed(created.id())
        .await
        .expect("missed flush should succeed");
    assert_eq!(committed.status(), EvaluationStatus::Missed);

    let fetched = service
        .find(created.id())
        .await
        .expect("lookup should succeed")
        .expect("evaluation should exist");
    assert_eq!(fetched.status(), EvaluationStatus::Missed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn effective_status_can_persist_a_derived_miss(
    service: (TestService, RecordingDispatcher),
) {
    let (service, _) = service;
    let created = service
        .get_or_create(ApplicationId::new(), RoundId::new())
        .await
        .expect("creation should succeed");
    service
        .assign_interviewer(created.id(), booking_at(Duration::hours(-4)))
        .await
        .expect("booking should succeed");

    let effective = service
        .effective_status(created.id(), true)
        .await
        .expect("derivation should succeed");
    assert_eq!(effective, EvaluationStatus::Missed);

    let fetched = service
        .find(created.id())
        .await
        .expect("lookup should succeed")
        .expect("evaluation should exist");
    assert_eq!(fetched.status(), EvaluationStatus::Missed);
}

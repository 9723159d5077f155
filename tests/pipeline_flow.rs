//! End-to-end pipeline flow over the in-memory adapters.
//!
//! Walks an application from submission through review rounds, a missed
//! session, a reschedule, shortlisting, and hiring, projecting the board
//! along the way.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use gatehouse::application::{
    adapters::InMemoryApplicationRepository,
    domain::ApplicationStatus,
    services::{PipelineError, PipelineService, TransitionRequest},
};
use gatehouse::board::{ColumnKey, project};
use gatehouse::evaluation::{
    adapters::InMemoryEvaluationRepository,
    domain::{EvaluationStatus, FinalStatus, Interviewer, SessionBooking},
    services::EvaluationSchedulingService,
};
use gatehouse::notify::{NotificationEvent, RecordingDispatcher};
use gatehouse::round::{
    adapters::InMemoryRoundRepository,
    domain::{InterviewMode, JobId, RoundType, SchedulingTemplate},
    services::{CreateRoundRequest, RoundCatalogService},
};
use mockable::DefaultClock;

struct Stack {
    pipeline: PipelineService<
        InMemoryApplicationRepository,
        InMemoryRoundRepository,
        InMemoryEvaluationRepository,
        RecordingDispatcher,
        DefaultClock,
    >,
    scheduling: EvaluationSchedulingService<
        InMemoryEvaluationRepository,
        RecordingDispatcher,
        DefaultClock,
    >,
    catalog: RoundCatalogService<InMemoryRoundRepository, DefaultClock>,
    dispatcher: RecordingDispatcher,
}

fn stack() -> Stack {
    let applications = Arc::new(InMemoryApplicationRepository::new());
    let rounds = Arc::new(InMemoryRoundRepository::new());
    let evaluations = Arc::new(InMemoryEvaluationRepository::new());
    let dispatcher = RecordingDispatcher::new();
    let clock = Arc::new(DefaultClock);

    Stack {
        pipeline: PipelineService::new(
            applications,
            Arc::clone(&rounds),
            Arc::clone(&evaluations),
            Arc::new(dispatcher.clone()),
            Arc::clone(&clock),
        ),
        scheduling: EvaluationSchedulingService::new(
            evaluations,
            Arc::new(dispatcher.clone()),
            Arc::clone(&clock),
        ),
        catalog: RoundCatalogService::new(rounds, clock),
        dispatcher,
    }
}

fn round_request(job_id: JobId, name: &str, order: i32) -> CreateRoundRequest {
    let mode = InterviewMode::online("meet").expect("valid mode");
    let template = SchedulingTemplate::new(60, mode).expect("valid template");
    CreateRoundRequest::new(job_id, name, order, RoundType::Interview, template)
}

fn booking_at(offset: Duration) -> SessionBooking {
    let interviewer = Interviewer::new("Priya Nair", "priya@example.com").expect("valid interviewer");
    let mode = InterviewMode::online("meet").expect("valid mode");
    SessionBooking::new(interviewer, Utc::now() + offset, 60, mode).expect("valid booking")
}

#[tokio::test(flavor = "multi_thread")]
async fn application_progresses_from_submission_to_hire() {
    let stack = stack();
    let job_id = JobId::new();
    let screen = stack
        .catalog
        .create_round(round_request(job_id, "Screen", 1))
        .await
        .expect("round creation should succeed");
    let technical = stack
        .catalog
        .create_round(round_request(job_id, "Technical", 2))
        .await
        .expect("round creation should succeed");

    let application = stack
        .pipeline
        .create_application(job_id, "strong referral")
        .await
        .expect("application creation should succeed");

    // Entering review is gated.
    let ungated = stack
        .pipeline
        .transition(TransitionRequest::new(
            application.id(),
            ApplicationStatus::UnderReview,
        ))
        .await;
    assert!(matches!(
        ungated,
        Err(PipelineError::ConfirmationRequired { .. })
    ));

    let reviewing = stack
        .pipeline
        .transition(
            TransitionRequest::new(application.id(), ApplicationStatus::UnderReview).confirmed(),
        )
        .await
        .expect("confirmed entry should succeed");
    assert_eq!(reviewing.current_round_id(), Some(screen.id()));

    // Book the screen, let it lapse, reschedule, and pass it.
    let evaluation = stack
        .scheduling
        .get_or_create(application.id(), screen.id())
        .await
        .expect("evaluation should exist after entry");
    stack
        .scheduling
        .assign_interviewer(evaluation.id(), booking_at(Duration::hours(-4)))
        .await
        .expect("booking should succeed");

    let effective = stack
        .scheduling
        .effective_status(evaluation.id(), true)
        .await
        .expect("derivation should succeed");
    assert_eq!(effective, EvaluationStatus::Missed);

    stack
        .scheduling
        .reschedule(evaluation.id())
        .await
        .expect("reschedule should succeed");
    stack
        .scheduling
        .assign_interviewer(evaluation.id(), booking_at(Duration::hours(1)))
        .await
        .expect("replacement booking should succeed");
    stack
        .scheduling
        .mark_completed(evaluation.id(), FinalStatus::Passed, Some(8), None)
        .await
        .expect("finalization should succeed");

    // Advance to the technical round and finish the pipeline.
    stack
        .pipeline
        .transition(
            TransitionRequest::new(application.id(), ApplicationStatus::UnderReview)
                .with_target_round(technical.id())
                .confirmed(),
        )
        .await
        .expect("round-advance should succeed");
    stack
        .pipeline
        .transition(
            TransitionRequest::new(application.id(), ApplicationStatus::Shortlisted).confirmed(),
        )
        .await
        .expect("shortlisting should succeed");
    let hired = stack
        .pipeline
        .transition(
            TransitionRequest::new(application.id(), ApplicationStatus::Hired).confirmed(),
        )
        .await
        .expect("hiring should succeed");
    assert_eq!(hired.status(), ApplicationStatus::Hired);
    assert!(hired.current_round_id().is_none());

    // Both round evaluations exist; history survived the terminal move.
    let evaluations = stack
        .scheduling
        .list_for_application(application.id())
        .await
        .expect("listing should succeed");
    assert_eq!(evaluations.len(), 2);

    // The dispatcher saw the booking, the replacement, and the shortlist.
    let events = stack.dispatcher.events();
    assert!(events
        .iter()
        .any(|event| matches!(event, NotificationEvent::EvaluationScheduled { .. })));
    assert!(events
        .iter()
        .any(|event| matches!(event, NotificationEvent::EvaluationRescheduled { .. })));
    assert!(events
        .iter()
        .any(|event| matches!(event, NotificationEvent::RoundShortlisted { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn board_reflects_the_pipeline_and_flags_lapsed_sessions() {
    let stack = stack();
    let job_id = JobId::new();
    let screen = stack
        .catalog
        .create_round(round_request(job_id, "Screen", 1))
        .await
        .expect("round creation should succeed");

    let reviewing = stack
        .pipeline
        .create_application(job_id, "")
        .await
        .expect("application creation should succeed");
    stack
        .pipeline
        .transition(
            TransitionRequest::new(reviewing.id(), ApplicationStatus::UnderReview).confirmed(),
        )
        .await
        .expect("entry should succeed");
    let evaluation = stack
        .scheduling
        .get_or_create(reviewing.id(), screen.id())
        .await
        .expect("evaluation should exist after entry");
    stack
        .scheduling
        .assign_interviewer(evaluation.id(), booking_at(Duration::hours(-4)))
        .await
        .expect("booking should succeed");

    let applied = stack
        .pipeline
        .create_application(job_id, "")
        .await
        .expect("application creation should succeed");

    let applications = stack
        .pipeline
        .list_for_job(job_id)
        .await
        .expect("listing should succeed");
    let rounds = stack
        .catalog
        .list_for_job(job_id)
        .await
        .expect("listing should succeed");
    let evaluations = stack
        .scheduling
        .list_for_application(reviewing.id())
        .await
        .expect("listing should succeed");

    let board = project(&applications, &rounds, &evaluations, Utc::now());

    let keys: Vec<_> = board.columns.iter().map(|column| column.key).collect();
    assert_eq!(
        keys,
        vec![
            ColumnKey::Applied,
            ColumnKey::Round(screen.id()),
            ColumnKey::Shortlisted,
            ColumnKey::Hold,
            ColumnKey::Hired,
            ColumnKey::Rejected,
        ]
    );

    let review_column = board
        .columns
        .iter()
        .find(|column| column.key == ColumnKey::Round(screen.id()))
        .expect("round column should exist");
    let card = review_column.cards.first().expect("card should exist");
    assert_eq!(card.application_id, reviewing.id());
    assert_eq!(card.evaluation_status, Some(EvaluationStatus::Missed));

    let applied_column = board
        .columns
        .iter()
        .find(|column| column.key == ColumnKey::Applied)
        .expect("applied column should exist");
    assert!(applied_column
        .cards
        .iter()
        .any(|entry| entry.application_id == applied.id()));

    // Flush the detected miss the way a read-path caller would.
    assert_eq!(board.missed_detected, vec![evaluation.id()]);
    for id in board.missed_detected {
        stack
            .scheduling
            .record_missed(id)
            .await
            .expect("missed flush should succeed");
    }
    let flushed = stack
        .scheduling
        .find(evaluation.id())
        .await
        .expect("lookup should succeed")
        .expect("evaluation should exist");
    assert_eq!(flushed.status(), EvaluationStatus::Missed);
}

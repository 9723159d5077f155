//! Service orchestration tests for the round catalog.

use std::sync::Arc;

use crate::round::{
    adapters::InMemoryRoundRepository,
    domain::{InterviewMode, JobId, RoundId, RoundType, SchedulingTemplate},
    ports::RoundRepositoryError,
    services::{CreateRoundRequest, RoundCatalogError, RoundCatalogService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = RoundCatalogService<InMemoryRoundRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    RoundCatalogService::new(Arc::new(InMemoryRoundRepository::new()), Arc::new(DefaultClock))
}

fn request(job_id: JobId, name: &str, order: i32) -> CreateRoundRequest {
    let mode = InterviewMode::online("meet").expect("valid mode");
    let template = SchedulingTemplate::new(60, mode).expect("valid template");
    CreateRoundRequest::new(job_id, name, order, RoundType::Interview, template)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_round_persists_and_is_retrievable(service: TestService) {
    let job_id = JobId::new();
    let created = service
        .create_round(request(job_id, "Screen", 1))
        .await
        .expect("round creation should succeed");

    let fetched = service
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(created));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_for_job_returns_catalog_order_regardless_of_insertion(service: TestService) {
    let job_id = JobId::new();
    let third = service
        .create_round(request(job_id, "HR", 3))
        .await
        .expect("creation should succeed");
    let first = service
        .create_round(request(job_id, "Screen", 1))
        .await
        .expect("creation should succeed");
    let second = service
        .create_round(request(job_id, "Technical", 2))
        .await
        .expect("creation should succeed");

    let listed = service
        .list_for_job(job_id)
        .await
        .expect("listing should succeed");
    let ids: Vec<_> = listed.iter().map(|round| round.id()).collect();
    assert_eq!(ids, vec![first.id(), second.id(), third.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_round_keeps_it_listed_but_not_default(service: TestService) {
    let job_id = JobId::new();
    let screen = service
        .create_round(request(job_id, "Screen", 1))
        .await
        .expect("creation should succeed");
    let technical = service
        .create_round(request(job_id, "Technical", 2))
        .await
        .expect("creation should succeed");

    let archived = service
        .archive_round(screen.id())
        .await
        .expect("archival should succeed");
    assert!(archived.is_archived());

    let listed = service
        .list_for_job(job_id)
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 2);

    let default = service
        .default_round_for_job(job_id)
        .await
        .expect("default lookup should succeed");
    assert_eq!(default.map(|round| round.id()), Some(technical.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_round_rejects_unknown_id(service: TestService) {
    let missing = RoundId::new();
    let result = service.archive_round(missing).await;
    assert!(matches!(
        result,
        Err(RoundCatalogError::Repository(
            RoundRepositoryError::NotFound(id)
        )) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_round_is_none_for_job_without_active_rounds(service: TestService) {
    let job_id = JobId::new();
    let only = service
        .create_round(request(job_id, "Screen", 1))
        .await
        .expect("creation should succeed");
    service
        .archive_round(only.id())
        .await
        .expect("archival should succeed");

    let default = service
        .default_round_for_job(job_id)
        .await
        .expect("default lookup should succeed");
    assert!(default.is_none());
}

//! Domain-focused tests for rounds and scheduling templates.

use crate::round::domain::{
    InterviewMode, JobId, Round, RoundDomainError, RoundType, SchedulingTemplate,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::cmp::Ordering;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn online_template(duration_minutes: u32) -> SchedulingTemplate {
    let mode = InterviewMode::online("meet").expect("valid mode");
    SchedulingTemplate::new(duration_minutes, mode).expect("valid template")
}

#[rstest]
#[case(RoundType::Mcq, "mcq")]
#[case(RoundType::Interview, "interview")]
#[case(RoundType::Technical, "technical")]
#[case(RoundType::Hr, "hr")]
#[case(RoundType::Coding, "coding")]
fn round_type_round_trips_through_storage_form(#[case] round_type: RoundType, #[case] text: &str) {
    assert_eq!(round_type.as_str(), text);
    assert_eq!(RoundType::try_from(text), Ok(round_type));
}

#[rstest]
fn round_type_rejects_unknown_value() {
    let result = RoundType::try_from("panel");
    assert!(result.is_err());
}

#[rstest]
fn online_mode_rejects_blank_platform() {
    let result = InterviewMode::online("   ");
    assert_eq!(result, Err(RoundDomainError::EmptyModeDetail));
}

#[rstest]
fn onsite_mode_trims_location() {
    let mode = InterviewMode::onsite("  Building 4  ").expect("valid mode");
    assert_eq!(
        mode,
        InterviewMode::Onsite {
            location: "Building 4".to_owned()
        }
    );
}

#[rstest]
fn template_rejects_zero_duration() {
    let mode = InterviewMode::online("meet").expect("valid mode");
    let result = SchedulingTemplate::new(0, mode);
    assert_eq!(result, Err(RoundDomainError::ZeroDuration));
}

#[rstest]
fn new_round_starts_active_with_trimmed_name(clock: DefaultClock) {
    let round = Round::new(
        JobId::new(),
        "  Technical Screen ",
        1,
        RoundType::Technical,
        online_template(60),
        &clock,
    )
    .expect("valid round");

    assert_eq!(round.name(), "Technical Screen");
    assert!(!round.is_archived());
    assert_eq!(round.created_at(), round.updated_at());
}

#[rstest]
fn new_round_rejects_blank_name(clock: DefaultClock) {
    let result = Round::new(
        JobId::new(),
        "   ",
        1,
        RoundType::Hr,
        online_template(30),
        &clock,
    );
    assert!(matches!(result, Err(RoundDomainError::EmptyRoundName)));
}

#[rstest]
fn archive_is_idempotent(clock: DefaultClock) {
    let mut round = Round::new(
        JobId::new(),
        "Coding",
        2,
        RoundType::Coding,
        online_template(90),
        &clock,
    )
    .expect("valid round");

    round.archive(&clock);
    assert!(round.is_archived());
    let archived_at = round.updated_at();

    round.archive(&clock);
    assert_eq!(round.updated_at(), archived_at);
}

#[rstest]
fn catalog_cmp_orders_by_sort_order_first(clock: DefaultClock) {
    let job_id = JobId::new();
    let second = Round::new(
        job_id,
        "Technical",
        2,
        RoundType::Technical,
        online_template(60),
        &clock,
    )
    .expect("valid round");
    let first = Round::new(
        job_id,
        "Screen",
        1,
        RoundType::Interview,
        online_template(30),
        &clock,
    )
    .expect("valid round");

    assert_eq!(Round::catalog_cmp(&first, &second), Ordering::Less);
    assert_eq!(Round::catalog_cmp(&second, &first), Ordering::Greater);
}

#[rstest]
fn catalog_cmp_breaks_order_ties_deterministically(clock: DefaultClock) {
    let job_id = JobId::new();
    let a = Round::new(
        job_id,
        "Panel A",
        3,
        RoundType::Interview,
        online_template(45),
        &clock,
    )
    .expect("valid round");
    let b = Round::new(
        job_id,
        "Panel B",
        3,
        RoundType::Interview,
        online_template(45),
        &clock,
    )
    .expect("valid round");

    let forward = Round::catalog_cmp(&a, &b);
    let reverse = Round::catalog_cmp(&b, &a);
    assert_ne!(forward, Ordering::Equal);
    assert_eq!(forward, reverse.reverse());
}

use chrono::NaiveDate;
use ringside_backend::auth::JwtKeys;
use ringside_backend::error::{AppError, DomainError};
use ringside_backend::models::*;
use ringside_backend::services::clearance_gate::{any_valid, fight_date_for_slot};
use ringside_backend::services::fight_service::{request_conflict, respond_guard};
use ringside_backend::services::offer_service::pair_ready;
use ringside_backend::services::record_service::{merge_verified, tally_results, Tally};
use rust_decimal::Decimal;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clearance(fighter_id: Uuid, status: &str, expiration: Option<NaiveDate>) -> MedicalClearance {
    MedicalClearance {
        id: Uuid::new_v4(),
        fighter_id,
        status: status.to_string(),
        expiration_date: expiration,
        created_at: chrono::Utc::now().naive_utc(),
    }
}

fn fight_result(winner_id: Option<Uuid>, result_type: &str) -> FightResult {
    let now = chrono::Utc::now().naive_utc();
    FightResult {
        id: Uuid::new_v4(),
        fight_id: Uuid::new_v4(),
        winner_id,
        result_type: result_type.to_string(),
        recorded_by: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

/// Unit tests for the fight state machine
#[test]
fn test_fight_can_only_reach_scheduled_through_accepted() {
    assert!(!FightStatus::Requested.can_transition_to(FightStatus::Scheduled));
    assert!(FightStatus::Requested.can_transition_to(FightStatus::Accepted));
    assert!(FightStatus::Accepted.can_transition_to(FightStatus::Scheduled));
}

#[test]
fn test_rejection_is_the_only_other_exit_from_requested() {
    assert!(FightStatus::Requested.can_transition_to(FightStatus::Deleted));
    assert!(!FightStatus::Accepted.can_transition_to(FightStatus::Deleted));
    assert!(!FightStatus::Scheduled.can_transition_to(FightStatus::Deleted));
}

fn fight_between(a: Uuid, b: Uuid, status: &str) -> Fight {
    Fight {
        id: Uuid::new_v4(),
        fighter_a_id: a,
        fighter_b_id: b,
        status: status.to_string(),
        created_at: chrono::Utc::now().naive_utc(),
    }
}

#[test]
fn test_fight_involvement() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let fight = fight_between(a, b, "requested");
    assert!(fight.involves(a));
    assert!(fight.involves(b));
    assert!(!fight.involves(Uuid::new_v4()));
    assert!(fight.is_between(b, a));
}

#[test]
fn test_duplicate_request_is_blocked_in_both_directions() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let existing = vec![fight_between(a, b, "requested")];
    // B requesting A collides with the open A -> B fight.
    assert!(request_conflict(&existing, b, a));
    // A rejected (deleted) fight frees the pair up again.
    let deleted = vec![fight_between(a, b, "deleted")];
    assert!(!request_conflict(&deleted, b, a));
}

#[test]
fn test_response_guards_status_and_addressee() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let fight = fight_between(a, b, "requested");
    assert!(respond_guard(&fight, b).is_ok());
    assert_eq!(respond_guard(&fight, a), Err(DomainError::NotReceiver));

    let accepted = fight_between(a, b, "accepted");
    assert_eq!(
        respond_guard(&accepted, b),
        Err(DomainError::InvalidStatus {
            current: "accepted".to_string()
        })
    );
}

/// Unit tests for the publication gate field rules
#[test]
fn test_publish_field_validation_reports_every_gap() {
    let event = Event {
        id: Uuid::new_v4(),
        plo_id: Uuid::new_v4(),
        name: "Title Night".to_string(),
        status: "draft".to_string(),
        venue_name: Some("Arena".to_string()),
        venue_address: None,
        city: Some("  ".to_string()),
        country: Some("UK".to_string()),
        venue_capacity: Some(0),
        poster_image: Some("https://cdn.example.com/p.png".to_string()),
        ticket_link: None,
        created_at: chrono::Utc::now().naive_utc(),
    };
    assert_eq!(
        event.missing_publication_fields(),
        vec!["venue_address", "city", "venue_capacity", "ticket_link"]
    );
}

/// Unit tests for the clearance gate
#[test]
fn test_clearance_gate_scenario() {
    let fighter = Uuid::new_v4();
    let fight_date = date(2026, 9, 12);

    // No clearance at all: gate fails.
    assert!(!any_valid(&[], fight_date));

    // Approved with no expiration: gate passes.
    let open_ended = vec![clearance(fighter, "approved", None)];
    assert!(any_valid(&open_ended, fight_date));

    // Approved but expired before the fight date: gate fails.
    let expired = vec![clearance(fighter, "approved", Some(date(2026, 9, 11)))];
    assert!(!any_valid(&expired, fight_date));
}

#[test]
fn test_fight_date_comes_from_slot_start() {
    let slot = EventSlot {
        id: Uuid::new_v4(),
        event_id: Uuid::new_v4(),
        start_time: date(2026, 9, 12).and_hms_opt(19, 0, 0),
        fight_id: None,
    };
    assert_eq!(fight_date_for_slot(&slot), date(2026, 9, 12));
}

fn tuple_offer(fighter_id: Uuid, status: &str) -> Offer {
    Offer {
        id: Uuid::new_v4(),
        fight_id: Uuid::new_v4(),
        event_id: Uuid::new_v4(),
        event_slot_id: Uuid::new_v4(),
        fighter_id,
        plo_id: Uuid::new_v4(),
        amount: Decimal::new(25_000, 2),
        currency: "USD".to_string(),
        status: status.to_string(),
        created_at: chrono::Utc::now().naive_utc(),
    }
}

/// Unit tests for the offer closing condition
#[test]
fn test_slot_binds_only_on_a_complete_accepted_pair() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    assert!(pair_ready(&[
        tuple_offer(a, "accepted"),
        tuple_offer(b, "accepted")
    ]));
    assert!(!pair_ready(&[
        tuple_offer(a, "accepted"),
        tuple_offer(b, "pending")
    ]));
}

#[test]
fn test_resent_pair_can_close_after_an_earlier_rejection() {
    // First pair: one half rejected. The promoter re-sends, superseding
    // the leftovers; only non-rejected offers reach the closing check.
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let history = vec![
        tuple_offer(a, "rejected"),
        tuple_offer(b, "rejected"),
        tuple_offer(a, "accepted"),
        tuple_offer(b, "accepted"),
    ];
    let live: Vec<Offer> = history.into_iter().filter(|o| !matches!(o.status_enum(), OfferStatus::Rejected)).collect();
    assert!(pair_ready(&live));
}

#[test]
fn test_leftover_acceptance_from_a_superseded_pair_is_not_enough() {
    let a = Uuid::new_v4();
    assert!(!pair_ready(&[tuple_offer(a, "accepted")]));
}

/// Unit tests for the record aggregator math
#[test]
fn test_record_aggregation_merges_in_app_and_verified() {
    let me = Uuid::new_v4();
    let rival = Uuid::new_v4();
    let results = vec![
        fight_result(Some(me), "ko"),
        fight_result(Some(rival), "decision"),
        fight_result(None, "draw"),
        fight_result(Some(me), "no_contest"), // winner ignored for no-contests
    ];
    let verifications = vec![FighterVerification {
        id: Uuid::new_v4(),
        fighter_id: me,
        status: "accepted".to_string(),
        wins: 7,
        losses: 3,
        draws: 2,
        created_at: chrono::Utc::now().naive_utc(),
    }];

    let tally = merge_verified(tally_results(me, &results), &verifications);
    assert_eq!(
        tally,
        Tally {
            wins: 8,
            losses: 4,
            draws: 4
        }
    );
    assert_eq!(tally.total(), 16);
}

#[test]
fn test_record_aggregation_is_idempotent() {
    let me = Uuid::new_v4();
    let results = vec![fight_result(Some(me), "submission")];
    let first = tally_results(me, &results);
    let second = tally_results(me, &results);
    assert_eq!(first, second);
}

/// Unit tests for status enums
#[test]
fn test_status_enum_round_trips() {
    assert_eq!(FightStatus::from_str("scheduled").unwrap().as_str(), "scheduled");
    assert_eq!(EventStatus::from_str("completed").unwrap().as_str(), "completed");
    assert_eq!(OfferStatus::from_str("rejected").unwrap().as_str(), "rejected");
    assert_eq!(ResultType::from_str("no_contest").unwrap().as_str(), "no_contest");
}

#[test]
fn test_unknown_status_strings_are_rejected() {
    assert!(FightStatus::from_str("postponed").is_err());
    assert!(EventStatus::from_str("archived").is_err());
    assert!(OfferStatus::from_str("countered").is_err());
    assert!(ResultType::from_str("walkover").is_err());
}

/// Unit tests for error mapping
#[test]
fn test_domain_error_codes_and_statuses() {
    use axum::http::StatusCode;

    let cases: Vec<(DomainError, &str, StatusCode)> = vec![
        (DomainError::RequestExists, "request_exists", StatusCode::CONFLICT),
        (DomainError::NotReceiver, "not_receiver", StatusCode::FORBIDDEN),
        (DomainError::FightNotFound, "fight_not_found", StatusCode::NOT_FOUND),
        (
            DomainError::FighterNotFound,
            "fighter_not_found",
            StatusCode::NOT_FOUND,
        ),
        (DomainError::NoSlots, "no_slots", StatusCode::BAD_REQUEST),
        (
            DomainError::SlotAlreadyAssigned,
            "slot_already_assigned",
            StatusCode::CONFLICT,
        ),
        (
            DomainError::MedicalClearanceMissingOrExpired,
            "medical_clearance_missing_or_expired",
            StatusCode::BAD_REQUEST,
        ),
        (
            DomainError::OfferAlreadyResponded,
            "offer_already_responded",
            StatusCode::CONFLICT,
        ),
    ];

    for (err, code, status) in cases {
        assert_eq!(err.code(), code);
        assert_eq!(err.status(), status);
        let app_err: AppError = err.into();
        assert_eq!(app_err.status_code(), status);
    }
}

/// Unit tests for bearer-token identity
#[test]
fn test_jwt_round_trip_and_rejection() {
    let keys = JwtKeys::new("unit-test-secret");
    let user_id = Uuid::new_v4();

    let token = keys.issue(user_id, 2).unwrap();
    assert_eq!(keys.verify(&token).unwrap().sub, user_id);

    let wrong = JwtKeys::new("different-secret");
    assert!(wrong.verify(&token).is_err());
}

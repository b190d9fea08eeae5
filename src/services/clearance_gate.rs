use crate::error::AppResult;
use crate::models::{EventSlot, MedicalClearance};
use crate::repositories::ClearanceRepository;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

/// Gate deciding whether a fighter may be scheduled on a given date.
///
/// Evaluated fresh at every offer acceptance; clearances can be revoked
/// or expire between the two halves of a negotiation, so the result is
/// never cached.
pub struct ClearanceGate {
    clearance_repo: Arc<ClearanceRepository>,
}

impl ClearanceGate {
    pub fn new(clearance_repo: Arc<ClearanceRepository>) -> Self {
        Self { clearance_repo }
    }

    /// True iff the fighter holds at least one clearance valid on `fight_date`
    pub async fn is_cleared(&self, fighter_id: Uuid, fight_date: NaiveDate) -> AppResult<bool> {
        let clearances = self.clearance_repo.find_by_fighter(fighter_id).await?;
        Ok(any_valid(&clearances, fight_date))
    }
}

/// Pure evaluation over a fighter's loaded clearances
pub fn any_valid(clearances: &[MedicalClearance], fight_date: NaiveDate) -> bool {
    clearances.iter().any(|c| c.is_valid_for(fight_date))
}

/// The date a slot's fight would take place.
///
/// Slots without a start time fall back to the current date.
pub fn fight_date_for_slot(slot: &EventSlot) -> NaiveDate {
    slot.start_time
        .map(|t| t.date())
        .unwrap_or_else(|| chrono::Utc::now().naive_utc().date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn clearance(status: &str, expiration: Option<NaiveDate>) -> MedicalClearance {
        MedicalClearance {
            id: Uuid::new_v4(),
            fighter_id: Uuid::new_v4(),
            status: status.to_string(),
            expiration_date: expiration,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_clearances_fails_the_gate() {
        assert!(!any_valid(&[], date(2026, 6, 1)));
    }

    #[test]
    fn test_one_valid_among_expired_passes() {
        let clearances = vec![
            clearance("approved", Some(date(2025, 1, 1))), // expired
            clearance("rejected", None),
            clearance("approved", None), // open-ended
        ];
        assert!(any_valid(&clearances, date(2026, 6, 1)));
    }

    #[test]
    fn test_only_expired_or_unapproved_fails() {
        let clearances = vec![
            clearance("approved", Some(date(2026, 5, 31))),
            clearance("pending", None),
        ];
        assert!(!any_valid(&clearances, date(2026, 6, 1)));
    }

    #[test]
    fn test_fight_date_uses_slot_start_time() {
        let slot = EventSlot {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            start_time: Some(
                date(2026, 9, 12)
                    .and_hms_opt(20, 30, 0)
                    .unwrap(),
            ),
            fight_id: None,
        };
        assert_eq!(fight_date_for_slot(&slot), date(2026, 9, 12));
    }

    #[test]
    fn test_fight_date_falls_back_to_today() {
        let slot = EventSlot {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            start_time: None,
            fight_id: None,
        };
        assert_eq!(fight_date_for_slot(&slot), chrono::Utc::now().naive_utc().date());
    }
}

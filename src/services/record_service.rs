use crate::error::{AppError, AppResult, DomainError};
use crate::models::{FightResult, FightStatus, FighterRecord, FighterVerification, ResultType};
use crate::repositories::{EventRepository, FightRepository, RecordRepository, UserRepository};
use crate::services::EventService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Win/loss/draw totals before they are written back to the record row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
}

impl Tally {
    pub fn total(&self) -> i32 {
        self.wins + self.losses + self.draws
    }
}

/// Count a fighter's in-app results.
///
/// A fight counts as a draw when the result type is a draw or no-contest
/// or the winner is unset; otherwise it is a win or loss by `winner_id`.
pub fn tally_results(fighter_id: Uuid, results: &[FightResult]) -> Tally {
    let mut tally = Tally::default();
    for result in results {
        let drawish = result
            .result_type_enum()
            .map_or(false, |t| t.is_drawish());
        match result.winner_id {
            _ if drawish => tally.draws += 1,
            None => tally.draws += 1,
            Some(winner) if winner == fighter_id => tally.wins += 1,
            Some(_) => tally.losses += 1,
        }
    }
    tally
}

/// Fold accepted external verification totals into an in-app tally
pub fn merge_verified(mut tally: Tally, verifications: &[FighterVerification]) -> Tally {
    for v in verifications {
        tally.wins += v.wins;
        tally.losses += v.losses;
        tally.draws += v.draws;
    }
    tally
}

/// Service recomputing the derived fighter record cache.
///
/// The record is a materialized view rebuilt wholesale on every result
/// write, never patched incrementally.
pub struct RecordService {
    pool: PgPool,
    record_repo: Arc<RecordRepository>,
    fight_repo: Arc<FightRepository>,
    event_repo: Arc<EventRepository>,
    user_repo: Arc<UserRepository>,
    event_service: Arc<EventService>,
}

impl RecordService {
    pub fn new(
        pool: PgPool,
        record_repo: Arc<RecordRepository>,
        fight_repo: Arc<FightRepository>,
        event_repo: Arc<EventRepository>,
        user_repo: Arc<UserRepository>,
        event_service: Arc<EventService>,
    ) -> Self {
        Self {
            pool,
            record_repo,
            fight_repo,
            event_repo,
            user_repo,
            event_service,
        }
    }

    /// Record or amend the result of a scheduled fight.
    ///
    /// Allowed for admins and for the promoter owning the event the fight
    /// is scheduled into. Triggers a full record recompute for both
    /// fighters and reconciles the event's completion status.
    pub async fn record_result(
        &self,
        caller_id: Uuid,
        fight_id: Uuid,
        winner_id: Option<Uuid>,
        result_type: ResultType,
    ) -> AppResult<FightResult> {
        let fight = self
            .fight_repo
            .find_by_id(fight_id)
            .await?
            .ok_or(DomainError::FightNotFound)?;
        if fight.status_enum() != FightStatus::Scheduled {
            return Err(DomainError::InvalidStatus {
                current: fight.status.clone(),
            }
            .into());
        }

        let winner_id = if result_type.is_drawish() {
            None
        } else {
            let winner = winner_id.ok_or_else(|| {
                AppError::Validation("winner_id is required for decisive results".to_string())
            })?;
            if !fight.involves(winner) {
                return Err(AppError::Validation(
                    "winner_id must be one of the fight's fighters".to_string(),
                ));
            }
            Some(winner)
        };

        let slot = self.event_repo.find_slot_by_fight(fight_id).await?;
        self.authorize_recorder(caller_id, slot.as_ref().map(|s| s.event_id))
            .await?;

        let result = self
            .record_repo
            .upsert_result(fight_id, winner_id, result_type, caller_id)
            .await?;
        info!(
            "Recorded result for fight {}: {} (winner: {:?})",
            fight_id,
            result_type.as_str(),
            winner_id
        );

        self.recompute_fighter(fight.fighter_a_id).await?;
        self.recompute_fighter(fight.fighter_b_id).await?;

        if let Some(slot) = slot {
            self.event_service
                .reconcile_completion(slot.event_id, caller_id)
                .await?;
        }

        Ok(result)
    }

    /// Fully recompute one fighter's record and overwrite the cache row.
    ///
    /// The record row is locked for the duration so recomputes for the
    /// same fighter are serialized.
    pub async fn recompute_fighter(&self, fighter_id: Uuid) -> AppResult<FighterRecord> {
        let results = self.record_repo.results_for_fighter(fighter_id).await?;
        let verifications = self.record_repo.accepted_verifications(fighter_id).await?;

        let tally = merge_verified(tally_results(fighter_id, &results), &verifications);

        let mut tx = self.pool.begin().await.map_err(AppError::Sqlx)?;
        self.record_repo.lock_record_tx(&mut tx, fighter_id).await?;
        let record = self
            .record_repo
            .upsert_record_tx(&mut tx, fighter_id, tally.wins, tally.losses, tally.draws)
            .await?;
        tx.commit().await.map_err(AppError::Sqlx)?;

        info!(
            "Record for fighter {}: {}-{}-{} ({} fights)",
            fighter_id, record.wins, record.losses, record.draws, record.total_fights
        );
        Ok(record)
    }

    /// Read a fighter's record, computing it on first access.
    ///
    /// The account must exist and be a fighter; the first-access
    /// recompute inserts a record row, so an unknown id has to be caught
    /// here rather than surfacing as a referential failure.
    pub async fn get_record(&self, fighter_id: Uuid) -> AppResult<FighterRecord> {
        let user = self
            .user_repo
            .find_by_id(fighter_id)
            .await?
            .ok_or(DomainError::FighterNotFound)?;
        if !user.is_fighter() {
            return Err(DomainError::FighterNotFound.into());
        }

        if let Some(record) = self.record_repo.find_record(fighter_id).await? {
            return Ok(record);
        }
        self.recompute_fighter(fighter_id).await
    }

    async fn authorize_recorder(&self, caller_id: Uuid, event_id: Option<Uuid>) -> AppResult<()> {
        let caller = self
            .user_repo
            .find_by_id(caller_id)
            .await?
            .ok_or(DomainError::Forbidden)?;
        if caller.is_admin() {
            return Ok(());
        }
        if let Some(event_id) = event_id {
            if let Some(event) = self.event_repo.find_by_id(event_id).await? {
                if event.plo_id == caller_id && caller.is_verified_plo() {
                    return Ok(());
                }
            }
        }
        Err(DomainError::Forbidden.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(fight_id: Uuid, winner_id: Option<Uuid>, result_type: &str) -> FightResult {
        let now = chrono::Utc::now().naive_utc();
        FightResult {
            id: Uuid::new_v4(),
            fight_id,
            winner_id,
            result_type: result_type.to_string(),
            recorded_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn verification(fighter_id: Uuid, wins: i32, losses: i32, draws: i32) -> FighterVerification {
        FighterVerification {
            id: Uuid::new_v4(),
            fighter_id,
            status: "accepted".to_string(),
            wins,
            losses,
            draws,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_tally_counts_wins_losses_and_draws() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let results = vec![
            result(Uuid::new_v4(), Some(me), "ko"),
            result(Uuid::new_v4(), Some(other), "decision"),
            result(Uuid::new_v4(), None, "draw"),
            result(Uuid::new_v4(), Some(me), "submission"),
        ];
        let tally = tally_results(me, &results);
        assert_eq!(
            tally,
            Tally {
                wins: 2,
                losses: 1,
                draws: 1
            }
        );
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_no_contest_counts_as_draw_even_with_winner_set() {
        let me = Uuid::new_v4();
        let results = vec![result(Uuid::new_v4(), Some(me), "no_contest")];
        assert_eq!(tally_results(me, &results).draws, 1);
    }

    #[test]
    fn test_null_winner_counts_as_draw() {
        let me = Uuid::new_v4();
        let results = vec![result(Uuid::new_v4(), None, "decision")];
        assert_eq!(tally_results(me, &results).draws, 1);
    }

    #[test]
    fn test_verified_totals_are_added() {
        let me = Uuid::new_v4();
        let results = vec![result(Uuid::new_v4(), Some(me), "ko")];
        let verifications = vec![verification(me, 10, 2, 1), verification(me, 3, 0, 0)];
        let tally = merge_verified(tally_results(me, &results), &verifications);
        assert_eq!(
            tally,
            Tally {
                wins: 14,
                losses: 2,
                draws: 1
            }
        );
        assert_eq!(tally.total(), 17);
    }

    #[test]
    fn test_recompute_is_idempotent_over_same_inputs() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let results = vec![
            result(Uuid::new_v4(), Some(other), "tko"),
            result(Uuid::new_v4(), Some(me), "decision"),
        ];
        let verifications = vec![verification(me, 5, 5, 0)];
        let first = merge_verified(tally_results(me, &results), &verifications);
        let second = merge_verified(tally_results(me, &results), &verifications);
        assert_eq!(first, second);
    }
}

use crate::models::{FightResult, FighterRecord, FighterVerification, ResultType};
use sqlx::{PgPool, Postgres, Result as SqlxResult, Transaction};
use uuid::Uuid;

/// Repository for fight results, external verifications and the derived
/// fighter record cache
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    /// Create a new RecordRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or amend the result of a fight (one result row per fight)
    pub async fn upsert_result(
        &self,
        fight_id: Uuid,
        winner_id: Option<Uuid>,
        result_type: ResultType,
        recorded_by: Uuid,
    ) -> SqlxResult<FightResult> {
        sqlx::query_as::<_, FightResult>(
            r#"
            INSERT INTO fight_results (fight_id, winner_id, result_type, recorded_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (fight_id) DO UPDATE
            SET winner_id = EXCLUDED.winner_id,
                result_type = EXCLUDED.result_type,
                recorded_by = EXCLUDED.recorded_by,
                updated_at = NOW()
            RETURNING id, fight_id, winner_id, result_type, recorded_by, created_at, updated_at
            "#,
        )
        .bind(fight_id)
        .bind(winner_id)
        .bind(result_type.as_str())
        .bind(recorded_by)
        .fetch_one(&self.pool)
        .await
    }

    /// Find the recorded result for a fight, if any
    pub async fn find_result_by_fight(&self, fight_id: Uuid) -> SqlxResult<Option<FightResult>> {
        sqlx::query_as::<_, FightResult>(
            r#"
            SELECT id, fight_id, winner_id, result_type, recorded_by, created_at, updated_at
            FROM fight_results
            WHERE fight_id = $1
            "#,
        )
        .bind(fight_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All recorded results of fights the fighter participated in
    pub async fn results_for_fighter(&self, fighter_id: Uuid) -> SqlxResult<Vec<FightResult>> {
        sqlx::query_as::<_, FightResult>(
            r#"
            SELECT r.id, r.fight_id, r.winner_id, r.result_type,
                   r.recorded_by, r.created_at, r.updated_at
            FROM fight_results r
            JOIN fights f ON f.id = r.fight_id
            WHERE f.fighter_a_id = $1 OR f.fighter_b_id = $1
            "#,
        )
        .bind(fighter_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Accepted external verification records for a fighter
    pub async fn accepted_verifications(
        &self,
        fighter_id: Uuid,
    ) -> SqlxResult<Vec<FighterVerification>> {
        sqlx::query_as::<_, FighterVerification>(
            r#"
            SELECT id, fighter_id, status, wins, losses, draws, created_at
            FROM fighter_verifications
            WHERE fighter_id = $1 AND status = 'accepted'
            "#,
        )
        .bind(fighter_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Find the derived record row for a fighter
    pub async fn find_record(&self, fighter_id: Uuid) -> SqlxResult<Option<FighterRecord>> {
        sqlx::query_as::<_, FighterRecord>(
            r#"
            SELECT fighter_id, wins, losses, draws, total_fights, updated_at
            FROM fighter_records
            WHERE fighter_id = $1
            "#,
        )
        .bind(fighter_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lock a fighter's record row for the remainder of an open transaction.
    ///
    /// Serializes recomputation per fighter; returns None when no row
    /// exists yet (first recompute).
    pub async fn lock_record_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        fighter_id: Uuid,
    ) -> SqlxResult<Option<FighterRecord>> {
        sqlx::query_as::<_, FighterRecord>(
            r#"
            SELECT fighter_id, wins, losses, draws, total_fights, updated_at
            FROM fighter_records
            WHERE fighter_id = $1
            FOR UPDATE
            "#,
        )
        .bind(fighter_id)
        .fetch_optional(tx)
        .await
    }

    /// Overwrite (or create) the record row wholesale
    pub async fn upsert_record_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        fighter_id: Uuid,
        wins: i32,
        losses: i32,
        draws: i32,
    ) -> SqlxResult<FighterRecord> {
        sqlx::query_as::<_, FighterRecord>(
            r#"
            INSERT INTO fighter_records (fighter_id, wins, losses, draws, total_fights)
            VALUES ($1, $2, $3, $4, $2 + $3 + $4)
            ON CONFLICT (fighter_id) DO UPDATE
            SET wins = EXCLUDED.wins,
                losses = EXCLUDED.losses,
                draws = EXCLUDED.draws,
                total_fights = EXCLUDED.total_fights,
                updated_at = NOW()
            RETURNING fighter_id, wins, losses, draws, total_fights, updated_at
            "#,
        )
        .bind(fighter_id)
        .bind(wins)
        .bind(losses)
        .bind(draws)
        .fetch_one(tx)
        .await
    }
}

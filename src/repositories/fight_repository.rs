use crate::models::{Fight, FightStatus, FightStatusHistory};
use sqlx::{PgPool, Postgres, Result as SqlxResult, Transaction};
use uuid::Uuid;

/// Repository for fight data access
pub struct FightRepository {
    pool: PgPool,
}

impl FightRepository {
    /// Create a new FightRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new fight in `requested` status
    pub async fn create(&self, fighter_a_id: Uuid, fighter_b_id: Uuid) -> SqlxResult<Fight> {
        sqlx::query_as::<_, Fight>(
            r#"
            INSERT INTO fights (fighter_a_id, fighter_b_id, status)
            VALUES ($1, $2, 'requested')
            RETURNING id, fighter_a_id, fighter_b_id, status, created_at
            "#,
        )
        .bind(fighter_a_id)
        .bind(fighter_b_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a fight by UUID
    pub async fn find_by_id(&self, id: Uuid) -> SqlxResult<Option<Fight>> {
        sqlx::query_as::<_, Fight>(
            r#"
            SELECT id, fighter_a_id, fighter_b_id, status, created_at
            FROM fights
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find every fight between two fighters, in either direction.
    ///
    /// The pair is unordered: (A,B) and (B,A) resolve to the same rows.
    /// The caller decides which statuses block a new request.
    pub async fn find_between_pair(
        &self,
        fighter_a: Uuid,
        fighter_b: Uuid,
    ) -> SqlxResult<Vec<Fight>> {
        sqlx::query_as::<_, Fight>(
            r#"
            SELECT id, fighter_a_id, fighter_b_id, status, created_at
            FROM fights
            WHERE (fighter_a_id = $1 AND fighter_b_id = $2)
               OR (fighter_a_id = $2 AND fighter_b_id = $1)
            "#,
        )
        .bind(fighter_a)
        .bind(fighter_b)
        .fetch_all(&self.pool)
        .await
    }

    /// Update fight status
    pub async fn update_status(&self, id: Uuid, status: FightStatus) -> SqlxResult<Fight> {
        sqlx::query_as::<_, Fight>(
            r#"
            UPDATE fights
            SET status = $2
            WHERE id = $1
            RETURNING id, fighter_a_id, fighter_b_id, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// Update fight status inside an open transaction
    pub async fn update_status_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: FightStatus,
    ) -> SqlxResult<Fight> {
        sqlx::query_as::<_, Fight>(
            r#"
            UPDATE fights
            SET status = $2
            WHERE id = $1
            RETURNING id, fighter_a_id, fighter_b_id, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(tx)
        .await
    }

    /// Append a status transition to the fight audit trail
    pub async fn append_history(
        &self,
        fight_id: Uuid,
        status: FightStatus,
        changed_by: Uuid,
        reason: Option<&str>,
    ) -> SqlxResult<FightStatusHistory> {
        sqlx::query_as::<_, FightStatusHistory>(
            r#"
            INSERT INTO fight_status_history (fight_id, status, changed_by, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id, fight_id, status, changed_by, reason, changed_at
            "#,
        )
        .bind(fight_id)
        .bind(status.as_str())
        .bind(changed_by)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
    }

    /// Append a status transition inside an open transaction
    pub async fn append_history_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        fight_id: Uuid,
        status: FightStatus,
        changed_by: Uuid,
        reason: Option<&str>,
    ) -> SqlxResult<FightStatusHistory> {
        sqlx::query_as::<_, FightStatusHistory>(
            r#"
            INSERT INTO fight_status_history (fight_id, status, changed_by, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id, fight_id, status, changed_by, reason, changed_at
            "#,
        )
        .bind(fight_id)
        .bind(status.as_str())
        .bind(changed_by)
        .bind(reason)
        .fetch_one(tx)
        .await
    }
}

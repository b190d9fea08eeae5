use crate::models::{Offer, OfferStatus};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Result as SqlxResult, Transaction};
use uuid::Uuid;

/// Repository for offer data access
pub struct OfferRepository {
    pool: PgPool,
}

impl OfferRepository {
    /// Create a new OfferRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending offer addressed to one fighter
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        fight_id: Uuid,
        event_id: Uuid,
        event_slot_id: Uuid,
        fighter_id: Uuid,
        plo_id: Uuid,
        amount: Decimal,
        currency: &str,
    ) -> SqlxResult<Offer> {
        sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (fight_id, event_id, event_slot_id, fighter_id,
                                plo_id, amount, currency, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
            RETURNING id, fight_id, event_id, event_slot_id, fighter_id,
                      plo_id, amount, currency, status, created_at
            "#,
        )
        .bind(fight_id)
        .bind(event_id)
        .bind(event_slot_id)
        .bind(fighter_id)
        .bind(plo_id)
        .bind(amount)
        .bind(currency)
        .fetch_one(&self.pool)
        .await
    }

    /// Find an offer by UUID
    pub async fn find_by_id(&self, id: Uuid) -> SqlxResult<Option<Offer>> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, fight_id, event_id, event_slot_id, fighter_id,
                   plo_id, amount, currency, status, created_at
            FROM offers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find all offers sharing the (fight, event, slot, plo) tuple
    pub async fn find_for_tuple(
        &self,
        fight_id: Uuid,
        event_id: Uuid,
        event_slot_id: Uuid,
        plo_id: Uuid,
    ) -> SqlxResult<Vec<Offer>> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, fight_id, event_id, event_slot_id, fighter_id,
                   plo_id, amount, currency, status, created_at
            FROM offers
            WHERE fight_id = $1 AND event_id = $2 AND event_slot_id = $3 AND plo_id = $4
            "#,
        )
        .bind(fight_id)
        .bind(event_id)
        .bind(event_slot_id)
        .bind(plo_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Update offer status
    pub async fn update_status(&self, id: Uuid, status: OfferStatus) -> SqlxResult<Offer> {
        sqlx::query_as::<_, Offer>(
            r#"
            UPDATE offers
            SET status = $2
            WHERE id = $1
            RETURNING id, fight_id, event_id, event_slot_id, fighter_id,
                      plo_id, amount, currency, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// Lock the live offer pair for a tuple for the remainder of an open
    /// transaction.
    ///
    /// Rejected offers are stale (a superseded pair, or a fighter's own
    /// rejection) and are excluded, so the closing step only ever sees
    /// the current pair. Used so the both-accepted check and the slot
    /// binding observe a stable pair.
    pub async fn lock_for_tuple_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        fight_id: Uuid,
        event_id: Uuid,
        event_slot_id: Uuid,
        plo_id: Uuid,
    ) -> SqlxResult<Vec<Offer>> {
        sqlx::query_as::<_, Offer>(
            r#"
            SELECT id, fight_id, event_id, event_slot_id, fighter_id,
                   plo_id, amount, currency, status, created_at
            FROM offers
            WHERE fight_id = $1 AND event_id = $2 AND event_slot_id = $3 AND plo_id = $4
              AND status <> 'rejected'
            FOR UPDATE
            "#,
        )
        .bind(fight_id)
        .bind(event_id)
        .bind(event_slot_id)
        .bind(plo_id)
        .fetch_all(tx)
        .await
    }

    /// Mark every live offer for a tuple as rejected.
    ///
    /// Called before a promoter re-sends a pair, so leftovers from an
    /// earlier partially-answered pair cannot count toward a later
    /// closing check. Returns the number of offers superseded.
    pub async fn reject_stale_for_tuple(
        &self,
        fight_id: Uuid,
        event_id: Uuid,
        event_slot_id: Uuid,
        plo_id: Uuid,
    ) -> SqlxResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE offers
            SET status = 'rejected'
            WHERE fight_id = $1 AND event_id = $2 AND event_slot_id = $3 AND plo_id = $4
              AND status <> 'rejected'
            "#,
        )
        .bind(fight_id)
        .bind(event_id)
        .bind(event_slot_id)
        .bind(plo_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Reject every still-pending offer targeting a slot, except those of
    /// the winning fight. Returns the number of offers rejected.
    pub async fn reject_pending_for_slot_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event_slot_id: Uuid,
        winning_fight_id: Uuid,
    ) -> SqlxResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE offers
            SET status = 'rejected'
            WHERE event_slot_id = $1 AND status = 'pending' AND fight_id <> $2
            "#,
        )
        .bind(event_slot_id)
        .bind(winning_fight_id)
        .execute(tx)
        .await?;
        Ok(result.rows_affected())
    }
}

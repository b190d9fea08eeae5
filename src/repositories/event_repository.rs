use crate::models::{Event, EventSlot, EventStatus, EventStatusHistory};
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, Result as SqlxResult, Transaction};
use uuid::Uuid;

/// Fields supplied when creating an event
pub struct NewEvent<'a> {
    pub name: &'a str,
    pub venue_name: Option<&'a str>,
    pub venue_address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub country: Option<&'a str>,
    pub venue_capacity: Option<i32>,
    pub poster_image: Option<&'a str>,
    pub ticket_link: Option<&'a str>,
}

/// Repository for event and event-slot data access
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new EventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new draft event together with its slots, atomically
    pub async fn create_with_slots(
        &self,
        plo_id: Uuid,
        event: NewEvent<'_>,
        slot_times: &[Option<NaiveDateTime>],
    ) -> SqlxResult<(Event, Vec<EventSlot>)> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (plo_id, name, status, venue_name, venue_address,
                                city, country, venue_capacity, poster_image, ticket_link)
            VALUES ($1, $2, 'draft', $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, plo_id, name, status, venue_name, venue_address,
                      city, country, venue_capacity, poster_image, ticket_link, created_at
            "#,
        )
        .bind(plo_id)
        .bind(event.name)
        .bind(event.venue_name)
        .bind(event.venue_address)
        .bind(event.city)
        .bind(event.country)
        .bind(event.venue_capacity)
        .bind(event.poster_image)
        .bind(event.ticket_link)
        .fetch_one(&mut tx)
        .await?;

        let mut slots = Vec::with_capacity(slot_times.len());
        for start_time in slot_times {
            let slot = sqlx::query_as::<_, EventSlot>(
                r#"
                INSERT INTO event_slots (event_id, start_time)
                VALUES ($1, $2)
                RETURNING id, event_id, start_time, fight_id
                "#,
            )
            .bind(created.id)
            .bind(start_time)
            .fetch_one(&mut tx)
            .await?;
            slots.push(slot);
        }

        tx.commit().await?;
        Ok((created, slots))
    }

    /// Find an event by UUID
    pub async fn find_by_id(&self, id: Uuid) -> SqlxResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, plo_id, name, status, venue_name, venue_address,
                   city, country, venue_capacity, poster_image, ticket_link, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find an event scoped to its owning promoter
    pub async fn find_by_id_and_owner(&self, id: Uuid, plo_id: Uuid) -> SqlxResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, plo_id, name, status, venue_name, venue_address,
                   city, country, venue_capacity, poster_image, ticket_link, created_at
            FROM events
            WHERE id = $1 AND plo_id = $2
            "#,
        )
        .bind(id)
        .bind(plo_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Update event status
    pub async fn update_status(&self, id: Uuid, status: EventStatus) -> SqlxResult<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET status = $2
            WHERE id = $1
            RETURNING id, plo_id, name, status, venue_name, venue_address,
                      city, country, venue_capacity, poster_image, ticket_link, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// Append a status transition to the event audit trail
    pub async fn append_history(
        &self,
        event_id: Uuid,
        status: EventStatus,
        changed_by: Uuid,
        reason: Option<&str>,
    ) -> SqlxResult<EventStatusHistory> {
        sqlx::query_as::<_, EventStatusHistory>(
            r#"
            INSERT INTO event_status_history (event_id, status, changed_by, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, status, changed_by, reason, changed_at
            "#,
        )
        .bind(event_id)
        .bind(status.as_str())
        .bind(changed_by)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
    }

    /// Count the slots attached to an event
    pub async fn count_slots(&self, event_id: Uuid) -> SqlxResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM event_slots WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Find a slot by UUID
    pub async fn find_slot(&self, slot_id: Uuid) -> SqlxResult<Option<EventSlot>> {
        sqlx::query_as::<_, EventSlot>(
            r#"
            SELECT id, event_id, start_time, fight_id
            FROM event_slots
            WHERE id = $1
            "#,
        )
        .bind(slot_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find all slots of an event
    pub async fn slots_for_event(&self, event_id: Uuid) -> SqlxResult<Vec<EventSlot>> {
        sqlx::query_as::<_, EventSlot>(
            r#"
            SELECT id, event_id, start_time, fight_id
            FROM event_slots
            WHERE event_id = $1
            ORDER BY start_time ASC NULLS LAST
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Find the slot a fight is scheduled into, if any
    pub async fn find_slot_by_fight(&self, fight_id: Uuid) -> SqlxResult<Option<EventSlot>> {
        sqlx::query_as::<_, EventSlot>(
            r#"
            SELECT id, event_id, start_time, fight_id
            FROM event_slots
            WHERE fight_id = $1
            "#,
        )
        .bind(fight_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lock a slot row for the remainder of an open transaction
    pub async fn lock_slot_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slot_id: Uuid,
    ) -> SqlxResult<Option<EventSlot>> {
        sqlx::query_as::<_, EventSlot>(
            r#"
            SELECT id, event_id, start_time, fight_id
            FROM event_slots
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(slot_id)
        .fetch_optional(tx)
        .await
    }

    /// Bind a fight to a still-unassigned slot inside an open transaction.
    ///
    /// The `fight_id IS NULL` guard makes the binding at-most-once even if
    /// a competing transaction slipped in first.
    pub async fn bind_slot_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slot_id: Uuid,
        fight_id: Uuid,
    ) -> SqlxResult<Option<EventSlot>> {
        sqlx::query_as::<_, EventSlot>(
            r#"
            UPDATE event_slots
            SET fight_id = $2
            WHERE id = $1 AND fight_id IS NULL
            RETURNING id, event_id, start_time, fight_id
            "#,
        )
        .bind(slot_id)
        .bind(fight_id)
        .fetch_optional(tx)
        .await
    }
}

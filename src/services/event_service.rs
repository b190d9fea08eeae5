use crate::error::{AppResult, DomainError};
use crate::models::{Event, EventSlot, EventStatus};
use crate::repositories::{EventRepository, NewEvent, RecordRepository, UserRepository};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Fields accepted when a promoter creates an event
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    pub name: String,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub venue_capacity: Option<i32>,
    pub poster_image: Option<String>,
    pub ticket_link: Option<String>,
    pub slot_times: Vec<Option<NaiveDateTime>>,
}

/// Service for the event draft/publish lifecycle
pub struct EventService {
    event_repo: Arc<EventRepository>,
    user_repo: Arc<UserRepository>,
    record_repo: Arc<RecordRepository>,
}

impl EventService {
    pub fn new(
        event_repo: Arc<EventRepository>,
        user_repo: Arc<UserRepository>,
        record_repo: Arc<RecordRepository>,
    ) -> Self {
        Self {
            event_repo,
            user_repo,
            record_repo,
        }
    }

    /// Create a draft event with its slots.
    ///
    /// Only verified promoters may create events. Venue details may still
    /// be incomplete at this point; completeness is enforced at publish.
    pub async fn create_event(
        &self,
        plo_id: Uuid,
        input: CreateEventInput,
    ) -> AppResult<(Event, Vec<EventSlot>)> {
        self.require_verified_plo(plo_id).await?;

        if input.name.trim().is_empty() {
            return Err(crate::error::AppError::Validation(
                "event name must not be empty".to_string(),
            ));
        }

        let (event, slots) = self
            .event_repo
            .create_with_slots(
                plo_id,
                NewEvent {
                    name: input.name.trim(),
                    venue_name: input.venue_name.as_deref(),
                    venue_address: input.venue_address.as_deref(),
                    city: input.city.as_deref(),
                    country: input.country.as_deref(),
                    venue_capacity: input.venue_capacity,
                    poster_image: input.poster_image.as_deref(),
                    ticket_link: input.ticket_link.as_deref(),
                },
                &input.slot_times,
            )
            .await?;

        self.event_repo
            .append_history(event.id, EventStatus::Draft, plo_id, Some("event created"))
            .await?;

        info!(
            "Created event {} ({}) with {} slots",
            event.name,
            event.id,
            slots.len()
        );
        Ok((event, slots))
    }

    /// Publish a draft event.
    ///
    /// The four checks run in a fixed order and the first failure
    /// short-circuits: ownership, status, required fields, slots.
    pub async fn publish_event(&self, event_id: Uuid, plo_id: Uuid) -> AppResult<Event> {
        self.require_verified_plo(plo_id).await?;

        let event = self
            .event_repo
            .find_by_id_and_owner(event_id, plo_id)
            .await?
            .ok_or(DomainError::EventNotFound)?;

        if event.status_enum() != EventStatus::Draft {
            return Err(DomainError::InvalidStatus {
                current: event.status.clone(),
            }
            .into());
        }

        let missing = event.missing_publication_fields();
        if !missing.is_empty() {
            return Err(DomainError::MissingRequiredFields { missing }.into());
        }

        if self.event_repo.count_slots(event_id).await? == 0 {
            return Err(DomainError::NoSlots.into());
        }

        let updated = self
            .event_repo
            .update_status(event_id, EventStatus::Published)
            .await?;
        self.event_repo
            .append_history(
                event_id,
                EventStatus::Published,
                plo_id,
                Some("event published"),
            )
            .await?;

        info!("Published event {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Reconcile a published event's completion status.
    ///
    /// Called after a result is recorded: when every slot that holds a
    /// fight has a recorded result (and at least one slot is bound), the
    /// event moves to `completed`. Other transitions out of `published`
    /// are deliberately not implemented here.
    pub async fn reconcile_completion(
        &self,
        event_id: Uuid,
        changed_by: Uuid,
    ) -> AppResult<Option<Event>> {
        let event = match self.event_repo.find_by_id(event_id).await? {
            Some(e) if e.status_enum() == EventStatus::Published => e,
            _ => return Ok(None),
        };

        let slots = self.event_repo.slots_for_event(event_id).await?;
        let bound: Vec<Uuid> = slots.iter().filter_map(|s| s.fight_id).collect();
        if bound.is_empty() {
            return Ok(None);
        }

        for fight_id in &bound {
            if self
                .record_repo
                .find_result_by_fight(*fight_id)
                .await?
                .is_none()
            {
                return Ok(None);
            }
        }

        let updated = self
            .event_repo
            .update_status(event_id, EventStatus::Completed)
            .await?;
        self.event_repo
            .append_history(
                event_id,
                EventStatus::Completed,
                changed_by,
                Some("all scheduled fights have recorded results"),
            )
            .await?;

        info!("Event {} marked completed", event.id);
        Ok(Some(updated))
    }

    async fn require_verified_plo(&self, plo_id: Uuid) -> AppResult<()> {
        let user = self.user_repo.find_by_id(plo_id).await?;
        if !user.map_or(false, |u| u.is_verified_plo()) {
            return Err(DomainError::PloNotVerified.into());
        }
        Ok(())
    }
}

use crate::error::{AppError, AppResult, DomainError};
use crate::models::{FightStatus, Offer, OfferStatus};
use crate::repositories::{EventRepository, FightRepository, OfferRepository, UserRepository};
use crate::services::clearance_gate::{fight_date_for_slot, ClearanceGate};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// True when a tuple's live offers form a complete, fully-accepted pair.
///
/// Stale (rejected) offers must already be filtered out; a lone
/// leftover acceptance from a superseded pair is not a pair.
pub fn pair_ready(live_offers: &[Offer]) -> bool {
    live_offers.len() == 2 && live_offers.iter().all(|o| o.is_accepted())
}

/// Fields accepted when a promoter sends an offer pair
#[derive(Debug, Clone)]
pub struct SendOffersInput {
    pub fight_id: Uuid,
    pub event_id: Uuid,
    pub event_slot_id: Uuid,
    pub amount_a: Decimal,
    pub currency_a: String,
    pub amount_b: Decimal,
    pub currency_b: String,
}

/// Service for the two-sided offer protocol binding a fight to a slot.
///
/// Offers are issued in pairs; the slot binding happens only when the
/// second fighter accepts, inside a single transaction with row locks so
/// a slot is bound at most once under concurrent accepts.
pub struct OfferService {
    pool: PgPool,
    offer_repo: Arc<OfferRepository>,
    fight_repo: Arc<FightRepository>,
    event_repo: Arc<EventRepository>,
    user_repo: Arc<UserRepository>,
    clearance_gate: Arc<ClearanceGate>,
}

impl OfferService {
    pub fn new(
        pool: PgPool,
        offer_repo: Arc<OfferRepository>,
        fight_repo: Arc<FightRepository>,
        event_repo: Arc<EventRepository>,
        user_repo: Arc<UserRepository>,
        clearance_gate: Arc<ClearanceGate>,
    ) -> Self {
        Self {
            pool,
            offer_repo,
            fight_repo,
            event_repo,
            user_repo,
            clearance_gate,
        }
    }

    /// Send a paired offer for an accepted fight into an event slot.
    ///
    /// Validation runs in a fixed order: fight, event ownership, slot,
    /// then existing offers for the exact tuple.
    pub async fn send_offers(&self, plo_id: Uuid, input: SendOffersInput) -> AppResult<(Offer, Offer)> {
        info!(
            "Offer pair: plo={} fight={} slot={}",
            plo_id, input.fight_id, input.event_slot_id
        );

        let plo = self.user_repo.find_by_id(plo_id).await?;
        if !plo.map_or(false, |u| u.is_verified_plo()) {
            return Err(DomainError::PloNotVerified.into());
        }

        let fight = self
            .fight_repo
            .find_by_id(input.fight_id)
            .await?
            .ok_or(DomainError::FightNotFound)?;
        if fight.status_enum() != FightStatus::Accepted {
            return Err(DomainError::FightNotAccepted.into());
        }

        let event = self
            .event_repo
            .find_by_id(input.event_id)
            .await?
            .ok_or(DomainError::EventNotFound)?;
        if event.plo_id != plo_id {
            return Err(DomainError::EventNotOwned.into());
        }

        let slot = self
            .event_repo
            .find_slot(input.event_slot_id)
            .await?
            .ok_or(DomainError::SlotNotFound)?;
        if slot.event_id != input.event_id {
            return Err(DomainError::SlotNotInEvent.into());
        }
        if slot.fight_id.is_some() {
            return Err(DomainError::SlotAlreadyAssigned.into());
        }

        let existing = self
            .offer_repo
            .find_for_tuple(input.fight_id, input.event_id, input.event_slot_id, plo_id)
            .await?;
        if existing.iter().any(|o| o.is_pending()) {
            return Err(DomainError::OfferAlreadyExists.into());
        }
        if existing.iter().filter(|o| o.is_accepted()).count() >= 2 {
            return Err(DomainError::OffersAlreadyAccepted.into());
        }

        for (amount, currency) in [
            (input.amount_a, input.currency_a.as_str()),
            (input.amount_b, input.currency_b.as_str()),
        ] {
            if amount <= Decimal::ZERO {
                return Err(AppError::Validation("offer amount must be positive".to_string()));
            }
            if currency.trim().is_empty() {
                return Err(AppError::Validation("offer currency must not be empty".to_string()));
            }
        }

        // Supersede leftovers from an earlier pair (a fighter may have
        // rejected one half) before issuing the new pair.
        let superseded = self
            .offer_repo
            .reject_stale_for_tuple(input.fight_id, input.event_id, input.event_slot_id, plo_id)
            .await?;
        if superseded > 0 {
            info!(
                "Superseded {} stale offers for fight {} slot {}",
                superseded, input.fight_id, input.event_slot_id
            );
        }

        let offer_a = self
            .offer_repo
            .create(
                input.fight_id,
                input.event_id,
                input.event_slot_id,
                fight.fighter_a_id,
                plo_id,
                input.amount_a,
                &input.currency_a,
            )
            .await?;
        let offer_b = self
            .offer_repo
            .create(
                input.fight_id,
                input.event_id,
                input.event_slot_id,
                fight.fighter_b_id,
                plo_id,
                input.amount_b,
                &input.currency_b,
            )
            .await?;

        info!("Created offer pair {} / {}", offer_a.id, offer_b.id);
        Ok((offer_a, offer_b))
    }

    /// A fighter answers their offer; each offer may be answered once.
    ///
    /// Accepting re-evaluates the clearance gate against the slot date;
    /// a failed gate leaves the offer pending so the fighter can retry
    /// after obtaining clearance. When the second acceptance lands, the
    /// closing step binds the fight to the slot.
    pub async fn respond(
        &self,
        fighter_id: Uuid,
        offer_id: Uuid,
        new_status: OfferStatus,
    ) -> AppResult<Offer> {
        if new_status == OfferStatus::Pending {
            return Err(AppError::Validation(
                "offer response must be 'accepted' or 'rejected'".to_string(),
            ));
        }

        let offer = self
            .offer_repo
            .find_by_id(offer_id)
            .await?
            .ok_or(DomainError::OfferNotFound)?;
        if offer.fighter_id != fighter_id {
            return Err(DomainError::Forbidden.into());
        }
        if !offer.is_pending() {
            return Err(DomainError::OfferAlreadyResponded.into());
        }

        if new_status == OfferStatus::Accepted {
            let slot = self
                .event_repo
                .find_slot(offer.event_slot_id)
                .await?
                .ok_or(DomainError::SlotNotFound)?;
            let fight_date = fight_date_for_slot(&slot);
            if !self.clearance_gate.is_cleared(fighter_id, fight_date).await? {
                return Err(DomainError::MedicalClearanceMissingOrExpired.into());
            }
        }

        let updated = self.offer_repo.update_status(offer_id, new_status).await?;
        info!(
            "Offer {} {} by fighter {}",
            offer_id,
            new_status.as_str(),
            fighter_id
        );

        if new_status == OfferStatus::Accepted {
            self.try_close(&updated).await?;
        }

        Ok(updated)
    }

    /// Closing step of the protocol: when both offers of the pair are
    /// accepted, bind the fight to the slot, re-checking both fighters'
    /// clearances, and reject competing pending offers on the slot.
    ///
    /// Runs in one transaction with the slot and offer rows locked, so the
    /// both-accepted check-then-act is atomic across concurrent accepts.
    async fn try_close(&self, offer: &Offer) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Sqlx)?;

        // Lock ordering: slot first, then the offer pair.
        let slot = self
            .event_repo
            .lock_slot_tx(&mut tx, offer.event_slot_id)
            .await?
            .ok_or(DomainError::SlotNotFound)?;

        if slot.fight_id.is_some() {
            // A competing pair already won the slot (or this pair already
            // closed); nothing to do.
            tx.rollback().await.map_err(AppError::Sqlx)?;
            return Ok(());
        }

        let pair = self
            .offer_repo
            .lock_for_tuple_tx(
                &mut tx,
                offer.fight_id,
                offer.event_id,
                offer.event_slot_id,
                offer.plo_id,
            )
            .await?;

        if !pair_ready(&pair) {
            tx.rollback().await.map_err(AppError::Sqlx)?;
            return Ok(());
        }

        // Both halves are in; re-check both fighters because clearance
        // state can change between the two independent acceptances.
        let fight_date = fight_date_for_slot(&slot);
        for half in &pair {
            if !self
                .clearance_gate
                .is_cleared(half.fighter_id, fight_date)
                .await?
            {
                tx.rollback().await.map_err(AppError::Sqlx)?;
                warn!(
                    "Offer pair for fight {} fully accepted but fighter {} failed the clearance re-check; slot {} left unbound",
                    offer.fight_id, half.fighter_id, slot.id
                );
                return Err(DomainError::MedicalClearanceMissingOrExpired.into());
            }
        }

        let bound = self
            .event_repo
            .bind_slot_tx(&mut tx, slot.id, offer.fight_id)
            .await?;
        if bound.is_none() {
            // The IS NULL guard failed despite the row lock; treat as lost race.
            tx.rollback().await.map_err(AppError::Sqlx)?;
            warn!("Slot {} binding lost a race for fight {}", slot.id, offer.fight_id);
            return Ok(());
        }

        self.fight_repo
            .update_status_tx(&mut tx, offer.fight_id, FightStatus::Scheduled)
            .await?;
        self.fight_repo
            .append_history_tx(
                &mut tx,
                offer.fight_id,
                FightStatus::Scheduled,
                offer.fighter_id,
                Some("both fighters accepted offers for event slot"),
            )
            .await?;

        let rejected = self
            .offer_repo
            .reject_pending_for_slot_tx(&mut tx, slot.id, offer.fight_id)
            .await?;

        tx.commit().await.map_err(AppError::Sqlx)?;

        info!(
            "Fight {} scheduled into slot {}; {} competing offers rejected",
            offer.fight_id, slot.id, rejected
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(status: &str) -> Offer {
        Offer {
            id: Uuid::new_v4(),
            fight_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            event_slot_id: Uuid::new_v4(),
            fighter_id: Uuid::new_v4(),
            plo_id: Uuid::new_v4(),
            amount: Decimal::new(50_000, 2),
            currency: "USD".to_string(),
            status: status.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_fully_accepted_pair_is_ready() {
        assert!(pair_ready(&[offer("accepted"), offer("accepted")]));
    }

    #[test]
    fn test_half_answered_pair_is_not_ready() {
        assert!(!pair_ready(&[offer("accepted"), offer("pending")]));
        assert!(!pair_ready(&[offer("pending"), offer("pending")]));
    }

    #[test]
    fn test_resent_pair_closes_once_stale_offers_are_filtered() {
        // A rejected first pair is superseded by a re-sent pair; only the
        // live offers decide readiness.
        let all = vec![
            offer("rejected"),
            offer("rejected"),
            offer("accepted"),
            offer("accepted"),
        ];
        let live: Vec<Offer> = all.into_iter().filter(|o| !matches!(o.status_enum(), OfferStatus::Rejected)).collect();
        assert_eq!(live.len(), 2);
        assert!(pair_ready(&live));
    }

    #[test]
    fn test_lone_leftover_acceptance_is_not_a_pair() {
        // One half of a superseded pair was accepted before the other was
        // rejected; by itself it must never bind the slot.
        assert!(!pair_ready(&[offer("accepted")]));
    }
}

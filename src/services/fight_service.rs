use crate::error::{AppResult, DomainError};
use crate::models::{Fight, FightStatus};
use crate::repositories::{FightRepository, UserRepository};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// True when an existing fight blocks a new request between the pair.
///
/// Any non-deleted fight between the two fighters counts, whichever of
/// them sent the original request.
pub fn request_conflict(existing: &[Fight], fighter_a: Uuid, fighter_b: Uuid) -> bool {
    existing.iter().any(|f| {
        f.is_between(fighter_a, fighter_b) && f.status_enum() != FightStatus::Deleted
    })
}

/// Guards for responding to a fight request: the fight must still be
/// `requested` and only the addressed fighter may answer.
pub fn respond_guard(fight: &Fight, responder: Uuid) -> Result<(), DomainError> {
    if fight.status_enum() != FightStatus::Requested {
        return Err(DomainError::InvalidStatus {
            current: fight.status.clone(),
        });
    }
    if fight.fighter_b_id != responder {
        return Err(DomainError::NotReceiver);
    }
    Ok(())
}

/// Service for the matchmaking request/accept/reject state machine
pub struct FightService {
    fight_repo: Arc<FightRepository>,
    user_repo: Arc<UserRepository>,
}

impl FightService {
    pub fn new(fight_repo: Arc<FightRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            fight_repo,
            user_repo,
        }
    }

    /// A fighter requests a match against another fighter.
    ///
    /// At most one non-deleted fight may exist per unordered fighter pair.
    pub async fn send_request(&self, from_fighter: Uuid, to_fighter: Uuid) -> AppResult<Fight> {
        info!("Fight request: {} -> {}", from_fighter, to_fighter);

        if from_fighter == to_fighter {
            return Err(DomainError::CannotRequestSelf.into());
        }

        let sender = self.user_repo.find_by_id(from_fighter).await?;
        if !sender.map_or(false, |u| u.is_fighter()) {
            return Err(DomainError::SenderNotFighter.into());
        }

        let receiver = self.user_repo.find_by_id(to_fighter).await?;
        if !receiver.map_or(false, |u| u.is_fighter()) {
            return Err(DomainError::ReceiverNotFighter.into());
        }

        let existing = self
            .fight_repo
            .find_between_pair(from_fighter, to_fighter)
            .await?;
        if request_conflict(&existing, from_fighter, to_fighter) {
            return Err(DomainError::RequestExists.into());
        }

        let fight = self.fight_repo.create(from_fighter, to_fighter).await?;
        self.fight_repo
            .append_history(
                fight.id,
                FightStatus::Requested,
                from_fighter,
                Some("fight requested"),
            )
            .await?;

        info!("Created fight {} in requested status", fight.id);
        Ok(fight)
    }

    /// The addressed fighter accepts a requested fight
    pub async fn accept_fight(&self, fight_id: Uuid, fighter_id: Uuid) -> AppResult<Fight> {
        let fight = self
            .fight_repo
            .find_by_id(fight_id)
            .await?
            .ok_or(DomainError::FightNotFound)?;

        respond_guard(&fight, fighter_id)?;

        let updated = self
            .fight_repo
            .update_status(fight_id, FightStatus::Accepted)
            .await?;
        self.fight_repo
            .append_history(fight_id, FightStatus::Accepted, fighter_id, None)
            .await?;

        info!("Fight {} accepted by {}", fight_id, fighter_id);
        Ok(updated)
    }

    /// The addressed fighter rejects a requested fight.
    ///
    /// Rejection is a soft delete: the row stays for auditability.
    pub async fn reject_fight(
        &self,
        fight_id: Uuid,
        fighter_id: Uuid,
        reason: Option<&str>,
    ) -> AppResult<Fight> {
        let fight = self
            .fight_repo
            .find_by_id(fight_id)
            .await?
            .ok_or(DomainError::FightNotFound)?;

        respond_guard(&fight, fighter_id)?;

        let updated = self
            .fight_repo
            .update_status(fight_id, FightStatus::Deleted)
            .await?;
        self.fight_repo
            .append_history(
                fight_id,
                FightStatus::Deleted,
                fighter_id,
                Some(reason.unwrap_or("fight rejected")),
            )
            .await?;

        info!("Fight {} rejected by {}", fight_id, fighter_id);
        Ok(updated)
    }
}

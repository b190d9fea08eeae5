use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Fight status
///
/// `requested -> accepted -> scheduled`, with `requested -> deleted` as
/// the rejection path. `deleted` is a soft terminal state; fight rows are
/// never physically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightStatus {
    Requested,
    Accepted,
    Scheduled,
    Deleted,
}

impl FightStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "requested" => Ok(FightStatus::Requested),
            "accepted" => Ok(FightStatus::Accepted),
            "scheduled" => Ok(FightStatus::Scheduled),
            "deleted" => Ok(FightStatus::Deleted),
            _ => Err(format!("Invalid fight status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            FightStatus::Requested => "requested",
            FightStatus::Accepted => "accepted",
            FightStatus::Scheduled => "scheduled",
            FightStatus::Deleted => "deleted",
        }
    }

    /// Whether the state machine allows moving from `self` to `to`.
    ///
    /// No transitions are defined out of `scheduled` or `deleted`.
    pub fn can_transition_to(&self, to: FightStatus) -> bool {
        matches!(
            (self, to),
            (FightStatus::Requested, FightStatus::Accepted)
                | (FightStatus::Requested, FightStatus::Deleted)
                | (FightStatus::Accepted, FightStatus::Scheduled)
        )
    }
}

/// Fight model representing a matchmaking agreement between two fighters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fight {
    pub id: Uuid,
    pub fighter_a_id: Uuid, // The requesting fighter
    pub fighter_b_id: Uuid, // The addressed fighter
    pub status: String, // Stored as TEXT, use FightStatus enum for type safety
    pub created_at: NaiveDateTime,
}

impl Fight {
    /// Get status as an enum
    pub fn status_enum(&self) -> FightStatus {
        FightStatus::from_str(&self.status).unwrap_or(FightStatus::Requested)
    }

    /// Check whether a fighter participates in this fight
    pub fn involves(&self, fighter_id: Uuid) -> bool {
        self.fighter_a_id == fighter_id || self.fighter_b_id == fighter_id
    }

    /// Check whether this fight is between the given pair, in either order
    pub fn is_between(&self, a: Uuid, b: Uuid) -> bool {
        (self.fighter_a_id == a && self.fighter_b_id == b)
            || (self.fighter_a_id == b && self.fighter_b_id == a)
    }
}

/// Append-only audit entry for a fight status transition
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FightStatusHistory {
    pub id: Uuid,
    pub fight_id: Uuid,
    pub status: String,
    pub changed_by: Uuid,
    pub reason: Option<String>,
    pub changed_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fight_status_conversion() {
        assert_eq!(FightStatus::Requested.as_str(), "requested");
        assert_eq!(FightStatus::from_str("SCHEDULED").unwrap(), FightStatus::Scheduled);
        assert!(FightStatus::from_str("cancelled").is_err());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(FightStatus::Requested.can_transition_to(FightStatus::Accepted));
        assert!(FightStatus::Requested.can_transition_to(FightStatus::Deleted));
        assert!(FightStatus::Accepted.can_transition_to(FightStatus::Scheduled));
    }

    #[test]
    fn test_scheduled_cannot_skip_accepted() {
        assert!(!FightStatus::Requested.can_transition_to(FightStatus::Scheduled));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for to in [
            FightStatus::Requested,
            FightStatus::Accepted,
            FightStatus::Scheduled,
            FightStatus::Deleted,
        ] {
            assert!(!FightStatus::Scheduled.can_transition_to(to));
            assert!(!FightStatus::Deleted.can_transition_to(to));
        }
    }
}

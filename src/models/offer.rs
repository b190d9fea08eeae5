use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Offer status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

impl OfferStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OfferStatus::Pending),
            "accepted" => Ok(OfferStatus::Accepted),
            "rejected" => Ok(OfferStatus::Rejected),
            _ => Err(format!("Invalid offer status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
        }
    }
}

/// A promoter's purse offer addressed to one fighter of a fight.
///
/// Offers are always created in pairs, one per fighter, sharing
/// `(fight_id, event_id, event_slot_id, plo_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Offer {
    pub id: Uuid,
    pub fight_id: Uuid,
    pub event_id: Uuid,
    pub event_slot_id: Uuid,
    pub fighter_id: Uuid, // The addressee; only this fighter may respond
    pub plo_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub status: String, // Stored as TEXT, use OfferStatus enum for type safety
    pub created_at: NaiveDateTime,
}

impl Offer {
    /// Get status as an enum
    pub fn status_enum(&self) -> OfferStatus {
        OfferStatus::from_str(&self.status).unwrap_or(OfferStatus::Pending)
    }

    /// Check if this offer is still awaiting a response
    pub fn is_pending(&self) -> bool {
        self.status_enum() == OfferStatus::Pending
    }

    /// Check if this offer has been accepted
    pub fn is_accepted(&self) -> bool {
        self.status_enum() == OfferStatus::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_status_conversion() {
        assert_eq!(OfferStatus::Pending.as_str(), "pending");
        assert_eq!(OfferStatus::from_str("ACCEPTED").unwrap(), OfferStatus::Accepted);
        assert!(OfferStatus::from_str("withdrawn").is_err());
    }
}

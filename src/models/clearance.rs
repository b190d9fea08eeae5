use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Medical clearance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearanceStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClearanceStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ClearanceStatus::Pending),
            "approved" => Ok(ClearanceStatus::Approved),
            "rejected" => Ok(ClearanceStatus::Rejected),
            _ => Err(format!("Invalid clearance status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearanceStatus::Pending => "pending",
            ClearanceStatus::Approved => "approved",
            ClearanceStatus::Rejected => "rejected",
        }
    }
}

/// A medical approval record gating a fighter's ability to accept an offer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MedicalClearance {
    pub id: Uuid,
    pub fighter_id: Uuid,
    pub status: String, // Stored as TEXT, use ClearanceStatus enum for type safety
    pub expiration_date: Option<NaiveDate>, // None means no expiry
    pub created_at: NaiveDateTime,
}

impl MedicalClearance {
    /// Get status as an enum
    pub fn status_enum(&self) -> Option<ClearanceStatus> {
        ClearanceStatus::from_str(&self.status).ok()
    }

    /// Whether this clearance covers a fight on the given date.
    ///
    /// Valid iff approved and either open-ended or not yet expired.
    pub fn is_valid_for(&self, fight_date: NaiveDate) -> bool {
        self.status_enum() == Some(ClearanceStatus::Approved)
            && self.expiration_date.map_or(true, |exp| exp >= fight_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clearance(status: &str, expiration: Option<NaiveDate>) -> MedicalClearance {
        MedicalClearance {
            id: Uuid::new_v4(),
            fighter_id: Uuid::new_v4(),
            status: status.to_string(),
            expiration_date: expiration,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_ended_approved_clearance_is_valid() {
        assert!(clearance("approved", None).is_valid_for(date(2030, 1, 1)));
    }

    #[test]
    fn test_expiry_on_fight_date_is_still_valid() {
        let c = clearance("approved", Some(date(2026, 9, 1)));
        assert!(c.is_valid_for(date(2026, 9, 1)));
        assert!(!c.is_valid_for(date(2026, 9, 2)));
    }

    #[test]
    fn test_unapproved_clearances_never_valid() {
        assert!(!clearance("pending", None).is_valid_for(date(2026, 1, 1)));
        assert!(!clearance("rejected", None).is_valid_for(date(2026, 1, 1)));
    }
}

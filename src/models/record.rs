use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How a recorded fight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Decision,
    Ko,
    Tko,
    Submission,
    Draw,
    NoContest,
}

impl ResultType {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "decision" => Ok(ResultType::Decision),
            "ko" => Ok(ResultType::Ko),
            "tko" => Ok(ResultType::Tko),
            "submission" => Ok(ResultType::Submission),
            "draw" => Ok(ResultType::Draw),
            "no_contest" => Ok(ResultType::NoContest),
            _ => Err(format!("Invalid result type: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Decision => "decision",
            ResultType::Ko => "ko",
            ResultType::Tko => "tko",
            ResultType::Submission => "submission",
            ResultType::Draw => "draw",
            ResultType::NoContest => "no_contest",
        }
    }

    /// Draws and no-contests count for neither fighter
    pub fn is_drawish(&self) -> bool {
        matches!(self, ResultType::Draw | ResultType::NoContest)
    }
}

/// Recorded outcome of a fight; at most one per fight, amendable
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FightResult {
    pub id: Uuid,
    pub fight_id: Uuid,
    pub winner_id: Option<Uuid>, // None for draws and no-contests
    pub result_type: String, // Stored as TEXT, use ResultType enum for type safety
    pub recorded_by: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FightResult {
    /// Get result type as an enum
    pub fn result_type_enum(&self) -> Option<ResultType> {
        ResultType::from_str(&self.result_type).ok()
    }
}

/// Externally verified historical totals for a fighter.
///
/// Only `accepted` verifications contribute to the aggregated record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FighterVerification {
    pub id: Uuid,
    pub fighter_id: Uuid,
    pub status: String,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub created_at: NaiveDateTime,
}

/// Derived win/loss/draw cache for a fighter.
///
/// One row per fighter, recomputed wholesale whenever a result is
/// recorded or amended; never patched incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FighterRecord {
    pub fighter_id: Uuid,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub total_fights: i32,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_type_conversion() {
        assert_eq!(ResultType::NoContest.as_str(), "no_contest");
        assert_eq!(ResultType::from_str("ko").unwrap(), ResultType::Ko);
        assert!(ResultType::from_str("forfeit").is_err());
    }

    #[test]
    fn test_drawish_results() {
        assert!(ResultType::Draw.is_drawish());
        assert!(ResultType::NoContest.is_drawish());
        assert!(!ResultType::Decision.is_drawish());
        assert!(!ResultType::Ko.is_drawish());
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account role supplied by the identity subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Fighter,
    Plo,
    Admin,
}

impl Role {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fighter" => Ok(Role::Fighter),
            "plo" => Ok(Role::Plo),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Fighter => "fighter",
            Role::Plo => "plo",
            Role::Admin => "admin",
        }
    }
}

/// Verification status of a promoter account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PloStatus {
    Pending,
    Verified,
    Rejected,
}

impl PloStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PloStatus::Pending),
            "verified" => Ok(PloStatus::Verified),
            "rejected" => Ok(PloStatus::Rejected),
            _ => Err(format!("Invalid PLO status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            PloStatus::Pending => "pending",
            PloStatus::Verified => "verified",
            PloStatus::Rejected => "rejected",
        }
    }
}

/// User account referenced by the scheduling core.
///
/// Profile data lives with the identity subsystem; the core only needs
/// the role and, for promoters, the verification status.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub role: String, // Stored as TEXT, use Role enum for type safety
    pub plo_status: Option<String>, // Only populated for promoter accounts
    pub created_at: NaiveDateTime,
}

impl User {
    /// Get role as an enum
    pub fn role_enum(&self) -> Option<Role> {
        Role::from_str(&self.role).ok()
    }

    /// Check if this account is a fighter
    pub fn is_fighter(&self) -> bool {
        self.role_enum() == Some(Role::Fighter)
    }

    /// Check if this account is an admin
    pub fn is_admin(&self) -> bool {
        self.role_enum() == Some(Role::Admin)
    }

    /// Check if this account is a promoter cleared to run events
    pub fn is_verified_plo(&self) -> bool {
        self.role_enum() == Some(Role::Plo)
            && self
                .plo_status
                .as_deref()
                .and_then(|s| PloStatus::from_str(s).ok())
                == Some(PloStatus::Verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, plo_status: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            role: role.to_string(),
            plo_status: plo_status.map(|s| s.to_string()),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_role_conversion() {
        assert_eq!(Role::Fighter.as_str(), "fighter");
        assert_eq!(Role::from_str("plo").unwrap(), Role::Plo);
        assert!(Role::from_str("spectator").is_err());
    }

    #[test]
    fn test_verified_plo_requires_both_role_and_status() {
        assert!(user("plo", Some("verified")).is_verified_plo());
        assert!(!user("plo", Some("pending")).is_verified_plo());
        assert!(!user("plo", None).is_verified_plo());
        assert!(!user("fighter", Some("verified")).is_verified_plo());
    }
}

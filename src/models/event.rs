use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Rejected,
    Completed,
}

impl EventStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            "rejected" => Ok(EventStatus::Rejected),
            "completed" => Ok(EventStatus::Completed),
            _ => Err(format!("Invalid event status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Rejected => "rejected",
            EventStatus::Completed => "completed",
        }
    }
}

/// Event model representing a promoter's fight card
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub plo_id: Uuid, // Owning promoter; only the owner may mutate
    pub name: String,
    pub status: String, // Stored as TEXT, use EventStatus enum for type safety
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub venue_capacity: Option<i32>,
    pub poster_image: Option<String>,
    pub ticket_link: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Event {
    /// Get status as an enum
    pub fn status_enum(&self) -> EventStatus {
        EventStatus::from_str(&self.status).unwrap_or(EventStatus::Draft)
    }

    /// Fields still required before the event can be published.
    ///
    /// A string field counts as missing when empty after trimming;
    /// the capacity must be strictly positive.
    pub fn missing_publication_fields(&self) -> Vec<&'static str> {
        fn blank(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, |s| s.trim().is_empty())
        }

        let mut missing = Vec::new();
        if blank(&self.venue_name) {
            missing.push("venue_name");
        }
        if blank(&self.venue_address) {
            missing.push("venue_address");
        }
        if blank(&self.city) {
            missing.push("city");
        }
        if blank(&self.country) {
            missing.push("country");
        }
        if self.venue_capacity.map_or(true, |c| c <= 0) {
            missing.push("venue_capacity");
        }
        if blank(&self.poster_image) {
            missing.push("poster_image");
        }
        if blank(&self.ticket_link) {
            missing.push("ticket_link");
        }
        missing
    }
}

/// A bookable time slot within an event.
///
/// `fight_id` goes from null to non-null at most once, when an offer
/// pair closes; a slot never holds more than one fight.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventSlot {
    pub id: Uuid,
    pub event_id: Uuid,
    pub start_time: Option<NaiveDateTime>,
    pub fight_id: Option<Uuid>,
}

/// Append-only audit entry for an event status transition
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventStatusHistory {
    pub id: Uuid,
    pub event_id: Uuid,
    pub status: String,
    pub changed_by: Uuid,
    pub reason: Option<String>,
    pub changed_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_event() -> Event {
        Event {
            id: Uuid::new_v4(),
            plo_id: Uuid::new_v4(),
            name: "Friday Night Fights".to_string(),
            status: "draft".to_string(),
            venue_name: Some("The Garden".to_string()),
            venue_address: Some("4 Penn Plaza".to_string()),
            city: Some("New York".to_string()),
            country: Some("USA".to_string()),
            venue_capacity: Some(20000),
            poster_image: Some("https://cdn.example.com/poster.png".to_string()),
            ticket_link: Some("https://tickets.example.com/fnf".to_string()),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_event_status_conversion() {
        assert_eq!(EventStatus::Draft.as_str(), "draft");
        assert_eq!(EventStatus::from_str("published").unwrap(), EventStatus::Published);
        assert!(EventStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_complete_event_has_no_missing_fields() {
        assert!(draft_event().missing_publication_fields().is_empty());
    }

    #[test]
    fn test_blank_and_absent_fields_are_reported() {
        let mut event = draft_event();
        event.ticket_link = None;
        event.city = Some("   ".to_string());
        let missing = event.missing_publication_fields();
        assert_eq!(missing, vec!["city", "ticket_link"]);
    }

    #[test]
    fn test_zero_capacity_counts_as_missing() {
        let mut event = draft_event();
        event.venue_capacity = Some(0);
        assert_eq!(event.missing_publication_fields(), vec!["venue_capacity"]);
    }
}

use crate::database::DatabaseError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Domain failures from the scheduling workflows.
///
/// Every variant carries a stable string code that clients can match on;
/// these are returned as values from the services, never panicked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("a fighter cannot request a fight against themselves")]
    CannotRequestSelf,

    #[error("the requesting account is not a fighter")]
    SenderNotFighter,

    #[error("the requested opponent is not a fighter")]
    ReceiverNotFighter,

    #[error("an open fight already exists between these fighters")]
    RequestExists,

    #[error("fight not found")]
    FightNotFound,

    #[error("fighter not found")]
    FighterNotFound,

    #[error("operation not valid in status '{current}'")]
    InvalidStatus { current: String },

    #[error("only the requested fighter may respond to this fight")]
    NotReceiver,

    #[error("event not found")]
    EventNotFound,

    #[error("event is not owned by this promoter")]
    EventNotOwned,

    #[error("promoter account is not verified")]
    PloNotVerified,

    #[error("event is missing required fields: {}", missing.join(", "))]
    MissingRequiredFields { missing: Vec<&'static str> },

    #[error("event has no slots")]
    NoSlots,

    #[error("fight has not been accepted by both fighters")]
    FightNotAccepted,

    #[error("event slot not found")]
    SlotNotFound,

    #[error("event slot does not belong to this event")]
    SlotNotInEvent,

    #[error("event slot already has a fight assigned")]
    SlotAlreadyAssigned,

    #[error("a pending offer pair already exists for this slot")]
    OfferAlreadyExists,

    #[error("both offers for this slot have already been accepted")]
    OffersAlreadyAccepted,

    #[error("offer not found")]
    OfferNotFound,

    #[error("caller is not allowed to act on this resource")]
    Forbidden,

    #[error("this offer has already been responded to")]
    OfferAlreadyResponded,

    #[error("no valid medical clearance for the fight date")]
    MedicalClearanceMissingOrExpired,
}

impl DomainError {
    /// Stable machine-readable code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CannotRequestSelf => "cannot_request_self",
            Self::SenderNotFighter => "sender_not_fighter",
            Self::ReceiverNotFighter => "receiver_not_fighter",
            Self::RequestExists => "request_exists",
            Self::FightNotFound => "fight_not_found",
            Self::FighterNotFound => "fighter_not_found",
            Self::InvalidStatus { .. } => "invalid_status",
            Self::NotReceiver => "not_receiver",
            Self::EventNotFound => "event_not_found",
            Self::EventNotOwned => "event_not_owned",
            Self::PloNotVerified => "plo_not_verified",
            Self::MissingRequiredFields { .. } => "missing_required_fields",
            Self::NoSlots => "no_slots",
            Self::FightNotAccepted => "fight_not_accepted",
            Self::SlotNotFound => "slot_not_found",
            Self::SlotNotInEvent => "slot_not_in_event",
            Self::SlotAlreadyAssigned => "slot_already_assigned",
            Self::OfferAlreadyExists => "offer_already_exists",
            Self::OffersAlreadyAccepted => "offers_already_accepted",
            Self::OfferNotFound => "offer_not_found",
            Self::Forbidden => "forbidden",
            Self::OfferAlreadyResponded => "offer_already_responded",
            Self::MedicalClearanceMissingOrExpired => "medical_clearance_missing_or_expired",
        }
    }

    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::FightNotFound
            | Self::FighterNotFound
            | Self::EventNotFound
            | Self::SlotNotFound
            | Self::OfferNotFound
            | Self::ReceiverNotFighter => StatusCode::NOT_FOUND,

            Self::SenderNotFighter
            | Self::NotReceiver
            | Self::EventNotOwned
            | Self::PloNotVerified
            | Self::Forbidden => StatusCode::FORBIDDEN,

            Self::RequestExists
            | Self::InvalidStatus { .. }
            | Self::SlotAlreadyAssigned
            | Self::OfferAlreadyExists
            | Self::OffersAlreadyAccepted
            | Self::OfferAlreadyResponded => StatusCode::CONFLICT,

            Self::CannotRequestSelf
            | Self::MissingRequiredFields { .. }
            | Self::NoSlots
            | Self::FightNotAccepted
            | Self::SlotNotInEvent
            | Self::MedicalClearanceMissingOrExpired => StatusCode::BAD_REQUEST,
        }
    }
}

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Domain workflow failure with a stable code
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Malformed or missing input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or invalid bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database errors
    #[error("SQL error: {0}")]
    Sqlx(#[from] SqlxError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Get HTTP status code for the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(e) => e.status(),
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_)
            | AppError::Sqlx(_)
            | AppError::Config(_)
            | AppError::Serialization(_)
            | AppError::Message(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "request_exists").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (code, message) = match &self {
            AppError::Domain(e) => (e.code().to_string(), e.to_string()),
            AppError::Validation(msg) => ("invalid_input".to_string(), msg.clone()),
            AppError::Unauthorized(msg) => ("unauthorized".to_string(), msg.clone()),
            // Infrastructure details stay out of the response body.
            other => {
                tracing::error!(error = %other, "internal server error");
                (
                    "internal_error".to_string(),
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_codes_are_stable() {
        assert_eq!(DomainError::RequestExists.code(), "request_exists");
        assert_eq!(DomainError::NotReceiver.code(), "not_receiver");
        assert_eq!(
            DomainError::MedicalClearanceMissingOrExpired.code(),
            "medical_clearance_missing_or_expired"
        );
        assert_eq!(
            DomainError::MissingRequiredFields {
                missing: vec!["ticket_link"]
            }
            .code(),
            "missing_required_fields"
        );
    }

    #[test]
    fn not_found_family_maps_to_404() {
        for err in [
            DomainError::FightNotFound,
            DomainError::FighterNotFound,
            DomainError::EventNotFound,
            DomainError::SlotNotFound,
            DomainError::OfferNotFound,
        ] {
            assert_eq!(err.status(), StatusCode::NOT_FOUND, "{:?}", err);
        }
    }

    #[test]
    fn state_conflicts_map_to_409() {
        for err in [
            DomainError::RequestExists,
            DomainError::SlotAlreadyAssigned,
            DomainError::OfferAlreadyExists,
            DomainError::OffersAlreadyAccepted,
            DomainError::OfferAlreadyResponded,
            DomainError::InvalidStatus {
                current: "published".to_string(),
            },
        ] {
            assert_eq!(err.status(), StatusCode::CONFLICT, "{:?}", err);
        }
    }

    #[test]
    fn preconditions_map_to_400() {
        for err in [
            DomainError::CannotRequestSelf,
            DomainError::NoSlots,
            DomainError::FightNotAccepted,
            DomainError::MedicalClearanceMissingOrExpired,
            DomainError::MissingRequiredFields {
                missing: vec!["poster_image"],
            },
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{:?}", err);
        }
    }

    #[test]
    fn infrastructure_errors_map_to_500() {
        let err = AppError::Sqlx(SqlxError::PoolClosed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_fields_message_lists_fields() {
        let err = DomainError::MissingRequiredFields {
            missing: vec!["venue_name", "ticket_link"],
        };
        let msg = err.to_string();
        assert!(msg.contains("venue_name"));
        assert!(msg.contains("ticket_link"));
    }
}

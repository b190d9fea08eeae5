//! Domain models for the Ringside backend.
//!
//! This module contains all database-backed models representing
//! the core entities of the match-scheduling workflow.

pub mod clearance;
pub mod event;
pub mod fight;
pub mod offer;
pub mod record;
pub mod user;

// Re-export all models for convenient access
pub use clearance::{ClearanceStatus, MedicalClearance};
pub use event::{Event, EventSlot, EventStatus, EventStatusHistory};
pub use fight::{Fight, FightStatus, FightStatusHistory};
pub use offer::{Offer, OfferStatus};
pub use record::{FightResult, FighterRecord, FighterVerification, ResultType};
pub use user::{PloStatus, Role, User};

pub mod clearance_repository;
pub mod event_repository;
pub mod fight_repository;
pub mod offer_repository;
pub mod record_repository;
pub mod user_repository;

// Re-export all repositories for convenient access
pub use clearance_repository::ClearanceRepository;
pub use event_repository::{EventRepository, NewEvent};
pub use fight_repository::FightRepository;
pub use offer_repository::OfferRepository;
pub use record_repository::RecordRepository;
pub use user_repository::UserRepository;

pub mod clearance_gate;
pub mod event_service;
pub mod fight_service;
pub mod offer_service;
pub mod record_service;

pub use clearance_gate::ClearanceGate;
pub use event_service::{CreateEventInput, EventService};
pub use fight_service::FightService;
pub use offer_service::{OfferService, SendOffersInput};
pub use record_service::RecordService;

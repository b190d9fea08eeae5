//! Ringside Backend Library
//!
//! This module exposes the match-scheduling core for use by the binary,
//! tests and other consumers.

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, DomainError};

use auth::JwtKeys;
use database::Database;
use repositories::*;
use services::*;
use std::sync::Arc;

/// Application state containing all repositories and services
pub struct AppState {
    pub database: Database,
    pub jwt: JwtKeys,
    pub user_repo: Arc<UserRepository>,
    pub fight_repo: Arc<FightRepository>,
    pub event_repo: Arc<EventRepository>,
    pub offer_repo: Arc<OfferRepository>,
    pub clearance_repo: Arc<ClearanceRepository>,
    pub record_repo: Arc<RecordRepository>,
    pub clearance_gate: Arc<ClearanceGate>,
    pub fight_service: Arc<FightService>,
    pub event_service: Arc<EventService>,
    pub offer_service: Arc<OfferService>,
    pub record_service: Arc<RecordService>,
}

impl AppState {
    /// Create a new AppState with initialized repositories and services
    pub fn new(pool: sqlx::PgPool, config: &AppConfig) -> Self {
        let database = Database::new(pool.clone());

        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let fight_repo = Arc::new(FightRepository::new(pool.clone()));
        let event_repo = Arc::new(EventRepository::new(pool.clone()));
        let offer_repo = Arc::new(OfferRepository::new(pool.clone()));
        let clearance_repo = Arc::new(ClearanceRepository::new(pool.clone()));
        let record_repo = Arc::new(RecordRepository::new(pool.clone()));

        let clearance_gate = Arc::new(ClearanceGate::new(clearance_repo.clone()));
        let fight_service = Arc::new(FightService::new(fight_repo.clone(), user_repo.clone()));
        let event_service = Arc::new(EventService::new(
            event_repo.clone(),
            user_repo.clone(),
            record_repo.clone(),
        ));
        let offer_service = Arc::new(OfferService::new(
            pool.clone(),
            offer_repo.clone(),
            fight_repo.clone(),
            event_repo.clone(),
            user_repo.clone(),
            clearance_gate.clone(),
        ));
        let record_service = Arc::new(RecordService::new(
            pool,
            record_repo.clone(),
            fight_repo.clone(),
            event_repo.clone(),
            user_repo.clone(),
            event_service.clone(),
        ));

        Self {
            database,
            jwt: JwtKeys::new(&config.jwt_secret),
            user_repo,
            fight_repo,
            event_repo,
            offer_repo,
            clearance_repo,
            record_repo,
            clearance_gate,
            fight_service,
            event_service,
            offer_service,
            record_service,
        }
    }
}

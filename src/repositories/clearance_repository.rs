use crate::models::MedicalClearance;
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for medical clearance lookups.
///
/// Read-only from the scheduling core's point of view; clearances are
/// issued and revoked by the medical record-keeping subsystem.
pub struct ClearanceRepository {
    pool: PgPool,
}

impl ClearanceRepository {
    /// Create a new ClearanceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find all clearances for a fighter
    pub async fn find_by_fighter(&self, fighter_id: Uuid) -> SqlxResult<Vec<MedicalClearance>> {
        sqlx::query_as::<_, MedicalClearance>(
            r#"
            SELECT id, fighter_id, status, expiration_date, created_at
            FROM medical_clearances
            WHERE fighter_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(fighter_id)
        .fetch_all(&self.pool)
        .await
    }
}

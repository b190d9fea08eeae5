use crate::models::User;
use sqlx::{PgPool, Result as SqlxResult};
use uuid::Uuid;

/// Repository for user account lookups.
///
/// Accounts are owned by the identity subsystem; the scheduling core only
/// reads role and promoter verification status.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by UUID
    pub async fn find_by_id(&self, id: Uuid) -> SqlxResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, role, plo_status, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}

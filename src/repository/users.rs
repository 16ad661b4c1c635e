//! Owner lookup against the users table

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::IdentityProvider;
use crate::{error::AppResult, models::User};

#[derive(Clone)]
pub struct PgUserDirectory {
    pool: Pool<Postgres>,
}

impl PgUserDirectory {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PgUserDirectory {
    /// Get user by username
    async fn resolve(&self, subject: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE username = $1")
            .bind(subject)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

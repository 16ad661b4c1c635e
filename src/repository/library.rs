//! PostgreSQL library store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::LibraryStore;
use crate::{
    error::{AppError, AppResult},
    models::{GameStatus, LibraryEntry, SaveEntry},
};

pub(crate) const DUPLICATE_ENTRY: &str = "Game already in your list";

#[derive(Clone)]
pub struct PgLibraryStore {
    pool: Pool<Postgres>,
}

impl PgLibraryStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryStore for PgLibraryStore {
    async fn find_all_by_owner(&self, owner_id: i32) -> AppResult<Vec<LibraryEntry>> {
        let rows = sqlx::query_as::<_, LibraryEntry>(
            "SELECT * FROM user_games WHERE owner_id = $1 ORDER BY added_at, id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_owner_and_status(
        &self,
        owner_id: i32,
        status: GameStatus,
    ) -> AppResult<Vec<LibraryEntry>> {
        let rows = sqlx::query_as::<_, LibraryEntry>(
            "SELECT * FROM user_games WHERE owner_id = $1 AND status = $2 ORDER BY added_at, id",
        )
        .bind(owner_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_owner_and_external_id(
        &self,
        owner_id: i32,
        external_game_id: i32,
    ) -> AppResult<Option<LibraryEntry>> {
        let row = sqlx::query_as::<_, LibraryEntry>(
            "SELECT * FROM user_games WHERE owner_id = $1 AND external_game_id = $2",
        )
        .bind(owner_id)
        .bind(external_game_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, entry: SaveEntry) -> AppResult<LibraryEntry> {
        match entry {
            SaveEntry::New { owner_id, entry } => sqlx::query_as::<_, LibraryEntry>(
                r#"
                INSERT INTO user_games (
                    owner_id, external_game_id, title, image_url, genre, release_date,
                    description, price, catalog_rating_snapshot, status, personal_rating, added_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
                RETURNING *
                "#,
            )
            .bind(owner_id)
            .bind(entry.external_game_id)
            .bind(&entry.title)
            .bind(&entry.image_url)
            .bind(&entry.genre)
            .bind(&entry.release_date)
            .bind(&entry.description)
            .bind(entry.price)
            .bind(entry.catalog_rating_snapshot)
            .bind(entry.status.unwrap_or_default())
            .bind(entry.personal_rating)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_insert(e, DUPLICATE_ENTRY)),

            SaveEntry::Existing(entry) => sqlx::query_as::<_, LibraryEntry>(
                r#"
                UPDATE user_games
                SET title = $3, image_url = $4, genre = $5, release_date = $6,
                    description = $7, price = $8, catalog_rating_snapshot = $9,
                    status = $10, personal_rating = $11
                WHERE id = $1 AND owner_id = $2
                RETURNING *
                "#,
            )
            .bind(entry.id)
            .bind(entry.owner_id)
            .bind(&entry.title)
            .bind(&entry.image_url)
            .bind(&entry.genre)
            .bind(&entry.release_date)
            .bind(&entry.description)
            .bind(entry.price)
            .bind(entry.catalog_rating_snapshot)
            .bind(entry.status)
            .bind(entry.personal_rating)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Library entry {} not found", entry.id))),
        }
    }

    async fn delete(&self, entry: &LibraryEntry) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM user_games WHERE id = $1 AND owner_id = $2")
            .bind(entry.id)
            .bind(entry.owner_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Library entry {} not found", entry.id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

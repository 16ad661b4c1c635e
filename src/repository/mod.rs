//! Repository layer for library persistence and owner lookup

pub mod library;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{GameStatus, LibraryEntry, SaveEntry, User},
};

/// Persistence for library entries. Every lookup is scoped to one owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// All entries of an owner, oldest first
    async fn find_all_by_owner(&self, owner_id: i32) -> AppResult<Vec<LibraryEntry>>;

    async fn find_by_owner_and_status(
        &self,
        owner_id: i32,
        status: GameStatus,
    ) -> AppResult<Vec<LibraryEntry>>;

    async fn find_by_owner_and_external_id(
        &self,
        owner_id: i32,
        external_game_id: i32,
    ) -> AppResult<Option<LibraryEntry>>;

    /// Insert a new entry or rewrite every mutable field of an existing one.
    ///
    /// Inserting a second entry for the same (owner, external game) pair
    /// fails with `AppError::Conflict`.
    async fn save(&self, entry: SaveEntry) -> AppResult<LibraryEntry>;

    async fn delete(&self, entry: &LibraryEntry) -> AppResult<()>;

    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;
}

/// Maps an authenticated subject to its owner record
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, subject: &str) -> AppResult<Option<User>>;
}

/// Main repository struct bundling the configured stores
#[derive(Clone)]
pub struct Repository {
    pub library: Arc<dyn LibraryStore>,
    pub users: Arc<dyn IdentityProvider>,
}

impl Repository {
    pub fn new(library: Arc<dyn LibraryStore>, users: Arc<dyn IdentityProvider>) -> Self {
        Self { library, users }
    }

    /// Repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::new(
            Arc::new(library::PgLibraryStore::new(pool.clone())),
            Arc::new(users::PgUserDirectory::new(pool)),
        )
    }
}

//! Library service: per-owner access to library entries

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{GameStatus, LibraryEntry, LibraryEntryUpdate, NewLibraryEntry, SaveEntry, User},
    repository::{library::DUPLICATE_ENTRY, Repository},
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Resolve an authenticated subject to its owner record
    pub async fn resolve_owner(&self, subject: &str) -> AppResult<User> {
        self.repository
            .users
            .resolve(subject)
            .await?
            .ok_or_else(|| AppError::Authentication("User not found".to_string()))
    }

    pub async fn list_all(&self, owner: &User) -> AppResult<Vec<LibraryEntry>> {
        self.repository.library.find_all_by_owner(owner.id).await
    }

    pub async fn list_by_status(&self, owner: &User, status: GameStatus) -> AppResult<Vec<LibraryEntry>> {
        self.repository.library.find_by_owner_and_status(owner.id, status).await
    }

    /// Games the owner plans to play
    pub async fn wishlist(&self, owner: &User) -> AppResult<Vec<LibraryEntry>> {
        self.list_by_status(owner, GameStatus::PlanToPlay).await
    }

    /// Games the owner is playing right now
    pub async fn currently_playing(&self, owner: &User) -> AppResult<Vec<LibraryEntry>> {
        self.list_by_status(owner, GameStatus::Playing).await
    }

    /// The owner's entry for an external game, if any
    pub async fn check(&self, owner: &User, external_game_id: i32) -> AppResult<Option<LibraryEntry>> {
        tracing::debug!(owner_id = owner.id, external_game_id, "Checking library membership");
        self.repository
            .library
            .find_by_owner_and_external_id(owner.id, external_game_id)
            .await
    }

    /// Add a game to the owner's library
    pub async fn add(&self, owner: &User, mut entry: NewLibraryEntry) -> AppResult<LibraryEntry> {
        entry.validate()?;

        if self.check(owner, entry.external_game_id).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_ENTRY.to_string()));
        }

        entry.status.get_or_insert(GameStatus::PlanToPlay);
        let external_game_id = entry.external_game_id;

        let saved = self
            .repository
            .library
            .save(SaveEntry::New {
                owner_id: owner.id,
                entry,
            })
            .await?;

        tracing::info!(
            owner_id = owner.id,
            external_game_id,
            status = %saved.status,
            "Game added to library"
        );
        Ok(saved)
    }

    /// Apply a status / rating update to an existing entry
    pub async fn update(
        &self,
        owner: &User,
        external_game_id: i32,
        update: &LibraryEntryUpdate,
    ) -> AppResult<LibraryEntry> {
        let mut entry = self.find_owned(owner, external_game_id).await?;
        update.validate()?;
        update.apply_to(&mut entry);

        let saved = self.repository.library.save(SaveEntry::Existing(entry)).await?;

        tracing::info!(owner_id = owner.id, external_game_id, "Library entry updated");
        Ok(saved)
    }

    /// Remove a game from the owner's library
    pub async fn remove(&self, owner: &User, external_game_id: i32) -> AppResult<()> {
        let entry = self.find_owned(owner, external_game_id).await?;
        self.repository.library.delete(&entry).await?;

        tracing::info!(owner_id = owner.id, external_game_id, "Game removed from library");
        Ok(())
    }

    /// Store liveness, for readiness checks
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.library.ping().await
    }

    async fn find_owned(&self, owner: &User, external_game_id: i32) -> AppResult<LibraryEntry> {
        self.check(owner, external_game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found in your list".to_string()))
    }
}

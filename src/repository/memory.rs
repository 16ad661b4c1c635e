//! In-memory store and user directory

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{library::DUPLICATE_ENTRY, IdentityProvider, LibraryStore};
use crate::{
    error::{AppError, AppResult},
    models::{GameStatus, LibraryEntry, SaveEntry, User},
};

#[derive(Default)]
struct Rows {
    last_id: i32,
    // Kept in insertion order
    entries: Vec<LibraryEntry>,
}

/// Library store holding rows in process memory.
///
/// Enforces the same (owner, external game) uniqueness as the SQL schema.
#[derive(Default)]
pub struct MemoryLibraryStore {
    rows: RwLock<Rows>,
}

impl MemoryLibraryStore {
    /// Number of stored entries across all owners
    pub async fn len(&self) -> usize {
        self.rows.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LibraryStore for MemoryLibraryStore {
    async fn find_all_by_owner(&self, owner_id: i32) -> AppResult<Vec<LibraryEntry>> {
        let rows = self.rows.read().await;
        Ok(rows
            .entries
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_owner_and_status(
        &self,
        owner_id: i32,
        status: GameStatus,
    ) -> AppResult<Vec<LibraryEntry>> {
        let rows = self.rows.read().await;
        Ok(rows
            .entries
            .iter()
            .filter(|e| e.owner_id == owner_id && e.status == status)
            .cloned()
            .collect())
    }

    async fn find_by_owner_and_external_id(
        &self,
        owner_id: i32,
        external_game_id: i32,
    ) -> AppResult<Option<LibraryEntry>> {
        let rows = self.rows.read().await;
        Ok(rows
            .entries
            .iter()
            .find(|e| e.owner_id == owner_id && e.external_game_id == external_game_id)
            .cloned())
    }

    async fn save(&self, entry: SaveEntry) -> AppResult<LibraryEntry> {
        let mut rows = self.rows.write().await;
        match entry {
            SaveEntry::New { owner_id, entry } => {
                let duplicate = rows
                    .entries
                    .iter()
                    .any(|e| e.owner_id == owner_id && e.external_game_id == entry.external_game_id);
                if duplicate {
                    return Err(AppError::Conflict(DUPLICATE_ENTRY.to_string()));
                }

                rows.last_id += 1;
                let stored = LibraryEntry {
                    id: rows.last_id,
                    owner_id,
                    external_game_id: entry.external_game_id,
                    title: entry.title,
                    image_url: entry.image_url,
                    genre: entry.genre,
                    release_date: entry.release_date,
                    description: entry.description,
                    price: entry.price,
                    catalog_rating_snapshot: entry.catalog_rating_snapshot,
                    status: entry.status.unwrap_or_default(),
                    personal_rating: entry.personal_rating,
                    added_at: Utc::now(),
                };
                rows.entries.push(stored.clone());
                Ok(stored)
            }
            SaveEntry::Existing(entry) => {
                let row = rows
                    .entries
                    .iter_mut()
                    .find(|e| e.id == entry.id && e.owner_id == entry.owner_id)
                    .ok_or_else(|| AppError::NotFound(format!("Library entry {} not found", entry.id)))?;

                row.title = entry.title;
                row.image_url = entry.image_url;
                row.genre = entry.genre;
                row.release_date = entry.release_date;
                row.description = entry.description;
                row.price = entry.price;
                row.catalog_rating_snapshot = entry.catalog_rating_snapshot;
                row.status = entry.status;
                row.personal_rating = entry.personal_rating;
                Ok(row.clone())
            }
        }
    }

    async fn delete(&self, entry: &LibraryEntry) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let before = rows.entries.len();
        rows.entries
            .retain(|e| !(e.id == entry.id && e.owner_id == entry.owner_id));
        if rows.entries.len() == before {
            return Err(AppError::NotFound(format!("Library entry {} not found", entry.id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// User directory for the memory backend.
///
/// Strict by default: only registered usernames resolve. An auto-provisioning
/// directory creates an owner the first time a subject is seen.
#[derive(Default)]
pub struct MemoryUserDirectory {
    auto_provision: bool,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserDirectory {
    pub fn auto_provisioning() -> Self {
        Self {
            auto_provision: true,
            users: RwLock::default(),
        }
    }

    /// Register an owner, returning the existing record if already known
    pub async fn register(&self, username: &str) -> User {
        let mut users = self.users.write().await;
        let next_id = users.len() as i32 + 1;
        users
            .entry(username.to_string())
            .or_insert_with(|| User {
                id: next_id,
                username: username.to_string(),
            })
            .clone()
    }
}

#[async_trait]
impl IdentityProvider for MemoryUserDirectory {
    async fn resolve(&self, subject: &str) -> AppResult<Option<User>> {
        if self.auto_provision {
            return Ok(Some(self.register(subject).await));
        }
        Ok(self.users.read().await.get(subject).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewLibraryEntry;

    fn new_entry(owner_id: i32, external_game_id: i32) -> SaveEntry {
        SaveEntry::New {
            owner_id,
            entry: NewLibraryEntry {
                external_game_id,
                title: Some(format!("Game {}", external_game_id)),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_default_status() {
        let store = MemoryLibraryStore::default();
        let saved = store.save(new_entry(1, 42)).await.unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(saved.status, GameStatus::PlanToPlay);

        let fetched = store.find_by_owner_and_external_id(1, 42).await.unwrap();
        assert_eq!(fetched, Some(saved));
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = MemoryLibraryStore::default();
        store.save(new_entry(1, 42)).await.unwrap();
        let err = store.save(new_entry(1, 42)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.len().await, 1);

        // Same game for another owner is fine
        store.save(new_entry(2, 42)).await.unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_keeps_identity_fields() {
        let store = MemoryLibraryStore::default();
        let saved = store.save(new_entry(1, 42)).await.unwrap();

        let mut changed = saved.clone();
        changed.status = GameStatus::Completed;
        changed.external_game_id = 99;
        let updated = store.save(SaveEntry::Existing(changed)).await.unwrap();

        assert_eq!(updated.status, GameStatus::Completed);
        assert_eq!(updated.external_game_id, 42);
        assert_eq!(updated.added_at, saved.added_at);
    }

    #[tokio::test]
    async fn test_update_of_other_owners_row_is_not_found() {
        let store = MemoryLibraryStore::default();
        let mut saved = store.save(new_entry(1, 42)).await.unwrap();
        saved.owner_id = 2;
        let err = store.save(SaveEntry::Existing(saved)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryLibraryStore::default();
        let saved = store.save(new_entry(1, 42)).await.unwrap();
        store.delete(&saved).await.unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(store.delete(&saved).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_strict_directory_only_resolves_registered() {
        let users = MemoryUserDirectory::default();
        assert_eq!(users.resolve("alice").await.unwrap(), None);
        let alice = users.register("alice").await;
        assert_eq!(users.resolve("alice").await.unwrap(), Some(alice.clone()));
        assert_eq!(users.register("alice").await, alice);
    }

    #[tokio::test]
    async fn test_auto_provisioning_directory() {
        let users = MemoryUserDirectory::auto_provisioning();
        let bob = users.resolve("bob").await.unwrap().unwrap();
        assert_eq!(bob.username, "bob");
        assert_eq!(users.resolve("bob").await.unwrap(), Some(bob));
    }
}

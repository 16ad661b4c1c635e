//! Library entry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

/// Where a game sits in the owner's library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    PlanToPlay,
    Playing,
    Completed,
    Dropped,
}

impl GameStatus {
    pub const ALL: [GameStatus; 4] = [
        GameStatus::PlanToPlay,
        GameStatus::Playing,
        GameStatus::Completed,
        GameStatus::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::PlanToPlay => "PLAN_TO_PLAY",
            GameStatus::Playing => "PLAYING",
            GameStatus::Completed => "COMPLETED",
            GameStatus::Dropped => "DROPPED",
        }
    }
}

impl std::str::FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLAN_TO_PLAY" => Ok(GameStatus::PlanToPlay),
            "PLAYING" => Ok(GameStatus::Playing),
            "COMPLETED" => Ok(GameStatus::Completed),
            "DROPPED" => Ok(GameStatus::Dropped),
            _ => Err(format!("Invalid game status: {}", s)),
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// SQLx conversion for GameStatus (stored as its wire name)
impl sqlx::Type<Postgres> for GameStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for GameStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for GameStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// One game in one user's library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub id: i32,
    pub owner_id: i32,
    /// Game id in the external catalog
    pub external_game_id: i32,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Aggregate catalog rating captured when the entry was last refreshed
    pub catalog_rating_snapshot: Option<f64>,
    pub status: GameStatus,
    /// Owner's own rating, 1-10
    pub personal_rating: Option<i32>,
    pub added_at: DateTime<Utc>,
}

/// Add-to-library request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewLibraryEntry {
    #[serde(alias = "gameId")]
    pub external_game_id: i32,
    pub title: Option<String>,
    #[serde(alias = "backgroundImage")]
    pub image_url: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    #[serde(alias = "rawgRating")]
    #[validate(range(min = 0.0, message = "Catalog rating cannot be negative"))]
    pub catalog_rating_snapshot: Option<f64>,
    /// Defaults to PLAN_TO_PLAY
    pub status: Option<GameStatus>,
    #[validate(range(min = 1, max = 10, message = "Personal rating must be between 1 and 10"))]
    pub personal_rating: Option<i32>,
}

/// Partial update request.
///
/// Only `status`, `personalRating` and `catalogRatingSnapshot` are ever
/// applied; any other field in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntryUpdate {
    pub status: Option<GameStatus>,
    #[validate(range(min = 1, max = 10, message = "Personal rating must be between 1 and 10"))]
    pub personal_rating: Option<i32>,
    #[serde(alias = "rawgRating")]
    #[validate(range(min = 0.0, message = "Catalog rating cannot be negative"))]
    pub catalog_rating_snapshot: Option<f64>,
}

impl LibraryEntryUpdate {
    /// Overwrite the merge-listed fields that are present in this update
    pub fn apply_to(&self, entry: &mut LibraryEntry) {
        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(rating) = self.personal_rating {
            entry.personal_rating = Some(rating);
        }
        if let Some(snapshot) = self.catalog_rating_snapshot {
            entry.catalog_rating_snapshot = Some(snapshot);
        }
    }
}

/// Input to `LibraryStore::save`: either a fresh row or a full rewrite of one
#[derive(Debug, Clone)]
pub enum SaveEntry {
    New { owner_id: i32, entry: NewLibraryEntry },
    Existing(LibraryEntry),
}

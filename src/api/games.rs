//! Game library endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{GameStatus, LibraryEntry, LibraryEntryUpdate, NewLibraryEntry},
    AppState,
};

use super::{ApiJson, CurrentUser};

/// List every game in the caller's library
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Library entries", body = Vec<LibraryEntry>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_games(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<LibraryEntry>>> {
    let entries = state.services.library.list_all(&user).await?;
    Ok(Json(entries))
}

/// List the caller's games with a given status
#[utoipa::path(
    get,
    path = "/api/games/status/{status}",
    tag = "games",
    security(("bearer_auth" = [])),
    params(("status" = String, Path, description = "PLAN_TO_PLAY, PLAYING, COMPLETED or DROPPED")),
    responses(
        (status = 200, description = "Library entries", body = Vec<LibraryEntry>),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_games_by_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<LibraryEntry>>> {
    let status: GameStatus = status.parse().map_err(AppError::Validation)?;
    let entries = state.services.library.list_by_status(&user, status).await?;
    Ok(Json(entries))
}

/// Games the caller plans to play
#[utoipa::path(
    get,
    path = "/api/games/wishlist",
    tag = "games",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wishlisted entries", body = Vec<LibraryEntry>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<LibraryEntry>>> {
    let entries = state.services.library.wishlist(&user).await?;
    Ok(Json(entries))
}

/// Games the caller is currently playing
#[utoipa::path(
    get,
    path = "/api/games/my-games",
    tag = "games",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Entries in progress", body = Vec<LibraryEntry>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn currently_playing(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<LibraryEntry>>> {
    let entries = state.services.library.currently_playing(&user).await?;
    Ok(Json(entries))
}

/// Look up the caller's entry for an external game
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/check",
    tag = "games",
    security(("bearer_auth" = [])),
    params(("game_id" = i32, Path, description = "External catalog game ID")),
    responses(
        (status = 200, description = "Game is in the library", body = LibraryEntry),
        (status = 404, description = "Game is not in the library")
    )
)]
pub async fn check_game(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_id): Path<i32>,
) -> AppResult<Response> {
    let response = match state.services.library.check(&user, game_id).await? {
        Some(entry) => Json(entry).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

/// Add a game to the caller's library
#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    security(("bearer_auth" = [])),
    request_body = NewLibraryEntry,
    responses(
        (status = 200, description = "Entry created", body = LibraryEntry),
        (status = 400, description = "Game already in the list or invalid payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn add_game(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(data): ApiJson<NewLibraryEntry>,
) -> AppResult<Json<LibraryEntry>> {
    let entry = state.services.library.add(&user, data).await?;
    Ok(Json(entry))
}

/// Update status, personal rating or catalog rating of a library entry
#[utoipa::path(
    put,
    path = "/api/games/{game_id}",
    tag = "games",
    security(("bearer_auth" = [])),
    params(("game_id" = i32, Path, description = "External catalog game ID")),
    request_body = LibraryEntryUpdate,
    responses(
        (status = 200, description = "Entry updated", body = LibraryEntry),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Game not in the library", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_game(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_id): Path<i32>,
    ApiJson(data): ApiJson<LibraryEntryUpdate>,
) -> AppResult<Json<LibraryEntry>> {
    let entry = state.services.library.update(&user, game_id, &data).await?;
    Ok(Json(entry))
}

/// Remove a game from the caller's library
#[utoipa::path(
    delete,
    path = "/api/games/{game_id}",
    tag = "games",
    security(("bearer_auth" = [])),
    params(("game_id" = i32, Path, description = "External catalog game ID")),
    responses(
        (status = 200, description = "Entry removed", body = String),
        (status = 404, description = "Game not in the library", body = crate::error::ErrorResponse)
    )
)]
pub async fn remove_game(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(game_id): Path<i32>,
) -> AppResult<&'static str> {
    state.services.library.remove(&user, game_id).await?;
    Ok("Game removed")
}

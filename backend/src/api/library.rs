//! Game-library API handlers.

use actix_web::{HttpResponse, delete, get, post, web};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::api::state::HttpState;
use crate::domain::{LibraryEntry, LibraryEntryWithGame, NewLibraryEntry};

/// The caller's library, joined with the games, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/games",
    responses(
        (status = 200, description = "Library entries", body = [LibraryEntryWithGame]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["library"],
    operation_id = "listLibrary"
)]
#[get("/users/me/games")]
pub async fn my_games(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<LibraryEntryWithGame>>> {
    let user_id = session.require_user_id()?;
    let entries = state.storage().user_games(user_id).await?;
    Ok(web::Json(entries))
}

/// Add a game to the caller's library.
#[utoipa::path(
    post,
    path = "/api/v1/users/me/games",
    request_body = NewLibraryEntry,
    responses(
        (status = 200, description = "Created entry", body = LibraryEntry),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["library"],
    operation_id = "addGameToLibrary"
)]
#[post("/users/me/games")]
pub async fn add_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewLibraryEntry>,
) -> ApiResult<web::Json<LibraryEntry>> {
    let user_id = session.require_user_id()?;
    let entry = state
        .storage()
        .add_game_to_library(user_id, payload.into_inner())
        .await?;
    Ok(web::Json(entry))
}

/// Remove a game from the caller's library.
#[utoipa::path(
    delete,
    path = "/api/v1/users/me/games/{gameId}",
    params(("gameId" = Uuid, Path, description = "Game id")),
    responses(
        (status = 204, description = "Removed"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["library"],
    operation_id = "removeGameFromLibrary"
)]
#[delete("/users/me/games/{game_id}")]
pub async fn remove_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state
        .storage()
        .remove_game_from_library(user_id, *path)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

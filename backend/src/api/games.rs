//! Game catalogue API handlers.

use actix_web::{get, post, web};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::api::state::HttpState;
use crate::api::users::SearchQuery;
use crate::domain::{Community, Error, Game, NewGame};

/// List active catalogue games.
#[utoipa::path(
    get,
    path = "/api/v1/games",
    responses(
        (status = 200, description = "Active games", body = [Game]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["games"],
    operation_id = "listGames"
)]
#[get("/games")]
pub async fn list_games(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Game>>> {
    session.require_user_id()?;
    let games = state.storage().all_games().await?;
    Ok(web::Json(games))
}

/// Create a catalogue entry.
#[utoipa::path(
    post,
    path = "/api/v1/games",
    request_body = NewGame,
    responses(
        (status = 200, description = "Created game", body = Game),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["games"],
    operation_id = "createGame"
)]
#[post("/games")]
pub async fn create_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewGame>,
) -> ApiResult<web::Json<Game>> {
    session.require_user_id()?;
    let request = payload.into_inner();
    if request.name.trim().is_empty() {
        return Err(Error::invalid_request("game name must not be empty").into());
    }
    let game = state.storage().create_game(request).await?;
    Ok(web::Json(game))
}

/// Case-insensitive substring search over active game names.
#[utoipa::path(
    get,
    path = "/api/v1/games/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching games", body = [Game]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["games"],
    operation_id = "searchGames"
)]
#[get("/games/search")]
pub async fn search_games(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<Game>>> {
    session.require_user_id()?;
    let games = state.storage().search_games(&query.q).await?;
    Ok(web::Json(games))
}

/// Fetch one game.
#[utoipa::path(
    get,
    path = "/api/v1/games/{id}",
    params(("id" = Uuid, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game", body = Game),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 404, description = "Unknown game", body = ApiError)
    ),
    tags = ["games"],
    operation_id = "getGame"
)]
#[get("/games/{id}")]
pub async fn get_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Game>> {
    session.require_user_id()?;
    let game = state
        .storage()
        .get_game(*path)
        .await?
        .ok_or_else(|| Error::not_found("game not found"))?;
    Ok(web::Json(game))
}

/// Communities scoped to a game, most members first.
#[utoipa::path(
    get,
    path = "/api/v1/games/{id}/communities",
    params(("id" = Uuid, Path, description = "Game id")),
    responses(
        (status = 200, description = "Communities for the game", body = [Community]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["games"],
    operation_id = "gameCommunities"
)]
#[get("/games/{id}/communities")]
pub async fn game_communities(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Community>>> {
    session.require_user_id()?;
    let communities = state.storage().communities_by_game(*path).await?;
    Ok(web::Json(communities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_utils::{authenticate, session_seed_route, test_session_middleware};
    use crate::domain::ports::MockStorage;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::Utc;
    use std::sync::Arc;

    fn sample_game(name: &str) -> Game {
        Game {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            genre: Some("FPS".into()),
            platform: Some("PC".into()),
            cover_image_url: None,
            description: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn test_app(
        storage: MockStorage,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(HttpState::new(Arc::new(storage))))
            .service(session_seed_route())
            .service(list_games)
            .service(create_game)
            .service(search_games)
            .service(get_game)
            .service(game_communities)
    }

    #[actix_web::test]
    async fn search_forwards_query_and_returns_matches() {
        let mut storage = MockStorage::new();
        storage
            .expect_search_games()
            .withf(|q| q == "valorant")
            .times(1)
            .returning(|_| Ok(vec![sample_game("VALORANT")]));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let req = test::TestRequest::get()
            .uri("/games/search?q=valorant")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<Game> = test::read_body_json(res).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].name, "VALORANT");
    }

    #[actix_web::test]
    async fn unknown_game_is_404() {
        let mut storage = MockStorage::new();
        storage.expect_get_game().returning(|_| Ok(None));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/games/{}", Uuid::new_v4()))
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_rejects_blank_names_before_storage() {
        let app = test::init_service(test_app(MockStorage::new())).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let req = test::TestRequest::post()
            .uri("/games")
            .cookie(cookie)
            .set_json(serde_json::json!({ "name": "  " }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn listing_requires_a_session() {
        let app = test::init_service(test_app(MockStorage::new())).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/games").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

//! User API handlers: login upsert, profile, presence, and search.

use actix_web::{HttpResponse, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::api::state::HttpState;
use crate::domain::{Error, OnlineStatus, ProfileUpdate, UpsertUser, User};

/// Login request body.
///
/// Identity is established by an external provider; the backend trusts the
/// asserted handle, upserts the user row keyed on it, and opens a session.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl From<LoginRequest> for UpsertUser {
    fn from(value: LoginRequest) -> Self {
        Self {
            username: value.username,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            profile_image_url: value.profile_image_url,
        }
    }
}

/// Search query string.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring to match.
    pub q: String,
}

/// Upsert the user row for the asserted identity and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let request = payload.into_inner();
    if request.username.trim().is_empty() {
        return Err(Error::invalid_request("username must not be empty").into());
    }
    let user = state.storage().upsert_user(request.into()).await?;
    session.persist_user(user.id)?;
    Ok(web::Json(user))
}

/// Drop the caller's session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Fetch the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 404, description = "User row no longer exists", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state
        .storage()
        .get_user(user_id)
        .await?
        .ok_or_else(|| Error::not_found("user not found"))?;
    Ok(web::Json(user))
}

/// Apply a partial profile update.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[patch("/users/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdate>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state
        .storage()
        .update_user_profile(user_id, payload.into_inner())
        .await?;
    Ok(web::Json(user))
}

/// Persist an online-status ping.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/status",
    request_body = OnlineStatus,
    responses(
        (status = 204, description = "Status stored"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "updateOnlineStatus"
)]
#[put("/users/me/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OnlineStatus>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state
        .storage()
        .update_online_status(user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Case-insensitive substring search over usernames and real names.
#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching users", body = [User]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["users"],
    operation_id = "searchUsers"
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    session.require_user_id()?;
    let users = state.storage().search_users(&query.q).await?;
    Ok(web::Json(users))
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
    use uuid::Uuid;

    fn sample_user(id: Uuid, username: &str) -> User {
        User {
            id,
            username: username.to_owned(),
            email: None,
            first_name: None,
            last_name: None,
            profile_image_url: None,
            bio: None,
            xp_points: 0,
            level: 1,
            gaming_platforms: vec![],
            twitch_username: None,
            youtube_username: None,
            discord_username: None,
            is_online: false,
            current_game: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
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
            .service(login)
            .service(logout)
            .service(current_user)
            .service(update_profile)
            .service(update_status)
            .service(search_users)
    }

    #[actix_web::test]
    async fn login_upserts_and_opens_session() {
        let user_id = Uuid::new_v4();
        let mut storage = MockStorage::new();
        storage
            .expect_upsert_user()
            .withf(|user| user.username == "shroud")
            .times(1)
            .returning(move |_| Ok(sample_user(user_id, "shroud")));
        storage
            .expect_get_user()
            .times(1)
            .returning(move |id| Ok(Some(sample_user(id, "shroud"))));

        let app = test::init_service(test_app(storage)).await;

        let login_req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "username": "shroud" }))
            .to_request();
        let login_res = test::call_service(&app, login_req).await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .next()
            .expect("session cookie")
            .into_owned();

        let me_req = test::TestRequest::get()
            .uri("/users/me")
            .cookie(cookie)
            .to_request();
        let me_res = test::call_service(&app, me_req).await;
        assert_eq!(me_res.status(), StatusCode::OK);
        let body: User = test::read_body_json(me_res).await;
        assert_eq!(body.username, "shroud");
    }

    #[actix_web::test]
    async fn login_rejects_blank_username() {
        let app = test::init_service(test_app(MockStorage::new())).await;
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "username": "   " }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn search_requires_a_session() {
        let app = test::init_service(test_app(MockStorage::new())).await;
        let req = test::TestRequest::get()
            .uri("/users/search?q=val")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn search_forwards_the_query() {
        let mut storage = MockStorage::new();
        storage
            .expect_search_users()
            .withf(|q| q == "ghost")
            .times(1)
            .returning(|_| Ok(vec![]));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let req = test::TestRequest::get()
            .uri("/users/search?q=ghost")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn status_ping_reaches_storage() {
        let user_id = Uuid::new_v4();
        let mut storage = MockStorage::new();
        storage
            .expect_update_online_status()
            .withf(move |id, status| {
                *id == user_id && status.is_online && status.current_game.as_deref() == Some("VALORANT")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, user_id).await;

        let req = test::TestRequest::put()
            .uri("/users/me/status")
            .cookie(cookie)
            .set_json(serde_json::json!({ "isOnline": true, "currentGame": "VALORANT" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}

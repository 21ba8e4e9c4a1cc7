//! Tournament participation API handlers.
//!
//! Participation hangs off tournament posts. Unlike every other join table,
//! the participant relation carries a composite unique constraint, so a
//! duplicate join surfaces as a 409 instead of silently inserting again.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::api::state::HttpState;

/// Whether the caller participates in a tournament.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationResponse {
    pub joined: bool,
}

/// Join a tournament. A second join for the same pair fails with a conflict.
#[utoipa::path(
    post,
    path = "/api/v1/tournaments/{postId}/participants",
    params(("postId" = Uuid, Path, description = "Tournament post id")),
    responses(
        (status = 204, description = "Joined"),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 409, description = "Already joined", body = ApiError)
    ),
    tags = ["tournaments"],
    operation_id = "joinTournament"
)]
#[post("/tournaments/{post_id}/participants")]
pub async fn join_tournament(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.storage().join_tournament(*path, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Leave a tournament.
#[utoipa::path(
    delete,
    path = "/api/v1/tournaments/{postId}/participants",
    params(("postId" = Uuid, Path, description = "Tournament post id")),
    responses(
        (status = 204, description = "Left"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["tournaments"],
    operation_id = "leaveTournament"
)]
#[delete("/tournaments/{post_id}/participants")]
pub async fn leave_tournament(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.storage().leave_tournament(*path, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Whether the caller has a participant row for the tournament.
#[utoipa::path(
    get,
    path = "/api/v1/tournaments/{postId}/participants/me",
    params(("postId" = Uuid, Path, description = "Tournament post id")),
    responses(
        (status = 200, description = "Participation state", body = ParticipationResponse),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["tournaments"],
    operation_id = "tournamentParticipation"
)]
#[get("/tournaments/{post_id}/participants/me")]
pub async fn participation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ParticipationResponse>> {
    let user_id = session.require_user_id()?;
    let joined = state
        .storage()
        .is_tournament_participant(*path, user_id)
        .await?;
    Ok(web::Json(ParticipationResponse { joined }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_utils::{authenticate, session_seed_route, test_session_middleware};
    use crate::domain::StorageError;
    use crate::domain::ports::MockStorage;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use std::sync::Arc;

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
            .service(join_tournament)
            .service(leave_tournament)
            .service(participation)
    }

    #[actix_web::test]
    async fn duplicate_join_surfaces_as_conflict() {
        let mut storage = MockStorage::new();
        storage
            .expect_join_tournament()
            .times(2)
            .returning({
                let mut calls = 0;
                move |_, _| {
                    calls += 1;
                    if calls == 1 {
                        Ok(())
                    } else {
                        Err(StorageError::conflict(
                            "duplicate key value violates unique constraint",
                        ))
                    }
                }
            });

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;
        let post_id = Uuid::new_v4();

        let first = test::TestRequest::post()
            .uri(&format!("/tournaments/{post_id}/participants"))
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(
            test::call_service(&app, first).await.status(),
            StatusCode::NO_CONTENT
        );

        let second = test::TestRequest::post()
            .uri(&format!("/tournaments/{post_id}/participants"))
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, second).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "conflict");
    }

    #[actix_web::test]
    async fn participation_round_trips() {
        let mut storage = MockStorage::new();
        storage
            .expect_is_tournament_participant()
            .returning(|_, _| Ok(true));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/tournaments/{}/participants/me", Uuid::new_v4()))
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: ParticipationResponse = test::read_body_json(res).await;
        assert!(body.joined);
    }
}

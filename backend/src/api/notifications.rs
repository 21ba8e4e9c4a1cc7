//! Notification API handlers.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::api::state::HttpState;
use crate::domain::Notification;

/// Unread-notification badge count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// The caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Notifications", body = [Notification]),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Notification>>> {
    let user_id = session.require_user_id()?;
    let notifications = state.storage().user_notifications(user_id).await?;
    Ok(web::Json(notifications))
}

/// Flag one notification as read.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[post("/notifications/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    state.storage().mark_notification_read(*path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Unread badge count for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 401, description = "Unauthorised", body = ApiError)
    ),
    tags = ["notifications"],
    operation_id = "unreadNotificationCount"
)]
#[get("/notifications/unread-count")]
pub async fn unread_count(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UnreadCountResponse>> {
    let user_id = session.require_user_id()?;
    let count = state.storage().unread_notification_count(user_id).await?;
    Ok(web::Json(UnreadCountResponse { count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_utils::{authenticate, session_seed_route, test_session_middleware};
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
            .service(list_notifications)
            .service(mark_read)
            .service(unread_count)
    }

    #[actix_web::test]
    async fn unread_count_round_trips() {
        let caller = Uuid::new_v4();
        let mut storage = MockStorage::new();
        storage
            .expect_unread_notification_count()
            .withf(move |id| *id == caller)
            .times(1)
            .returning(|_| Ok(7));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, caller).await;

        let req = test::TestRequest::get()
            .uri("/notifications/unread-count")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: UnreadCountResponse = test::read_body_json(res).await;
        assert_eq!(body.count, 7);
    }

    #[actix_web::test]
    async fn mark_read_reaches_storage() {
        let notification_id = Uuid::new_v4();
        let mut storage = MockStorage::new();
        storage
            .expect_mark_notification_read()
            .withf(move |id| *id == notification_id)
            .times(1)
            .returning(|_| Ok(()));

        let app = test::init_service(test_app(storage)).await;
        let cookie = authenticate(&app, Uuid::new_v4()).await;

        let req = test::TestRequest::post()
            .uri(&format!("/notifications/{notification_id}/read"))
            .cookie(cookie)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );
    }
}

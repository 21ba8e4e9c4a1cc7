//! Shared fixtures for handler tests.

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::{HttpResponse, Resource, dev, web};
use uuid::Uuid;

use super::session::SessionContext;

/// Cookie-session middleware with an ephemeral key and relaxed transport
/// requirements so tests can run over plain HTTP.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build()
}

/// Backdoor route that seeds an authenticated session for tests.
pub(crate) fn session_seed_route() -> Resource {
    web::resource("/__seed-session/{id}").route(web::get().to(
        |session: SessionContext, path: web::Path<Uuid>| async move {
            session.persist_user(*path).expect("seed session");
            HttpResponse::Ok().finish()
        },
    ))
}

/// Authenticate against the seed route and return the session cookie.
pub(crate) async fn authenticate<S>(app: &S, user_id: Uuid) -> Cookie<'static>
where
    S: dev::Service<
            actix_http::Request,
            Response = dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = actix_web::test::TestRequest::get()
        .uri(&format!("/__seed-session/{user_id}"))
        .to_request();
    let res = actix_web::test::call_service(app, req).await;
    assert!(res.status().is_success(), "session seeding failed");
    res.response()
        .cookies()
        .next()
        .expect("session cookie present")
        .into_owned()
}

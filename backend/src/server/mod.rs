//! Server construction and middleware wiring.

mod config;

pub use config::AppConfig;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use tracing::info;

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::api::health::{self, HealthState};
use crate::api::{HttpState, communities, friends, games, library, notifications, posts, tournaments, users};
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::middleware::Trace;

/// Everything the HTTP server needs to start.
pub struct ServerConfig {
    pub key: Key,
    pub cookie_secure: bool,
    pub bind_addr: std::net::SocketAddr,
    pub state: HttpState,
}

/// Register every `/api/v1` handler.
fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::update_profile)
        .service(users::update_status)
        .service(users::search_users)
        .service(games::list_games)
        .service(games::create_game)
        .service(games::search_games)
        .service(games::get_game)
        .service(games::game_communities)
        .service(communities::list_communities)
        .service(communities::create_community)
        .service(communities::get_community)
        .service(communities::community_posts)
        .service(communities::join_community)
        .service(communities::leave_community)
        .service(communities::my_communities)
        .service(posts::list_posts)
        .service(posts::community_feed)
        .service(posts::create_post)
        .service(posts::get_post)
        .service(posts::delete_post)
        .service(posts::like_post)
        .service(posts::unlike_post)
        .service(posts::post_liked)
        .service(posts::list_comments)
        .service(posts::create_comment)
        .service(posts::user_posts)
        .service(friends::list_friends)
        .service(friends::online_friends)
        .service(friends::list_requests)
        .service(friends::send_request)
        .service(friends::accept_request)
        .service(friends::reject_request)
        .service(friends::friendship_status)
        .service(library::my_games)
        .service(library::add_game)
        .service(library::remove_game)
        .service(notifications::list_notifications)
        .service(notifications::mark_read)
        .service(notifications::unread_count)
        .service(tournaments::join_tournament)
        .service(tournaments::leave_tournament)
        .service(tournaments::participation);
}

/// Bind and run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        state,
    } = config;

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(web::scope("/api/v1").wrap(session).configure(api_services))
            .service(health::ready)
            .service(health::live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    info!(%bind_addr, "listening");
    server.run().await
}

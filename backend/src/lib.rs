//! Social backend for gamers: a feed of posts, friendships, communities,
//! game-library tracking, tournament participation, and clip sharing over a
//! PostgreSQL relational store.

pub mod api;
pub mod doc;
pub mod domain;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Trace;

//! Inbound HTTP adapters: one handler module per resource, a shared error
//! envelope, and session plumbing.

pub mod communities;
pub mod error;
pub mod friends;
pub mod games;
pub mod health;
pub mod library;
pub mod notifications;
pub mod posts;
pub mod session;
pub mod state;
pub mod tournaments;
pub mod users;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{ApiError, ApiResult};
pub use session::SessionContext;
pub use state::HttpState;

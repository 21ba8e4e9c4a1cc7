//! Domain entities, validation, and the storage port.
//!
//! Types here are transport agnostic: HTTP adapters serialize them, the
//! persistence adapter converts them to and from row structs, and neither
//! direction leaks framework concerns into this module.

mod comment;
mod community;
mod error;
mod friendship;
mod game;
mod library;
mod notification;
mod post;
pub mod ports;
mod user;

pub use comment::{CommentWithAuthor, NewComment, PostComment};
pub use community::{Community, NewCommunity};
pub use error::{Error, ErrorCode, ErrorValidationError};
pub use friendship::{Friendship, FriendshipStatus, PendingFriendRequest};
pub use game::{Game, NewGame};
pub use library::{LibraryEntry, LibraryEntryWithGame, NewLibraryEntry};
pub use notification::{NewNotification, Notification, NotificationKind};
pub use post::{
    AchievementMetadata, ClipMetadata, FeedPost, NewPost, Post, PostKind, PostMetadata,
    PostValidationError, TournamentMetadata, TournamentStatus, ValidatedPost,
};
pub use ports::{Storage, StorageError};
pub use user::{OnlineStatus, ProfileUpdate, UpsertUser, User};

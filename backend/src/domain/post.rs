//! Post entity, post-kind discriminator, and the typed metadata payloads.
//!
//! The wire format keeps `postType` and `metadata` as separate fields; the
//! domain pairs them back up as a tagged variant so malformed payloads are
//! rejected at the write boundary instead of surfacing as broken cards in a
//! client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Community, Game, User};

/// Discriminator for the shape of a post's metadata payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Text,
    Image,
    Video,
    Achievement,
    Tournament,
}

impl PostKind {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Achievement => "achievement",
            Self::Tournament => "tournament",
        }
    }

    /// Parse the storage representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "achievement" => Some(Self::Achievement),
            "tournament" => Some(Self::Tournament),
            _ => None,
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a tournament post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Open,
    Live,
    Finished,
}

/// Structured payload of a video clip post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClipMetadata {
    pub clip_title: String,
    pub platform: Option<String>,
    pub embed_url: Option<String>,
    pub thumbnail: Option<String>,
}

/// Structured payload of an achievement post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AchievementMetadata {
    pub title: String,
    pub description: Option<String>,
    pub xp: i32,
}

/// Structured payload of a tournament post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentMetadata {
    pub tournament_name: String,
    pub max_players: i32,
    #[serde(default)]
    pub entry_fee: i32,
    #[serde(default)]
    pub prize_pool: i32,
    pub status: TournamentStatus,
}

/// Metadata payload paired with its [`PostKind`].
///
/// `Plain` covers text and image posts, which carry no structured payload
/// beyond `media_urls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PostMetadata {
    Clip(ClipMetadata),
    Achievement(AchievementMetadata),
    Tournament(TournamentMetadata),
    Plain,
}

/// Rejections raised while validating a post at the write boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    #[error("post content must not be empty")]
    EmptyContent,
    #[error("{kind} posts require a metadata payload")]
    MissingMetadata { kind: PostKind },
    #[error("{kind} posts do not accept a metadata payload")]
    UnexpectedMetadata { kind: PostKind },
    #[error("invalid {kind} metadata: {message}")]
    InvalidMetadata { kind: PostKind, message: String },
}

impl PostMetadata {
    /// Validate a raw jsonb payload against the declared post kind.
    pub fn validate(kind: PostKind, payload: Option<&Value>) -> Result<Self, PostValidationError> {
        match (kind, payload) {
            (PostKind::Text | PostKind::Image, None) => Ok(Self::Plain),
            (PostKind::Text | PostKind::Image, Some(_)) => {
                Err(PostValidationError::UnexpectedMetadata { kind })
            }
            // The clip composer always sends a payload, but plain video posts
            // from the feed composer legitimately omit one.
            (PostKind::Video, None) => Ok(Self::Plain),
            (PostKind::Video, Some(raw)) => {
                let clip: ClipMetadata = decode(kind, raw)?;
                if clip.clip_title.trim().is_empty() {
                    return Err(invalid(kind, "clipTitle must not be empty"));
                }
                Ok(Self::Clip(clip))
            }
            (PostKind::Achievement, None) => Err(PostValidationError::MissingMetadata { kind }),
            (PostKind::Achievement, Some(raw)) => {
                let achievement: AchievementMetadata = decode(kind, raw)?;
                if achievement.title.trim().is_empty() {
                    return Err(invalid(kind, "title must not be empty"));
                }
                if achievement.xp < 0 {
                    return Err(invalid(kind, "xp must not be negative"));
                }
                Ok(Self::Achievement(achievement))
            }
            (PostKind::Tournament, None) => Err(PostValidationError::MissingMetadata { kind }),
            (PostKind::Tournament, Some(raw)) => {
                let tournament: TournamentMetadata = decode(kind, raw)?;
                if tournament.tournament_name.trim().is_empty() {
                    return Err(invalid(kind, "tournamentName must not be empty"));
                }
                if tournament.max_players < 2 {
                    return Err(invalid(kind, "maxPlayers must be at least 2"));
                }
                Ok(Self::Tournament(tournament))
            }
        }
    }

    /// Serialize back into the jsonb column representation; `None` for plain
    /// posts.
    pub fn to_payload(&self) -> Option<Value> {
        match self {
            Self::Plain => None,
            Self::Clip(clip) => serde_json::to_value(clip).ok(),
            Self::Achievement(achievement) => serde_json::to_value(achievement).ok(),
            Self::Tournament(tournament) => serde_json::to_value(tournament).ok(),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    kind: PostKind,
    raw: &Value,
) -> Result<T, PostValidationError> {
    serde_json::from_value(raw.clone()).map_err(|err| PostValidationError::InvalidMetadata {
        kind,
        message: err.to_string(),
    })
}

fn invalid(kind: PostKind, message: &str) -> PostValidationError {
    PostValidationError::InvalidMetadata {
        kind,
        message: message.into(),
    }
}

/// A feed post.
///
/// Flattened into [`FeedPost`], so unknown-field rejection is left to the
/// enclosing payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: Option<Uuid>,
    pub game_id: Option<Uuid>,
    pub content: String,
    pub media_urls: Vec<String>,
    pub post_type: PostKind,
    pub metadata: PostMetadata,
    pub likes_count: i32,
    pub comments_count: i32,
    pub shares_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Creation payload; `metadata` arrives raw and is validated against
/// `post_type` before anything touches storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub community_id: Option<Uuid>,
    pub game_id: Option<Uuid>,
    pub content: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub post_type: PostKind,
    pub metadata: Option<Value>,
}

/// A post validated and ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPost {
    pub user_id: Uuid,
    pub community_id: Option<Uuid>,
    pub game_id: Option<Uuid>,
    pub content: String,
    pub media_urls: Vec<String>,
    pub post_type: PostKind,
    pub metadata: PostMetadata,
}

impl ValidatedPost {
    /// Validate a creation payload on behalf of `user_id`.
    pub fn from_request(user_id: Uuid, request: NewPost) -> Result<Self, PostValidationError> {
        if request.content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }
        let metadata = PostMetadata::validate(request.post_type, request.metadata.as_ref())?;
        Ok(Self {
            user_id,
            community_id: request.community_id,
            game_id: request.game_id,
            content: request.content,
            media_urls: request.media_urls,
            post_type: request.post_type,
            metadata,
        })
    }
}

/// A post joined with its author and the optional game and community tags,
/// as served to the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    pub user: User,
    pub game: Option<Game>,
    pub community: Option<Community>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("text", Some(PostKind::Text))]
    #[case("tournament", Some(PostKind::Tournament))]
    #[case("poll", None)]
    fn kind_parse_round_trip(#[case] raw: &str, #[case] expected: Option<PostKind>) {
        assert_eq!(PostKind::parse(raw), expected);
        if let Some(kind) = expected {
            assert_eq!(kind.as_str(), raw);
        }
    }

    #[rstest]
    fn plain_posts_reject_payloads() {
        let err = PostMetadata::validate(PostKind::Text, Some(&json!({"x": 1})))
            .expect_err("text posts carry no metadata");
        assert_eq!(
            err,
            PostValidationError::UnexpectedMetadata {
                kind: PostKind::Text
            }
        );
    }

    #[rstest]
    fn achievement_requires_payload() {
        let err = PostMetadata::validate(PostKind::Achievement, None).expect_err("must fail");
        assert_eq!(
            err,
            PostValidationError::MissingMetadata {
                kind: PostKind::Achievement
            }
        );
    }

    #[rstest]
    #[case(json!({"title": "", "xp": 100}), "title must not be empty")]
    #[case(json!({"title": "Ace", "xp": -5}), "xp must not be negative")]
    #[case(json!({"xp": 100}), "missing field")]
    fn achievement_payload_validation(#[case] payload: Value, #[case] fragment: &str) {
        let err = PostMetadata::validate(PostKind::Achievement, Some(&payload))
            .expect_err("invalid payload must fail");
        assert!(
            err.to_string().contains(fragment),
            "unexpected error: {err}"
        );
    }

    #[rstest]
    fn tournament_payload_round_trips() {
        let payload = json!({
            "tournamentName": "Friday Clash",
            "maxPlayers": 16,
            "entryFee": 0,
            "prizePool": 500,
            "status": "open"
        });
        let metadata = PostMetadata::validate(PostKind::Tournament, Some(&payload))
            .expect("valid tournament payload");
        assert_eq!(metadata.to_payload(), Some(payload));
    }

    #[rstest]
    fn tournament_rejects_tiny_brackets() {
        let payload = json!({
            "tournamentName": "Solo",
            "maxPlayers": 1,
            "status": "open"
        });
        let err = PostMetadata::validate(PostKind::Tournament, Some(&payload))
            .expect_err("single-player brackets are invalid");
        assert!(err.to_string().contains("maxPlayers"));
    }

    #[rstest]
    fn video_without_payload_is_plain() {
        assert_eq!(
            PostMetadata::validate(PostKind::Video, None).expect("plain video"),
            PostMetadata::Plain
        );
    }

    #[rstest]
    fn validated_post_rejects_blank_content() {
        let request = NewPost {
            community_id: None,
            game_id: None,
            content: "   ".into(),
            media_urls: vec![],
            post_type: PostKind::Text,
            metadata: None,
        };
        let err = ValidatedPost::from_request(Uuid::new_v4(), request).expect_err("must fail");
        assert_eq!(err, PostValidationError::EmptyContent);
    }
}

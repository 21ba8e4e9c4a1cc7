//! PostgreSQL-backed [`Storage`] implementation using Diesel ORM.
//!
//! This adapter is deliberately thin: every method translates one storage
//! operation into Diesel statements and converts rows through the validated
//! domain constructors. Counter-bearing writes (likes, comments, community
//! membership) run their row mutation and counter adjustment inside a single
//! transaction so the denormalized aggregates cannot drift within one
//! operation. Nothing here deduplicates repeated likes, joins, or friend
//! requests; the schema's only duplicate guard is the tournament-participant
//! unique constraint.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{Storage, StorageError};
use crate::domain::{
    CommentWithAuthor, Community, FeedPost, Friendship, FriendshipStatus, Game, LibraryEntry,
    LibraryEntryWithGame, NewComment, NewCommunity, NewGame, NewLibraryEntry, NewNotification,
    Notification, NotificationKind, OnlineStatus, PendingFriendRequest, Post, PostComment,
    PostKind, PostMetadata, ProfileUpdate, UpsertUser, User, ValidatedPost,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    CommunityRow, FriendshipRow, GameRow, NewCommunityMemberRow, NewCommunityRow,
    NewFriendshipRow, NewGameRow, NewNotificationRow, NewPostCommentRow, NewPostLikeRow,
    NewPostRow, NewTournamentParticipantRow, NewUserGameRow, NewUserRow, NotificationRow,
    PostCommentRow, PostRow, UserGameRow, UserProfileChangeset, UserRow,
};
use super::pool::DbPool;
use super::schema::{
    communities, community_members, friendships, games, notifications, post_comments, post_likes,
    posts, tournament_participants, user_games, users,
};

/// Diesel-backed implementation of the storage façade.
#[derive(Clone)]
pub struct DieselStorage {
    pool: DbPool,
}

impl DieselStorage {
    /// Create a new storage adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// --- row conversions -------------------------------------------------------

fn row_to_user(row: UserRow) -> User {
    User {
        id: row.id,
        username: row.username,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        profile_image_url: row.profile_image_url,
        bio: row.bio,
        xp_points: row.xp_points,
        level: row.level,
        gaming_platforms: row.gaming_platforms,
        twitch_username: row.twitch_username,
        youtube_username: row.youtube_username,
        discord_username: row.discord_username,
        is_online: row.is_online,
        current_game: row.current_game,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn row_to_game(row: GameRow) -> Game {
    Game {
        id: row.id,
        name: row.name,
        genre: row.genre,
        platform: row.platform,
        cover_image_url: row.cover_image_url,
        description: row.description,
        is_active: row.is_active,
        created_at: row.created_at,
    }
}

fn row_to_community(row: CommunityRow) -> Community {
    Community {
        id: row.id,
        game_id: row.game_id,
        name: row.name,
        description: row.description,
        admin_user_id: row.admin_user_id,
        member_count: row.member_count,
        image_url: row.image_url,
        is_private: row.is_private,
        created_at: row.created_at,
    }
}

/// Convert a post row, re-validating the discriminated metadata payload so
/// corrupt rows surface as query errors instead of broken feed entries.
fn row_to_post(row: PostRow) -> Result<Post, StorageError> {
    let post_type = PostKind::parse(&row.post_type)
        .ok_or_else(|| StorageError::query(format!("unknown post type: {}", row.post_type)))?;
    let metadata = PostMetadata::validate(post_type, row.metadata.as_ref())
        .map_err(|err| StorageError::query(format!("decode post metadata: {err}")))?;
    Ok(Post {
        id: row.id,
        user_id: row.user_id,
        community_id: row.community_id,
        game_id: row.game_id,
        content: row.content,
        media_urls: row.media_urls,
        post_type,
        metadata,
        likes_count: row.likes_count,
        comments_count: row.comments_count,
        shares_count: row.shares_count,
        created_at: row.created_at,
    })
}

fn row_to_friendship(row: FriendshipRow) -> Result<Friendship, StorageError> {
    let status = FriendshipStatus::parse(&row.status)
        .ok_or_else(|| StorageError::query(format!("unknown friendship status: {}", row.status)))?;
    Ok(Friendship {
        id: row.id,
        requester_id: row.requester_id,
        addressee_id: row.addressee_id,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_comment(row: PostCommentRow) -> PostComment {
    PostComment {
        id: row.id,
        post_id: row.post_id,
        user_id: row.user_id,
        content: row.content,
        created_at: row.created_at,
    }
}

fn row_to_library_entry(row: UserGameRow) -> LibraryEntry {
    LibraryEntry {
        id: row.id,
        user_id: row.user_id,
        game_id: row.game_id,
        achievements: row.achievements,
        hours_played: row.hours_played,
        is_favorite: row.is_favorite,
        added_at: row.added_at,
    }
}

fn row_to_notification(row: NotificationRow) -> Result<Notification, StorageError> {
    let kind = NotificationKind::parse(&row.kind)
        .ok_or_else(|| StorageError::query(format!("unknown notification kind: {}", row.kind)))?;
    Ok(Notification {
        id: row.id,
        user_id: row.user_id,
        kind,
        title: row.title,
        message: row.message,
        data: row.data,
        is_read: row.is_read,
        created_at: row.created_at,
    })
}

#[async_trait]
impl Storage for DieselStorage {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(id)
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn upsert_user(&self, user: UpsertUser) -> Result<User, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image_url: user.profile_image_url,
        };
        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::username)
            .do_update()
            .set((
                users::email.eq(excluded(users::email)),
                users::first_name.eq(excluded(users::first_name)),
                users::last_name.eq(excluded(users::last_name)),
                users::profile_image_url.eq(excluded(users::profile_image_url)),
                users::updated_at.eq(Utc::now()),
            ))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_user(row))
    }

    async fn update_user_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = UserProfileChangeset {
            first_name: update.first_name,
            last_name: update.last_name,
            profile_image_url: update.profile_image_url,
            bio: update.bio,
            xp_points: update.xp_points,
            level: update.level,
            gaming_platforms: update.gaming_platforms,
            twitch_username: update.twitch_username,
            youtube_username: update.youtube_username,
            discord_username: update.discord_username,
            updated_at: Utc::now(),
        };
        let row = diesel::update(users::table.find(id))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_user(row))
    }

    async fn update_online_status(
        &self,
        id: Uuid,
        status: OnlineStatus,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(users::table.find(id))
            .set((
                users::is_online.eq(status.is_online),
                users::current_game.eq(status.current_game),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = format!("%{query}%");
        let rows = users::table
            .filter(users::username.ilike(pattern.clone()))
            .or_filter(users::first_name.ilike(pattern.clone()))
            .or_filter(users::last_name.ilike(pattern))
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn all_games(&self) -> Result<Vec<Game>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = games::table
            .filter(games::is_active.eq(true))
            .order_by(games::name.desc())
            .select(GameRow::as_select())
            .load::<GameRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_game).collect())
    }

    async fn get_game(&self, id: Uuid) -> Result<Option<Game>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = games::table
            .find(id)
            .select(GameRow::as_select())
            .first::<GameRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_game))
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewGameRow {
            name: game.name,
            genre: game.genre,
            platform: game.platform,
            cover_image_url: game.cover_image_url,
            description: game.description,
        };
        let row = diesel::insert_into(games::table)
            .values(&new_row)
            .returning(GameRow::as_returning())
            .get_result::<GameRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_game(row))
    }

    async fn search_games(&self, query: &str) -> Result<Vec<Game>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = format!("%{query}%");
        let rows = games::table
            .filter(games::is_active.eq(true))
            .filter(games::name.ilike(pattern))
            .select(GameRow::as_select())
            .load::<GameRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_game).collect())
    }

    async fn all_communities(&self) -> Result<Vec<Community>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = communities::table
            .order_by(communities::member_count.desc())
            .select(CommunityRow::as_select())
            .load::<CommunityRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_community).collect())
    }

    async fn get_community(&self, id: Uuid) -> Result<Option<Community>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = communities::table
            .find(id)
            .select(CommunityRow::as_select())
            .first::<CommunityRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_community))
    }

    async fn create_community(
        &self,
        admin_user_id: Uuid,
        community: NewCommunity,
    ) -> Result<Community, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCommunityRow {
            game_id: community.game_id,
            name: community.name,
            description: community.description,
            admin_user_id,
            image_url: community.image_url,
            is_private: community.is_private,
        };
        let row = diesel::insert_into(communities::table)
            .values(&new_row)
            .returning(CommunityRow::as_returning())
            .get_result::<CommunityRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_community(row))
    }

    async fn communities_by_game(&self, game_id: Uuid) -> Result<Vec<Community>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = communities::table
            .filter(communities::game_id.eq(game_id))
            .order_by(communities::member_count.desc())
            .select(CommunityRow::as_select())
            .load::<CommunityRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_community).collect())
    }

    async fn join_community(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(community_members::table)
                    .values(NewCommunityMemberRow {
                        community_id,
                        user_id,
                    })
                    .execute(conn)
                    .await?;
                diesel::update(communities::table.find(community_id))
                    .set(communities::member_count.eq(communities::member_count + 1))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn leave_community(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::delete(
                    community_members::table
                        .filter(community_members::community_id.eq(community_id))
                        .filter(community_members::user_id.eq(user_id)),
                )
                .execute(conn)
                .await?;
                diesel::update(communities::table.find(community_id))
                    .set(communities::member_count.eq(communities::member_count - 1))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn user_communities(&self, user_id: Uuid) -> Result<Vec<Community>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = communities::table
            .inner_join(community_members::table)
            .filter(community_members::user_id.eq(user_id))
            .select(CommunityRow::as_select())
            .load::<CommunityRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_community).collect())
    }

    async fn all_posts(&self) -> Result<Vec<FeedPost>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = posts::table
            .inner_join(users::table)
            .left_join(games::table)
            .left_join(communities::table)
            .order_by(posts::created_at.desc())
            .select((
                PostRow::as_select(),
                UserRow::as_select(),
                Option::<GameRow>::as_select(),
                Option::<CommunityRow>::as_select(),
            ))
            .load::<(PostRow, UserRow, Option<GameRow>, Option<CommunityRow>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(post, user, game, community)| {
                Ok(FeedPost {
                    post: row_to_post(post)?,
                    user: row_to_user(user),
                    game: game.map(row_to_game),
                    community: community.map(row_to_community),
                })
            })
            .collect()
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = posts::table
            .find(id)
            .select(PostRow::as_select())
            .first::<PostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_post).transpose()
    }

    async fn create_post(&self, post: ValidatedPost) -> Result<Post, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPostRow {
            user_id: post.user_id,
            community_id: post.community_id,
            game_id: post.game_id,
            content: post.content,
            media_urls: post.media_urls,
            post_type: post.post_type.as_str().to_owned(),
            metadata: post.metadata.to_payload(),
        };
        let row = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_post(row)
    }

    async fn user_posts(&self, user_id: Uuid) -> Result<Vec<Post>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = posts::table
            .filter(posts::user_id.eq(user_id))
            .order_by(posts::created_at.desc())
            .select(PostRow::as_select())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_post).collect()
    }

    async fn community_posts(&self, community_id: Uuid) -> Result<Vec<Post>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = posts::table
            .filter(posts::community_id.eq(community_id))
            .order_by(posts::created_at.desc())
            .select(PostRow::as_select())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_post).collect()
    }

    async fn community_feed(&self, user_id: Uuid) -> Result<Vec<Post>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = posts::table
            .inner_join(
                community_members::table
                    .on(posts::community_id.eq(community_members::community_id.nullable())),
            )
            .filter(community_members::user_id.eq(user_id))
            .order_by(posts::created_at.desc())
            .select(PostRow::as_select())
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_post).collect()
    }

    async fn delete_post(&self, id: Uuid, user_id: Uuid) -> Result<bool, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            posts::table
                .filter(posts::id.eq(id))
                .filter(posts::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(post_likes::table)
                    .values(NewPostLikeRow { post_id, user_id })
                    .execute(conn)
                    .await?;
                diesel::update(posts::table.find(post_id))
                    .set(posts::likes_count.eq(posts::likes_count + 1))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn unlike_post(&self, post_id: Uuid, user_id: Uuid) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::delete(
                    post_likes::table
                        .filter(post_likes::post_id.eq(post_id))
                        .filter(post_likes::user_id.eq(user_id)),
                )
                .execute(conn)
                .await?;
                diesel::update(posts::table.find(post_id))
                    .set(posts::likes_count.eq(posts::likes_count - 1))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn is_post_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = post_likes::table
            .filter(post_likes::post_id.eq(post_id))
            .filter(post_likes::user_id.eq(user_id))
            .select(post_likes::id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.is_some())
    }

    async fn post_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = post_comments::table
            .inner_join(users::table)
            .filter(post_comments::post_id.eq(post_id))
            .order_by(post_comments::created_at.desc())
            .select((PostCommentRow::as_select(), UserRow::as_select()))
            .load::<(PostCommentRow, UserRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(comment, user)| CommentWithAuthor {
                comment: row_to_comment(comment),
                user: row_to_user(user),
            })
            .collect())
    }

    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        comment: NewComment,
    ) -> Result<PostComment, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPostCommentRow {
            post_id,
            user_id,
            content: comment.content,
        };
        let row = conn
            .transaction(|conn| {
                async move {
                    let row = diesel::insert_into(post_comments::table)
                        .values(&new_row)
                        .returning(PostCommentRow::as_returning())
                        .get_result::<PostCommentRow>(conn)
                        .await?;
                    diesel::update(posts::table.find(post_id))
                        .set(posts::comments_count.eq(posts::comments_count + 1))
                        .execute(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_comment(row))
    }

    async fn friends(&self, user_id: Uuid) -> Result<Vec<User>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = users::table
            .inner_join(
                friendships::table.on(friendships::requester_id
                    .eq(user_id)
                    .and(friendships::addressee_id.eq(users::id))
                    .or(friendships::addressee_id
                        .eq(user_id)
                        .and(friendships::requester_id.eq(users::id)))),
            )
            .filter(friendships::status.eq(FriendshipStatus::Accepted.as_str()))
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn online_friends(&self, user_id: Uuid) -> Result<Vec<User>, StorageError> {
        // Mirrors the read path of `friends` and narrows in memory; the
        // presence flag is too volatile to be worth a second query shape.
        let friends = self.friends(user_id).await?;
        Ok(friends.into_iter().filter(|user| user.is_online).collect())
    }

    async fn send_friend_request(
        &self,
        requester_id: Uuid,
        addressee_id: Uuid,
    ) -> Result<Friendship, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(friendships::table)
            .values(NewFriendshipRow {
                requester_id,
                addressee_id,
                status: FriendshipStatus::Pending.as_str().to_owned(),
            })
            .returning(FriendshipRow::as_returning())
            .get_result::<FriendshipRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_friendship(row)
    }

    async fn accept_friend_request(&self, friendship_id: Uuid) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(friendships::table.find(friendship_id))
            .set((
                friendships::status.eq(FriendshipStatus::Accepted.as_str()),
                friendships::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn reject_friend_request(&self, friendship_id: Uuid) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(friendships::table.find(friendship_id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn friend_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PendingFriendRequest>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = friendships::table
            .inner_join(users::table.on(users::id.eq(friendships::requester_id)))
            .filter(friendships::addressee_id.eq(user_id))
            .filter(friendships::status.eq(FriendshipStatus::Pending.as_str()))
            .select((FriendshipRow::as_select(), UserRow::as_select()))
            .load::<(FriendshipRow, UserRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(friendship, requester)| {
                Ok(PendingFriendRequest {
                    friendship: row_to_friendship(friendship)?,
                    requester: row_to_user(requester),
                })
            })
            .collect()
    }

    async fn friendship_status(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Option<FriendshipStatus>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw = friendships::table
            .filter(
                friendships::requester_id
                    .eq(user_a)
                    .and(friendships::addressee_id.eq(user_b)),
            )
            .or_filter(
                friendships::requester_id
                    .eq(user_b)
                    .and(friendships::addressee_id.eq(user_a)),
            )
            .select(friendships::status)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        raw.map(|status| {
            FriendshipStatus::parse(&status)
                .ok_or_else(|| StorageError::query(format!("unknown friendship status: {status}")))
        })
        .transpose()
    }

    async fn user_games(&self, user_id: Uuid) -> Result<Vec<LibraryEntryWithGame>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = user_games::table
            .inner_join(games::table)
            .filter(user_games::user_id.eq(user_id))
            .order_by(user_games::added_at.desc())
            .select((UserGameRow::as_select(), GameRow::as_select()))
            .load::<(UserGameRow, GameRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(entry, game)| LibraryEntryWithGame {
                entry: row_to_library_entry(entry),
                game: row_to_game(game),
            })
            .collect())
    }

    async fn add_game_to_library(
        &self,
        user_id: Uuid,
        entry: NewLibraryEntry,
    ) -> Result<LibraryEntry, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserGameRow {
            user_id,
            game_id: entry.game_id,
            achievements: entry.achievements,
            hours_played: entry.hours_played,
            is_favorite: entry.is_favorite,
        };
        let row = diesel::insert_into(user_games::table)
            .values(&new_row)
            .returning(UserGameRow::as_returning())
            .get_result::<UserGameRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_library_entry(row))
    }

    async fn remove_game_from_library(
        &self,
        user_id: Uuid,
        game_id: Uuid,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            user_games::table
                .filter(user_games::user_id.eq(user_id))
                .filter(user_games::game_id.eq(game_id)),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn user_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .order_by(notifications::created_at.desc())
            .select(NotificationRow::as_select())
            .load::<NotificationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_notification).collect()
    }

    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewNotificationRow {
            user_id: notification.user_id,
            kind: notification.kind.as_str().to_owned(),
            title: notification.title,
            message: notification.message,
            data: notification.data,
        };
        let row = diesel::insert_into(notifications::table)
            .values(&new_row)
            .returning(NotificationRow::as_returning())
            .get_result::<NotificationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_notification(row)
    }

    async fn mark_notification_read(&self, id: Uuid) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(notifications::table.find(id))
            .set(notifications::is_read.eq(true))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn join_tournament(
        &self,
        tournament_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(tournament_participants::table)
            .values(NewTournamentParticipantRow {
                tournament_id,
                user_id,
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn leave_tournament(
        &self,
        tournament_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            tournament_participants::table
                .filter(tournament_participants::tournament_id.eq(tournament_id))
                .filter(tournament_participants::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn is_tournament_participant(
        &self,
        tournament_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, StorageError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count = tournament_participants::table
            .filter(tournament_participants::tournament_id.eq(tournament_id))
            .filter(tournament_participants::user_id.eq(user_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion edge cases; query execution is covered by the handler
    //! tests against the mocked façade.

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn post_row() -> PostRow {
        PostRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            community_id: None,
            game_id: None,
            content: "gg everyone".into(),
            media_urls: vec![],
            post_type: "text".into(),
            metadata: None,
            likes_count: 0,
            comments_count: 0,
            shares_count: 0,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn text_row_converts_to_plain_post(post_row: PostRow) {
        let post = row_to_post(post_row).expect("valid row");
        assert_eq!(post.post_type, PostKind::Text);
        assert_eq!(post.metadata, PostMetadata::Plain);
    }

    #[rstest]
    fn unknown_post_type_is_a_query_error(mut post_row: PostRow) {
        post_row.post_type = "poll".into();
        let err = row_to_post(post_row).expect_err("unknown kind must fail");
        assert!(matches!(err, StorageError::Query { .. }));
        assert!(err.to_string().contains("unknown post type"));
    }

    #[rstest]
    fn corrupt_metadata_is_a_query_error(mut post_row: PostRow) {
        post_row.post_type = "achievement".into();
        post_row.metadata = Some(json!({ "not": "an-achievement" }));
        let err = row_to_post(post_row).expect_err("corrupt payload must fail");
        assert!(matches!(err, StorageError::Query { .. }));
        assert!(err.to_string().contains("decode post metadata"));
    }

    #[rstest]
    fn tournament_row_round_trips(mut post_row: PostRow) {
        post_row.post_type = "tournament".into();
        post_row.metadata = Some(json!({
            "tournamentName": "Friday Clash",
            "maxPlayers": 16,
            "entryFee": 0,
            "prizePool": 0,
            "status": "open"
        }));
        let post = row_to_post(post_row).expect("valid tournament row");
        assert!(matches!(post.metadata, PostMetadata::Tournament(_)));
    }

    #[rstest]
    fn unknown_friendship_status_is_a_query_error() {
        let row = FriendshipRow {
            id: Uuid::new_v4(),
            requester_id: Uuid::new_v4(),
            addressee_id: Uuid::new_v4(),
            status: "declined".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let err = row_to_friendship(row).expect_err("unknown status must fail");
        assert!(err.to_string().contains("unknown friendship status"));
    }

    #[rstest]
    fn unknown_notification_kind_is_a_query_error() {
        let row = NotificationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: "marketing".into(),
            title: "hello".into(),
            message: None,
            data: None,
            is_read: false,
            created_at: Utc::now(),
        };
        let err = row_to_notification(row).expect_err("unknown kind must fail");
        assert!(err.to_string().contains("unknown notification kind"));
    }
}

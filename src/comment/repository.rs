//! Comment persistence.

use tracing::debug;

use super::{Comment, NewComment};
use crate::datetime::now_storage;
use crate::db::Database;
use crate::error::BlogError;
use crate::Result;

const COMMENT_COLUMNS: &str =
    "id, post_id, user_id, author_name, body, image_url, created_at, edited_at";

/// Repository for comments.
#[derive(Clone)]
pub struct CommentRepository {
    db: Database,
}

impl CommentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new comment and return it. A missing post surfaces as not
    /// found via the foreign key.
    pub async fn create(&self, new: &NewComment) -> Result<Comment> {
        let now = now_storage();

        let result = sqlx::query(
            "INSERT INTO comments (post_id, user_id, author_name, body, image_url, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new.post_id)
        .bind(&new.user_id)
        .bind(&new.author_name)
        .bind(&new.body)
        .bind(&new.image_url)
        .bind(&now)
        .execute(self.db.pool())
        .await;

        let result = match result {
            Ok(r) => r,
            Err(e) => {
                if e.as_database_error()
                    .is_some_and(|d| d.is_foreign_key_violation())
                {
                    return Err(BlogError::NotFound("Post".to_string()));
                }
                return Err(e.into());
            }
        };

        let id = result.last_insert_rowid();
        debug!("Created comment {} on post {}", id, new.post_id);

        self.get_by_id(id).await?.ok_or_else(|| {
            BlogError::Database(format!("comment {id} vanished after insert"))
        })
    }

    /// Fetch a comment by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(comment)
    }

    /// List a post's comments, newest first.
    pub async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE post_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(post_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(comments)
    }

    /// Update the body of a comment owned by `owner_id` and stamp
    /// `edited_at`. Returns `None` when no such row exists for that owner.
    pub async fn update(
        &self,
        id: i64,
        owner_id: &str,
        body: &str,
    ) -> Result<Option<Comment>> {
        let now = now_storage();

        let affected = sqlx::query(
            "UPDATE comments SET body = ?, edited_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(body)
        .bind(&now)
        .bind(id)
        .bind(owner_id)
        .execute(self.db.pool())
        .await?
        .rows_affected();

        if affected == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a comment owned by `owner_id`. Returns whether a row was
    /// removed.
    pub async fn delete(&self, id: i64, owner_id: &str) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM comments WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

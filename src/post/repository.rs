//! Post persistence.

use sqlx::QueryBuilder;
use tracing::debug;

use super::query::{day_bounds, like_pattern, FeedPage, FeedQuery, PAGE_SIZE};
use super::{NewPost, Post, PostUpdate};
use crate::datetime::now_storage;
use crate::db::Database;
use crate::Result;

const POST_COLUMNS: &str =
    "id, user_id, title, content, author_name, image_url, created_at, updated_at";

/// Repository for posts.
#[derive(Clone)]
pub struct PostRepository {
    db: Database,
}

impl PostRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new post and return it.
    pub async fn create(&self, new: &NewPost) -> Result<Post> {
        let now = now_storage();

        let result = sqlx::query(
            "INSERT INTO posts (user_id, title, content, author_name, image_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.user_id)
        .bind(&new.title)
        .bind(&new.content)
        .bind(&new.author_name)
        .bind(&new.image_url)
        .bind(&now)
        .bind(&now)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!("Created post {}", id);

        self.get_by_id(id).await?.ok_or_else(|| {
            crate::BlogError::Database(format!("post {id} vanished after insert"))
        })
    }

    /// Fetch a post by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(post)
    }

    /// Update a post owned by `owner_id`. Returns `None` when no such row
    /// exists for that owner. A `None` image leaves the stored image as is.
    pub async fn update(
        &self,
        id: i64,
        owner_id: &str,
        update: &PostUpdate,
    ) -> Result<Option<Post>> {
        let now = now_storage();

        let mut qb: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE posts SET title = ");
        qb.push_bind(&update.title);
        qb.push(", content = ");
        qb.push_bind(&update.content);
        if let Some(image_url) = &update.image_url {
            qb.push(", image_url = ");
            qb.push_bind(image_url);
        }
        qb.push(", updated_at = ");
        qb.push_bind(&now);
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" AND user_id = ");
        qb.push_bind(owner_id);

        let affected = qb.build().execute(self.db.pool()).await?.rows_affected();
        if affected == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post owned by `owner_id`. Returns whether a row was removed.
    pub async fn delete(&self, id: i64, owner_id: &str) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM posts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    /// Fetch one feed page, newest first, with the total match count.
    ///
    /// Owner-scoped queries search only title and content; the public feed
    /// also searches the author name.
    pub async fn search(&self, query: &FeedQuery) -> Result<FeedPage> {
        let mut count_qb: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM posts");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.db.pool())
            .await?;

        let mut qb: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts"));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        qb.push_bind(PAGE_SIZE as i64);
        qb.push(" OFFSET ");
        qb.push_bind(query.offset());

        let posts = qb
            .build_query_as::<Post>()
            .fetch_all(self.db.pool())
            .await?;

        Ok(FeedPage { posts, total })
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, sqlx::Sqlite>, query: &FeedQuery) {
    let mut sep = " WHERE ";

    if let Some(owner_id) = &query.owner_id {
        qb.push(sep);
        qb.push("user_id = ");
        qb.push_bind(owner_id.clone());
        sep = " AND ";
    }

    if let Some(term) = query.search_term() {
        let pattern = like_pattern(term);
        qb.push(sep);
        qb.push("(title LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\' OR content LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" ESCAPE '\\'");
        if query.owner_id.is_none() {
            qb.push(" OR author_name LIKE ");
            qb.push_bind(pattern);
            qb.push(" ESCAPE '\\'");
        }
        qb.push(")");
        sep = " AND ";
    }

    if let Some(date) = query.date {
        let (start, end) = day_bounds(date);
        qb.push(sep);
        qb.push("created_at >= ");
        qb.push_bind(start);
        qb.push(" AND created_at < ");
        qb.push_bind(end);
    }
}

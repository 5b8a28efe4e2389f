//! Database schema and migrations for Blogun.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Users table for the local identity provider
    r#"
-- Users table owned by the local identity provider
CREATE TABLE users (
    id              TEXT PRIMARY KEY,                -- opaque identity id (UUID)
    email           TEXT NOT NULL,
    password        TEXT NOT NULL,                   -- Argon2 hash
    name            TEXT,                            -- profile metadata name
    email_verified  INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE UNIQUE INDEX idx_users_email ON users(email COLLATE NOCASE);
"#,
    // v2: Posts table
    r#"
CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     TEXT NOT NULL REFERENCES users(id),
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    author_name TEXT NOT NULL,                       -- cached display name, not joined
    image_url   TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_posts_user_id ON posts(user_id);
CREATE INDEX idx_posts_created_at ON posts(created_at);
"#,
    // v3: Comments table (user_id nullable: anonymous rows exist historically)
    r#"
CREATE TABLE comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id     INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    user_id     TEXT REFERENCES users(id),
    author_name TEXT,
    body        TEXT NOT NULL,
    image_url   TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    edited_at   TEXT
);

CREATE INDEX idx_comments_post_id ON comments(post_id);
CREATE INDEX idx_comments_created_at ON comments(created_at);
"#,
];

//! Database schema and migrations for Code Museum.
//!
//! Migrations are applied sequentially when the database is opened. The
//! `schema_version` table records which ones have run.

/// Database migrations (SQLite).
#[cfg(feature = "sqlite")]
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- stored verbatim
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: snippets
    r#"
CREATE TABLE snippets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    category    TEXT NOT NULL,           -- free text, the client offers four values
    language    TEXT NOT NULL,
    story       TEXT NOT NULL,
    code        TEXT NOT NULL,
    before_code TEXT,
    tags        TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    author      TEXT NOT NULL,
    user_id     INTEGER REFERENCES users(id),
    views       INTEGER NOT NULL DEFAULT 0,
    likes       INTEGER NOT NULL DEFAULT 0,
    comments    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_snippets_category ON snippets(category);
CREATE INDEX idx_snippets_created_at ON snippets(created_at);
"#,
    // v3: comments
    r#"
CREATE TABLE comments (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    snippet_id    INTEGER NOT NULL REFERENCES snippets(id) ON DELETE CASCADE,
    user_id       INTEGER REFERENCES users(id),
    username      TEXT NOT NULL,
    comment_text  TEXT NOT NULL,
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_comments_snippet_id ON comments(snippet_id);
"#,
];

/// Database migrations (PostgreSQL).
#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          BIGSERIAL PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT TO_CHAR(NOW() AT TIME ZONE 'UTC', 'YYYY-MM-DD HH24:MI:SS')
);
"#,
    // v2: snippets
    r#"
CREATE TABLE snippets (
    id          BIGSERIAL PRIMARY KEY,
    title       TEXT NOT NULL,
    category    TEXT NOT NULL,
    language    TEXT NOT NULL,
    story       TEXT NOT NULL,
    code        TEXT NOT NULL,
    before_code TEXT,
    tags        TEXT NOT NULL DEFAULT '[]',
    author      TEXT NOT NULL,
    user_id     BIGINT REFERENCES users(id),
    views       BIGINT NOT NULL DEFAULT 0,
    likes       BIGINT NOT NULL DEFAULT 0,
    comments    BIGINT NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT TO_CHAR(NOW() AT TIME ZONE 'UTC', 'YYYY-MM-DD HH24:MI:SS')
);

CREATE INDEX idx_snippets_category ON snippets(category);
CREATE INDEX idx_snippets_created_at ON snippets(created_at);
"#,
    // v3: comments
    r#"
CREATE TABLE comments (
    id            BIGSERIAL PRIMARY KEY,
    snippet_id    BIGINT NOT NULL REFERENCES snippets(id) ON DELETE CASCADE,
    user_id       BIGINT REFERENCES users(id),
    username      TEXT NOT NULL,
    comment_text  TEXT NOT NULL,
    created_at    TEXT NOT NULL DEFAULT TO_CHAR(NOW() AT TIME ZONE 'UTC', 'YYYY-MM-DD HH24:MI:SS')
);

CREATE INDEX idx_comments_snippet_id ON comments(snippet_id);
"#,
];

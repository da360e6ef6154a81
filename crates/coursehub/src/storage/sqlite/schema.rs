//! SQLite schema definitions and SQL query constants.

/// SQL statement to create the document table and its indexes.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    body TEXT NOT NULL,
    UNIQUE (collection, id)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_documents_title
    ON documents (collection, json_extract(body, '$.title'));
"#;

pub const INSERT_DOCUMENT: &str =
    "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)";

pub const SELECT_BY_ID: &str =
    "SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2";

/// Parameters: collection, JSON path, value.
pub const SELECT_BY_FIELD: &str = "SELECT id, body FROM documents \
     WHERE collection = ?1 AND json_extract(body, ?2) = ?3 \
     ORDER BY seq LIMIT 1";

pub const SELECT_ALL: &str =
    "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq";

/// Merges a JSON patch into the stored body. Parameters: collection, id, patch.
pub const MERGE_DOCUMENT: &str =
    "UPDATE documents SET body = json_patch(body, ?3) WHERE collection = ?1 AND id = ?2";

pub const DELETE_BY_ID: &str = "DELETE FROM documents WHERE collection = ?1 AND id = ?2";

pub const SELECT_TITLES: &str = "SELECT json_extract(body, '$.title') FROM documents \
     WHERE collection = ?1 ORDER BY seq";

//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use coursehub_core::course::{Course, CourseId, CoursePatch, CourseStats, FieldQuery, NewCourse};
use coursehub_core::storage::{CourseRepository, RepositoryError, Result};

use super::conversions::{course_to_document, patch_to_document, row_to_course};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_title};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-backed course collection.
///
/// Several repositories may share one database file; each only sees the
/// documents of its own collection.
pub struct SqliteRepository {
    conn: Connection,
    collection: String,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database.
    ///
    /// Schema tables are created automatically.
    pub async fn new(path: &str, collection: impl Into<String>) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self {
            conn,
            collection: collection.into(),
        })
    }

    /// Creates a repository over an in-memory database.
    pub async fn new_in_memory(collection: impl Into<String>) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self {
            conn,
            collection: collection.into(),
        })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }
}

/// Reads one course by id on the connection thread.
fn select_by_id(
    conn: &rusqlite::Connection,
    collection: &str,
    id: &str,
) -> std::result::Result<Option<Course>, tokio_rusqlite::Error> {
    let mut stmt = conn.prepare(schema::SELECT_BY_ID).map_err(wrap_err)?;
    match stmt.query_row([collection, id], row_to_course) {
        Ok(course) => Ok(Some(course)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(wrap_err(e)),
    }
}

#[async_trait]
impl CourseRepository for SqliteRepository {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>> {
        let collection = self.collection.clone();
        let id = id.to_string();

        self.conn
            .call(move |conn| select_by_id(conn, &collection, &id))
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn find_by_field(&self, query: &FieldQuery) -> Result<Option<Course>> {
        let collection = self.collection.clone();
        let path = query.field.json_path();
        let value = query.value.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_BY_FIELD).map_err(wrap_err)?;
                match stmt.query_row(rusqlite::params![collection, path, value], row_to_course) {
                    Ok(course) => Ok(Some(course)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn insert(&self, course: NewCourse) -> Result<Course> {
        let body = course_to_document(&course)?;
        let course = course.with_id(CourseId::generate());
        let collection = self.collection.clone();
        let id = course.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_DOCUMENT, [collection, id, body])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_title(e, Some(&course.title)))?;

        Ok(course)
    }

    async fn find_all(&self) -> Result<Vec<Course>> {
        let collection = self.collection.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL).map_err(wrap_err)?;
                let rows = stmt.query_map([&collection], row_to_course).map_err(wrap_err)?;

                let mut courses = Vec::new();
                for row_result in rows {
                    courses.push(row_result.map_err(wrap_err)?);
                }
                Ok(courses)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn update_by_id(&self, id: CourseId, patch: &CoursePatch) -> Result<Option<Course>> {
        let body = patch_to_document(patch)?;
        let collection = self.collection.clone();
        let id = id.to_string();

        self.conn
            .call(move |conn| {
                let changed = conn
                    .execute(schema::MERGE_DOCUMENT, [&collection, &id, &body])
                    .map_err(wrap_err)?;
                if changed == 0 {
                    return Ok(None);
                }
                select_by_id(conn, &collection, &id)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_title(e, patch.title.as_deref()))
    }

    async fn delete_by_id(&self, id: CourseId) -> Result<bool> {
        let collection = self.collection.clone();
        let id = id.to_string();

        self.conn
            .call(move |conn| {
                let deleted = conn
                    .execute(schema::DELETE_BY_ID, [&collection, &id])
                    .map_err(wrap_err)?;
                Ok(deleted > 0)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn count_with_projection(&self) -> Result<CourseStats> {
        let collection = self.collection.clone();

        let titles = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_TITLES).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&collection], |row| row.get::<_, String>(0))
                    .map_err(wrap_err)?;

                let mut titles = Vec::new();
                for row_result in rows {
                    titles.push(row_result.map_err(wrap_err)?);
                }
                Ok(titles)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(CourseStats::from_titles(titles))
    }

    async fn close(&self) -> Result<()> {
        match self.conn.clone().close().await {
            Ok(()) | Err(tokio_rusqlite::Error::ConnectionClosed) => Ok(()),
            Err(e) => Err(map_tokio_rusqlite_error(e)),
        }
    }
}

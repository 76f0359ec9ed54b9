//! Curriculum catalog contract and SQLite implementation.
//!
//! # Responsibility
//! - Expose the read-only curriculum catalog behind a lookup interface.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Lookups return notes in catalog order.
//! - Subject comparison is case-insensitive; class level is exact.

use crate::db::DbError;
use crate::model::note::CurriculumNote;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    subject,
    class_level,
    chapter,
    concepts,
    content
FROM curriculum_notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Catalog repository error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A seeded note reuses an id already present in the catalog.
    DuplicateId(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate curriculum note id: {id}"),
            Self::InvalidData(message) => write!(f, "invalid curriculum note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read-only access to the curriculum catalog.
pub trait CatalogRepository {
    /// Notes for one subject (case-insensitive) and class level, in catalog order.
    fn lookup(&self, subject: &str, class_level: u32) -> RepoResult<Vec<CurriculumNote>>;
    /// Whole catalog in catalog order.
    fn all(&self) -> RepoResult<Vec<CurriculumNote>>;
}

impl<R: CatalogRepository + ?Sized> CatalogRepository for &R {
    fn lookup(&self, subject: &str, class_level: u32) -> RepoResult<Vec<CurriculumNote>> {
        (**self).lookup(subject, class_level)
    }

    fn all(&self) -> RepoResult<Vec<CurriculumNote>> {
        (**self).all()
    }
}

/// Case-insensitive subject equality shared by every catalog implementation.
pub fn subject_eq(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

/// SQLite-backed catalog over the `curriculum_notes` table.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_table(conn)?;
        Ok(Self { conn })
    }

    /// Appends notes after the current last position, in slice order.
    ///
    /// Runs in one transaction; a duplicate id aborts the whole batch.
    pub fn insert_notes(&self, notes: &[CurriculumNote]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position), -1) FROM curriculum_notes;",
            [],
            |row| row.get(0),
        )?;

        for note in notes {
            if note.class_level == 0 {
                return Err(RepoError::InvalidData(format!(
                    "note `{}` has class level 0",
                    note.id
                )));
            }
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM curriculum_notes WHERE id = ?1);",
                [note.id.as_str()],
                |row| row.get(0),
            )?;
            if exists {
                return Err(RepoError::DuplicateId(note.id.clone()));
            }

            let concepts = serde_json::to_string(&note.concepts)
                .map_err(|err| RepoError::InvalidData(err.to_string()))?;
            position += 1;
            tx.execute(
                "INSERT INTO curriculum_notes (
                    id,
                    position,
                    subject,
                    class_level,
                    chapter,
                    concepts,
                    content
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    note.id.as_str(),
                    position,
                    note.subject.as_str(),
                    note.class_level,
                    note.chapter.as_str(),
                    concepts,
                    note.content.as_str(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(notes.len())
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn lookup(&self, subject: &str, class_level: u32) -> RepoResult<Vec<CurriculumNote>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE class_level = ?1
             ORDER BY position ASC;"
        ))?;
        let mut rows = stmt.query([class_level])?;

        // Subject filtering happens here so casing follows Unicode rules, not
        // SQLite's ASCII-only NOCASE.
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let note = parse_note_row(row)?;
            if subject_eq(&note.subject, subject) {
                notes.push(note);
            }
        }
        Ok(notes)
    }

    fn all(&self) -> RepoResult<Vec<CurriculumNote>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY position ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<CurriculumNote> {
    let id: String = row.get("id")?;
    let concepts_json: String = row.get("concepts")?;
    let concepts: Vec<String> = serde_json::from_str(&concepts_json).map_err(|err| {
        RepoError::InvalidData(format!("concepts of `{id}` are not a string list: {err}"))
    })?;

    Ok(CurriculumNote {
        id,
        subject: row.get("subject")?,
        class_level: row.get("class_level")?,
        chapter: row.get("chapter")?,
        concepts,
        content: row.get("content")?,
    })
}

fn ensure_catalog_table(conn: &Connection) -> RepoResult<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type = 'table' AND name = 'curriculum_notes'
        );",
        [],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RepoError::InvalidData(
            "curriculum_notes table missing; open the connection through db::open_db".to_string(),
        ));
    }
    Ok(())
}

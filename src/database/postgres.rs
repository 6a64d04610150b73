use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewNote, Note, NotePatch};
use super::store::{NoteStore, OwnedWrite};

const NOTE_COLUMNS: &str = "id, owner, title, description, tag, date";

/// Note store backed by the `notes` table
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Called after a conditional write matched nothing, to tell a missing id from a foreign one
    async fn classify_miss(&self, id: Uuid) -> Result<OwnedWrite, DatabaseError> {
        Ok(match self.owner_of(id).await? {
            Some(_) => OwnedWrite::Foreign,
            None => OwnedWrite::Missing,
        })
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Note>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM notes WHERE owner = $1 ORDER BY seq ASC",
            NOTE_COLUMNS
        );

        let notes = sqlx::query_as::<_, Note>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }

    async fn insert(&self, note: NewNote) -> Result<Note, DatabaseError> {
        let sql = format!(
            "INSERT INTO notes (id, owner, title, description, tag) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            NOTE_COLUMNS
        );

        let saved = sqlx::query_as::<_, Note>(&sql)
            .bind(Uuid::new_v4())
            .bind(note.owner)
            .bind(&note.title)
            .bind(&note.description)
            .bind(&note.tag)
            .fetch_one(&self.pool)
            .await?;
        Ok(saved)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: NotePatch,
    ) -> Result<OwnedWrite, DatabaseError> {
        // COALESCE keeps the stored value for every field the patch leaves out
        let sql = format!(
            r#"UPDATE notes
               SET title = COALESCE($3, title),
                   description = COALESCE($4, description),
                   tag = COALESCE($5, tag)
               WHERE id = $1 AND owner = $2
               RETURNING {}"#,
            NOTE_COLUMNS
        );

        let updated = sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .bind(owner)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.tag)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(note) => Ok(OwnedWrite::Applied(note)),
            None => self.classify_miss(id).await,
        }
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<OwnedWrite, DatabaseError> {
        let sql = format!(
            "DELETE FROM notes WHERE id = $1 AND owner = $2 RETURNING {}",
            NOTE_COLUMNS
        );

        let deleted = sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        match deleted {
            Some(note) => Ok(OwnedWrite::Applied(note)),
            None => self.classify_miss(id).await,
        }
    }

    async fn owner_of(&self, id: Uuid) -> Result<Option<Uuid>, DatabaseError> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT owner FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

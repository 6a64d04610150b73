//! Storage seam for notes.
//!
//! Every mutation of an existing note is a single conditional write keyed on
//! both the note id and its owner. The store decides the outcome inside that
//! one write, so there is no window between "check owner" and "mutate".

use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewNote, Note, NotePatch};

/// Result of a write that is conditional on ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedWrite {
    /// The note existed, belonged to the caller and the write went through.
    Applied(Note),
    /// No note with that id.
    Missing,
    /// A note with that id exists but belongs to someone else. Nothing was written.
    Foreign,
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Note>, DatabaseError>;

    /// Persist a new note, assigning its id and date.
    async fn insert(&self, note: NewNote) -> Result<Note, DatabaseError>;

    /// Apply `patch` to the note if and only if `owner` owns it.
    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: NotePatch,
    ) -> Result<OwnedWrite, DatabaseError>;

    /// Remove the note if and only if `owner` owns it. `Applied` carries the removed note.
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<OwnedWrite, DatabaseError>;

    /// Current owner of the note, `None` when no note has that id. Read only.
    async fn owner_of(&self, id: Uuid) -> Result<Option<Uuid>, DatabaseError>;

    /// Round trip to the backing store.
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

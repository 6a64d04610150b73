use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{NewNote, Note, NotePatch};
use super::store::{NoteStore, OwnedWrite};

/// In-process note store. Notes are kept in insertion order; every conditional
/// write holds the write lock for its whole check-and-mutate.
#[derive(Clone, Default)]
pub struct MemoryNoteStore {
    notes: Arc<RwLock<Vec<Note>>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn get(&self, id: Uuid) -> Option<Note> {
        self.notes.read().await.iter().find(|n| n.id == id).cloned()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Note>, DatabaseError> {
        let notes = self.notes.read().await;
        Ok(notes.iter().filter(|n| n.owner == owner).cloned().collect())
    }

    async fn insert(&self, note: NewNote) -> Result<Note, DatabaseError> {
        let saved = Note {
            id: Uuid::new_v4(),
            owner: note.owner,
            title: note.title,
            description: note.description,
            tag: note.tag,
            date: Utc::now(),
        };

        self.notes.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: NotePatch,
    ) -> Result<OwnedWrite, DatabaseError> {
        let mut notes = self.notes.write().await;

        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            return Ok(OwnedWrite::Missing);
        };
        if note.owner != owner {
            return Ok(OwnedWrite::Foreign);
        }

        patch.apply(note);
        Ok(OwnedWrite::Applied(note.clone()))
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<OwnedWrite, DatabaseError> {
        let mut notes = self.notes.write().await;

        let Some(index) = notes.iter().position(|n| n.id == id) else {
            return Ok(OwnedWrite::Missing);
        };
        if notes[index].owner != owner {
            return Ok(OwnedWrite::Foreign);
        }

        Ok(OwnedWrite::Applied(notes.remove(index)))
    }

    async fn owner_of(&self, id: Uuid) -> Result<Option<Uuid>, DatabaseError> {
        let notes = self.notes.read().await;
        Ok(notes.iter().find(|n| n.id == id).map(|n| n.owner))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

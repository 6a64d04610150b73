use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::error::NoteError;
use super::validation::{self, FieldError, Presence, NOTE_RULES};
use crate::database::models::{NewNote, Note, NotePatch, DEFAULT_TAG};
use crate::database::{NoteStore, OwnedWrite};

/// Body accepted by create and update. Every field is optional on the wire;
/// create decides what is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl NoteInput {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => self.title.as_deref(),
            "description" => self.description.as_deref(),
            "tag" => self.tag.as_deref(),
            _ => None,
        }
    }

    /// Only non-empty fields become part of the patch.
    fn into_patch(self) -> NotePatch {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        NotePatch {
            title: keep(self.title),
            description: keep(self.description),
            tag: keep(self.tag),
        }
    }
}

/// Path ids that aren't UUIDs can't name a note.
pub fn parse_note_id(raw: &str) -> Result<Uuid, NoteError> {
    Uuid::parse_str(raw).map_err(|_| NoteError::NotFound)
}

/// Owner-scoped note operations over any [`NoteStore`].
#[derive(Clone)]
pub struct NotesService {
    store: Arc<dyn NoteStore>,
    validate_updates: bool,
}

impl NotesService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            validate_updates: false,
        }
    }

    /// Also apply the creation rules to fields supplied on update.
    pub fn with_update_validation(mut self, enabled: bool) -> Self {
        self.validate_updates = enabled;
        self
    }

    pub fn store(&self) -> &Arc<dyn NoteStore> {
        &self.store
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Note>, NoteError> {
        Ok(self.store.list_by_owner(owner).await?)
    }

    pub async fn create(&self, owner: Uuid, input: NoteInput) -> Result<Note, NoteError> {
        validation::check(NOTE_RULES, Presence::Required, |f| input.field(f))
            .map_err(NoteError::Validation)?;

        let tag = input
            .tag
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TAG.to_string());

        let note = self
            .store
            .insert(NewNote {
                owner,
                title: input.title.unwrap_or_default(),
                description: input.description.unwrap_or_default(),
                tag,
            })
            .await?;

        tracing::debug!("Created note {} for {}", note.id, owner);
        Ok(note)
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, input: NoteInput) -> Result<Note, NoteError> {
        let patch = input.into_patch();

        if self.validate_updates {
            let checked = validation::check(NOTE_RULES, Presence::IfPresent, |f| match f {
                "title" => patch.title.as_deref(),
                "description" => patch.description.as_deref(),
                _ => None,
            });
            if let Err(errors) = checked {
                return Err(self.reject_patch(owner, id, errors).await);
            }
        }

        let outcome = self.store.update_owned(id, owner, patch).await?;
        let note = Self::resolve(outcome, id, owner)?;

        tracing::debug!("Updated note {} for {}", id, owner);
        Ok(note)
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<Note, NoteError> {
        let outcome = self.store.delete_owned(id, owner).await?;
        let note = Self::resolve(outcome, id, owner)?;

        tracing::debug!("Deleted note {} for {}", id, owner);
        Ok(note)
    }

    /// A note that is missing or foreign answers 404/401 even when the patch is also invalid.
    async fn reject_patch(&self, owner: Uuid, id: Uuid, errors: Vec<FieldError>) -> NoteError {
        match self.store.owner_of(id).await {
            Ok(None) => NoteError::NotFound,
            Ok(Some(current)) if current != owner => {
                tracing::warn!("User {} tried to modify note {} owned by someone else", owner, id);
                NoteError::NotAllowed
            }
            Ok(Some(_)) => NoteError::Validation(errors),
            Err(e) => NoteError::Database(e),
        }
    }

    fn resolve(outcome: OwnedWrite, id: Uuid, owner: Uuid) -> Result<Note, NoteError> {
        match outcome {
            OwnedWrite::Applied(note) => Ok(note),
            OwnedWrite::Missing => Err(NoteError::NotFound),
            OwnedWrite::Foreign => {
                tracing::warn!("User {} tried to modify note {} owned by someone else", owner, id);
                Err(NoteError::NotAllowed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryNoteStore;

    fn service(store: &MemoryNoteStore) -> NotesService {
        NotesService::new(Arc::new(store.clone()))
    }

    fn input(title: &str, description: &str, tag: Option<&str>) -> NoteInput {
        NoteInput {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            tag: tag.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_owner_and_default_tag() {
        let store = MemoryNoteStore::new();
        let owner = Uuid::new_v4();

        let note = service(&store)
            .create(owner, input("Groceries", "Buy milk and eggs", None))
            .await
            .unwrap();

        assert_eq!(note.owner, owner);
        assert_eq!(note.tag, DEFAULT_TAG);
        assert_eq!(store.get(note.id).await, Some(note));
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let store = MemoryNoteStore::new();

        let err = service(&store)
            .create(Uuid::new_v4(), input("ab", "abcd", Some("x")))
            .await
            .unwrap_err();

        match err {
            NoteError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn update_merges_supplied_fields_only() {
        let store = MemoryNoteStore::new();
        let svc = service(&store);
        let owner = Uuid::new_v4();
        let note = svc
            .create(owner, input("Groceries", "Buy milk and eggs", Some("home")))
            .await
            .unwrap();

        let updated = svc
            .update(
                owner,
                note.id,
                NoteInput {
                    title: Some(String::new()),
                    tag: Some("urgent".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Groceries");
        assert_eq!(updated.description, "Buy milk and eggs");
        assert_eq!(updated.tag, "urgent");
    }

    #[tokio::test]
    async fn update_skips_length_rules_by_default() {
        let store = MemoryNoteStore::new();
        let svc = service(&store);
        let owner = Uuid::new_v4();
        let note = svc
            .create(owner, input("Groceries", "Buy milk and eggs", None))
            .await
            .unwrap();

        let updated = svc
            .update(owner, note.id, input("ab", "abc", None))
            .await
            .unwrap();
        assert_eq!(updated.title, "ab");
    }

    #[tokio::test]
    async fn update_validation_can_be_enabled() {
        let store = MemoryNoteStore::new();
        let svc = service(&store).with_update_validation(true);
        let owner = Uuid::new_v4();
        let note = svc
            .create(owner, input("Groceries", "Buy milk and eggs", None))
            .await
            .unwrap();

        let err = svc
            .update(
                owner,
                note.id,
                NoteInput {
                    title: Some("ab".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, NoteError::Validation(ref e) if e.len() == 1));
        assert_eq!(store.get(note.id).await.unwrap().title, "Groceries");

        // untouched fields are not re-checked
        svc.update(
            owner,
            note.id,
            NoteInput {
                tag: Some("t".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn invalid_patch_still_reports_ownership_first() {
        let store = MemoryNoteStore::new();
        let svc = service(&store).with_update_validation(true);
        let owner = Uuid::new_v4();
        let note = svc
            .create(owner, input("Groceries", "Buy milk and eggs", None))
            .await
            .unwrap();
        let short = || NoteInput {
            title: Some("ab".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            svc.update(Uuid::new_v4(), note.id, short()).await,
            Err(NoteError::NotAllowed)
        ));
        assert!(matches!(
            svc.update(owner, Uuid::new_v4(), short()).await,
            Err(NoteError::NotFound)
        ));
        assert!(matches!(
            svc.update(owner, note.id, short()).await,
            Err(NoteError::Validation(_))
        ));
        assert_eq!(store.get(note.id).await.unwrap().title, "Groceries");
    }

    #[tokio::test]
    async fn foreign_and_missing_notes() {
        let store = MemoryNoteStore::new();
        let svc = service(&store);
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let note = svc
            .create(owner, input("Groceries", "Buy milk and eggs", None))
            .await
            .unwrap();

        assert!(matches!(
            svc.update(intruder, note.id, input("Hacked", "Hacked body", None)).await,
            Err(NoteError::NotAllowed)
        ));
        assert!(matches!(svc.delete(intruder, note.id).await, Err(NoteError::NotAllowed)));
        assert_eq!(store.get(note.id).await.unwrap().title, "Groceries");

        assert!(matches!(
            svc.delete(owner, Uuid::new_v4()).await,
            Err(NoteError::NotFound)
        ));

        let deleted = svc.delete(owner, note.id).await.unwrap();
        assert_eq!(deleted.id, note.id);
        assert!(matches!(svc.delete(owner, note.id).await, Err(NoteError::NotFound)));
    }

    #[test]
    fn malformed_ids_are_not_found() {
        assert!(matches!(parse_note_id("64f0c2"), Err(NoteError::NotFound)));
        assert!(parse_note_id(&Uuid::new_v4().to_string()).is_ok());
    }
}

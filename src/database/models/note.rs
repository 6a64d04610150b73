use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tag given to notes created without one.
pub const DEFAULT_TAG: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub date: DateTime<Utc>,
}

/// A validated note waiting for the store to assign its id and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub owner: Uuid,
    pub title: String,
    pub description: String,
    pub tag: String,
}

/// Fields to overwrite on an existing note. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
}

impl NotePatch {
    pub fn apply(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(description) = &self.description {
            note.description = description.clone();
        }
        if let Some(tag) = &self.tag {
            note.tag = tag.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut note = Note {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            title: "Groceries".to_string(),
            description: "Buy milk and eggs".to_string(),
            tag: "home".to_string(),
            date: Utc::now(),
        };
        let before = note.clone();

        let patch = NotePatch {
            tag: Some("urgent".to_string()),
            ..Default::default()
        };
        patch.apply(&mut note);

        assert_eq!(note.tag, "urgent");
        assert_eq!(note.title, before.title);
        assert_eq!(note.description, before.description);
        assert_eq!(note.id, before.id);
        assert_eq!(note.date, before.date);
    }
}

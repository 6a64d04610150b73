//! Declarative field rules for note bodies.
//!
//! Rules are plain data; [`check`] runs a rule set against any field lookup.
//! Create and (optionally) update both go through [`check`] so the rules live
//! in one place.

use serde::Serialize;

/// Minimum-length constraint on one body field. Length counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub min_chars: usize,
    pub message: &'static str,
}

pub const TITLE: FieldRule = FieldRule {
    field: "title",
    min_chars: 3,
    message: "Enter a Valid title",
};

pub const DESCRIPTION: FieldRule = FieldRule {
    field: "description",
    min_chars: 5,
    message: "Description must be atleast 5 characters",
};

/// Rules every note must satisfy, in reporting order.
pub const NOTE_RULES: &[FieldRule] = &[TITLE, DESCRIPTION];

/// How to treat a field the body doesn't carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absent fields are checked as the empty string.
    Required,
    /// Absent fields are skipped.
    IfPresent,
}

/// One violated rule, shaped the way clients of the notes API already parse it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: String,
    pub msg: String,
    pub path: String,
    pub location: &'static str,
}

impl FieldRule {
    pub fn check(&self, value: &str) -> Option<FieldError> {
        if value.chars().count() >= self.min_chars {
            return None;
        }

        Some(FieldError {
            kind: "field",
            value: value.to_string(),
            msg: self.message.to_string(),
            path: self.field.to_string(),
            location: "body",
        })
    }
}

/// Run `rules` against the fields returned by `lookup`, collecting one error per violated rule.
pub fn check<'a, F>(rules: &[FieldRule], presence: Presence, lookup: F) -> Result<(), Vec<FieldError>>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let errors: Vec<FieldError> = rules
        .iter()
        .filter_map(|rule| match (lookup(rule.field), presence) {
            (Some(value), _) => rule.check(value),
            (None, Presence::Required) => rule.check(""),
            (None, Presence::IfPresent) => None,
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub mod error;
pub mod service;
pub mod validation;

pub use error::NoteError;
pub use service::{parse_note_id, NoteInput, NotesService};
pub use validation::FieldError;

pub mod note;

pub use note::{NewNote, Note, NotePatch, DEFAULT_TAG};

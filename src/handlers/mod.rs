// handlers/mod.rs - two tiers
//
// Public (no auth): service identity and health
// Protected (token via fetch_user): note CRUD
pub mod notes;
pub mod service;

pub use notes::{add_note, delete_note, fetch_all_notes, update_note};
pub use service::{health, root};

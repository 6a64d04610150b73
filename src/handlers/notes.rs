// handlers/notes.rs - note CRUD endpoints, mounted under the configured base path
//
// Every route here sits behind `fetch_user`, so an `AuthUser` is always present.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::database::models::Note;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::notes::{parse_note_id, NoteInput};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UpdatedNote {
    pub note: Note,
}

#[derive(Debug, Serialize)]
pub struct DeletedNote {
    #[serde(rename = "Success")]
    pub success: &'static str,
    pub note: Note,
}

/// GET /fetchallnotes - every note the caller owns, oldest first
pub async fn fetch_all_notes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list(user.id).await?;
    Ok(Json(notes))
}

/// POST /addnotes - create a note owned by the caller
///
/// Body: `{ "title": "...", "description": "...", "tag": "..." }`, tag optional.
/// Responds 400 with `{ "errors": [...] }` when a length rule fails.
pub async fn add_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(input) = payload?;
    let note = state.notes.create(user.id, input).await?;
    Ok(Json(note))
}

/// PUT /updatenote/:id - merge the supplied fields into a note the caller owns
///
/// A request without a JSON body changes nothing but still answers 404/401 for
/// unknown or foreign ids. Only a JSON body that fails to parse is a 400.
pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<UpdatedNote>, ApiError> {
    let id = parse_note_id(&id)?;
    let input = match payload {
        Ok(Json(input)) => input,
        Err(JsonRejection::MissingJsonContentType(_)) => NoteInput::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let note = state.notes.update(user.id, id, input).await?;
    Ok(Json(UpdatedNote { note }))
}

/// DELETE /deletenote/:id - remove a note the caller owns, echoing what was removed
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeletedNote>, ApiError> {
    let id = parse_note_id(&id)?;

    let note = state.notes.delete(user.id, id).await?;
    Ok(Json(DeletedNote {
        success: "Note has been deleted",
        note,
    }))
}

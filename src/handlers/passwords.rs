use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use crate::db::{EntryId, PasswordEntry};
use crate::error::VaultError;
use crate::middleware::session::CurrentUser;
use crate::router::VaultState;
use crate::types::{GenerateForm, UpdateSecretForm};

/// GET /passwords -> the caller's entries, oldest first.
pub async fn list_passwords(
    State(state): State<VaultState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<PasswordEntry>>, VaultError> {
    let entries = state.vault.list_user_passwords(user.id).await?;
    Ok(Json(entries))
}

/// POST /passwords -> generates a password for `name` and stores it.
pub async fn generate_password(
    State(state): State<VaultState>,
    CurrentUser(user): CurrentUser,
    WithRejection(Json(form), _): WithRejection<Json<GenerateForm>, VaultError>,
) -> Result<impl IntoResponse, VaultError> {
    form.validate()?;
    let entry = state
        .vault
        .generate_and_store_password(user.id, &form.name, form.length, form.special_chars)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn show_password(
    State(state): State<VaultState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<EntryId>,
) -> Result<Json<PasswordEntry>, VaultError> {
    let entry = state.vault.get_password(id, user.id).await?;
    Ok(Json(entry))
}

/// PUT /passwords/{id} -> replaces the stored secret.
pub async fn update_password(
    State(state): State<VaultState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<EntryId>,
    WithRejection(Json(form), _): WithRejection<Json<UpdateSecretForm>, VaultError>,
) -> Result<Json<PasswordEntry>, VaultError> {
    form.validate()?;
    let entry = state
        .vault
        .update_password(id, user.id, &form.password)
        .await?;
    Ok(Json(entry))
}

pub async fn delete_password(
    State(state): State<VaultState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<EntryId>,
) -> Result<StatusCode, VaultError> {
    state.vault.delete_password(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

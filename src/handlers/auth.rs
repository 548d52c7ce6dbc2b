use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::{WithRejection, cookie::PrivateCookieJar};
use serde::Serialize;

use crate::db::UserId;
use crate::error::VaultError;
use crate::middleware::session::CurrentUser;
use crate::router::VaultState;
use crate::types::{LoginForm, RegisterForm};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: UserId,
    pub username: String,
}

/// POST /register -> creates the account; the caller still has to log in.
pub async fn register(
    State(state): State<VaultState>,
    WithRejection(Json(form), _): WithRejection<Json<RegisterForm>, VaultError>,
) -> Result<impl IntoResponse, VaultError> {
    form.validate()?;
    let user = state
        .vault
        .register_user(&form.username, &form.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /login -> verifies credentials and sets the session cookie.
pub async fn login(
    State(state): State<VaultState>,
    jar: PrivateCookieJar,
    WithRejection(Json(form), _): WithRejection<Json<LoginForm>, VaultError>,
) -> Result<impl IntoResponse, VaultError> {
    form.validate()?;
    let token = state
        .vault
        .authenticate(&form.username, &form.password)
        .await?;
    let jar = state.sessions.establish(jar, &token)?;
    Ok((
        jar,
        Json(LoginResponse {
            user_id: token.user_id,
            username: form.username,
        }),
    ))
}

/// POST /logout -> drops the session cookie.
pub async fn logout(
    State(state): State<VaultState>,
    CurrentUser(_user): CurrentUser,
    jar: PrivateCookieJar,
) -> impl IntoResponse {
    (state.sessions.terminate(jar), StatusCode::NO_CONTENT)
}

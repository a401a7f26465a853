//! Minimal account CRUD. Accounts are the durable user identities the
//! lobby core references by id; login and token issuance live elsewhere.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::db::models::Account;
use crate::game::{api_error, internal_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.user_id.clone(),
            username: account.username.clone(),
            email: account.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    pub user: AccountResponse,
}

/// POST /api/users — Create an account.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), ApiError> {
    if req.username.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Username cannot be empty"));
    }
    if req.email.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Email cannot be empty"));
    }

    let db = state.db.clone();

    let account = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| internal_error())?;
        catalog::create_account(&conn, &req.username, &req.email).map_err(|err| match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                api_error(StatusCode::CONFLICT, "Username or email already in use")
            }
            _ => internal_error(),
        })
    })
    .await
    .map_err(|_| internal_error())??;

    tracing::info!(user_id = %account.user_id, username = %account.username, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(CreateAccountResponse {
            user: AccountResponse::from(&account),
        }),
    ))
}

/// GET /api/users — List all accounts.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let db = state.db.clone();

    let accounts = tokio::task::spawn_blocking(move || {
        let conn = db.lock().map_err(|_| internal_error())?;
        catalog::list_accounts(&conn).map_err(|_| internal_error())
    })
    .await
    .map_err(|_| internal_error())??;

    Ok(Json(
        accounts.iter().map(AccountResponse::from).collect(),
    ))
}

//! Accounts API endpoints.

use api_types::account::{AccountKind as ApiKind, AccountNew, AccountView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Account, AccountCmd, AccountKind, MoneyCents};

use crate::{ServerError, parse_money, server::ServerState, user};

fn map_kind(kind: AccountKind) -> ApiKind {
    match kind {
        AccountKind::Wallet => ApiKind::Wallet,
        AccountKind::Bank => ApiKind::Bank,
        AccountKind::Card => ApiKind::Card,
    }
}

fn view(account: Account) -> AccountView {
    AccountView {
        id: account.id,
        user: account.user_id,
        name: account.name,
        kind: map_kind(account.kind),
        opening_balance: account.opening_balance.to_string(),
    }
}

fn command(payload: AccountNew) -> Result<AccountCmd, ServerError> {
    let kind = match payload.kind {
        ApiKind::Wallet => AccountKind::Wallet,
        ApiKind::Bank => AccountKind::Bank,
        ApiKind::Card => AccountKind::Card,
    };
    let opening_balance = match payload.opening_balance.as_deref() {
        Some(raw) => parse_money(raw)?,
        None => MoneyCents::ZERO,
    };
    Ok(AccountCmd::new(payload.name, kind).opening_balance(opening_balance))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.list_accounts(&user.username).await?;
    Ok(Json(accounts.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let account = state
        .engine
        .create_account(&user.username, command(payload)?)
        .await?;
    Ok((StatusCode::CREATED, Json(view(account))))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountView>, ServerError> {
    let account = state.engine.account(&user.username, id).await?;
    Ok(Json(view(account)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AccountNew>,
) -> Result<Json<AccountView>, ServerError> {
    let account = state
        .engine
        .update_account(&user.username, id, command(payload)?)
        .await?;
    Ok(Json(view(account)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_account(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Transactions API endpoints

use api_types::transaction::{
    TransactionKind as ApiKind, TransactionNew, TransactionQuery, TransactionView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use engine::{
    EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME, Transaction, TransactionCmd, TransactionKind,
    TransactionListFilter, parse_date,
};

use crate::{ServerError, parse_money, server::ServerState, user};

fn map_kind(kind: TransactionKind) -> ApiKind {
    match kind {
        TransactionKind::Income => ApiKind::Income,
        TransactionKind::Expense => ApiKind::Expense,
        TransactionKind::Transfer => ApiKind::Transfer,
    }
}

fn view(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        user: tx.user_id,
        account: tx.account_id,
        category: tx.category_id,
        kind: map_kind(tx.kind),
        amount: tx.amount.to_string(),
        date: tx.date,
        note: tx.note,
        is_recurring: tx.is_recurring,
    }
}

fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Blank or unparsable values are dropped, not rejected.
fn filter(query: &TransactionQuery) -> TransactionListFilter {
    TransactionListFilter {
        start: query.start_date.as_deref().and_then(parse_date),
        end: query.end_date.as_deref().and_then(parse_date),
        kind: query.kind.as_deref().and_then(TransactionKind::parse_filter),
        account_id: parse_id(query.account_id.as_deref()),
        category_id: parse_id(query.category_id.as_deref()),
    }
}

fn command(payload: TransactionNew) -> Result<TransactionCmd, ServerError> {
    let kind = match payload.kind {
        ApiKind::Income => TransactionKind::Income,
        ApiKind::Expense => TransactionKind::Expense,
        ApiKind::Transfer => TransactionKind::Transfer,
    };
    Ok(TransactionCmd {
        account_id: payload.account,
        category_id: payload.category,
        kind,
        amount: parse_money(&payload.amount)?,
        date: payload.date,
        note: payload.note,
        is_recurring: payload.is_recurring,
    })
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let txs = state
        .engine
        .list_transactions(&user.username, &filter(&query))
        .await?;
    Ok(Json(txs.into_iter().map(view).collect()))
}

pub async fn export(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let body = state
        .engine
        .export_transactions(&user.username, &filter(&query))
        .await?;
    let headers = [
        (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={EXPORT_FILE_NAME}"),
        ),
    ];
    Ok((headers, body))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .create_transaction(&user.username, command(payload)?)
        .await?;
    Ok((StatusCode::CREATED, Json(view(tx))))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.transaction(&user.username, id).await?;
    Ok(Json(view(tx)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .engine
        .update_transaction(&user.username, id, command(payload)?)
        .await?;
    Ok(Json(view(tx)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_do_not_filter() {
        let query = TransactionQuery {
            account_id: Some(String::new()),
            category_id: Some(" ".to_string()),
            ..TransactionQuery::default()
        };
        assert_eq!(filter(&query), TransactionListFilter::default());
    }

    #[test]
    fn numeric_ids_filter() {
        let query = TransactionQuery {
            account_id: Some("7".to_string()),
            category_id: Some("x".to_string()),
            ..TransactionQuery::default()
        };
        let parsed = filter(&query);
        assert_eq!(parsed.account_id, Some(7));
        assert_eq!(parsed.category_id, None);
    }
}

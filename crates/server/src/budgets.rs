//! Budgets API endpoints.

use api_types::budget::{BudgetNew, BudgetView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Budget, BudgetCmd};

use crate::{ServerError, parse_money, server::ServerState, user};

fn view(budget: Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        user: budget.user_id,
        category: budget.category_id,
        year: budget.year,
        month: budget.month,
        planned: budget.planned.to_string(),
    }
}

fn command(payload: BudgetNew) -> Result<BudgetCmd, ServerError> {
    let planned = parse_money(&payload.planned)?;
    Ok(BudgetCmd::new(
        payload.category,
        payload.year,
        payload.month,
        planned,
    ))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let budgets = state.engine.list_budgets(&user.username).await?;
    Ok(Json(budgets.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state
        .engine
        .create_budget(&user.username, command(payload)?)
        .await?;
    Ok((StatusCode::CREATED, Json(view(budget))))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state.engine.budget(&user.username, id).await?;
    Ok(Json(view(budget)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BudgetNew>,
) -> Result<Json<BudgetView>, ServerError> {
    let budget = state
        .engine
        .update_budget(&user.username, id, command(payload)?)
        .await?;
    Ok(Json(view(budget)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_budget(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Goals API endpoints.

use api_types::goal::{GoalNew, GoalView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Goal, GoalCmd};

use crate::{ServerError, parse_money, server::ServerState, user};

fn view(goal: Goal) -> GoalView {
    GoalView {
        id: goal.id,
        user: goal.user_id,
        name: goal.name,
        target_amount: goal.target_amount.to_string(),
        due_date: goal.due_date,
        account: goal.account_id,
    }
}

fn command(payload: GoalNew) -> Result<GoalCmd, ServerError> {
    let target = parse_money(&payload.target_amount)?;
    Ok(GoalCmd {
        name: payload.name,
        target_amount: target,
        due_date: payload.due_date,
        account_id: payload.account,
    })
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<GoalView>>, ServerError> {
    let goals = state.engine.list_goals(&user.username).await?;
    Ok(Json(goals.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalView>), ServerError> {
    let goal = state
        .engine
        .create_goal(&user.username, command(payload)?)
        .await?;
    Ok((StatusCode::CREATED, Json(view(goal))))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state.engine.goal(&user.username, id).await?;
    Ok(Json(view(goal)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<GoalNew>,
) -> Result<Json<GoalView>, ServerError> {
    let goal = state
        .engine
        .update_goal(&user.username, id, command(payload)?)
        .await?;
    Ok(Json(view(goal)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_goal(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

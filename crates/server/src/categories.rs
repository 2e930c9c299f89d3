//! Categories API endpoints.

use api_types::category::{CategoryNew, CategoryType as ApiType, CategoryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Category, CategoryCmd, CategoryType};

use crate::{ServerError, server::ServerState, user};

fn view(category: Category) -> CategoryView {
    CategoryView {
        id: category.id,
        user: category.user_id,
        name: category.name,
        category_type: match category.category_type {
            CategoryType::Income => ApiType::Income,
            CategoryType::Expense => ApiType::Expense,
        },
        parent: category.parent_id,
    }
}

fn command(payload: CategoryNew) -> CategoryCmd {
    let category_type = match payload.category_type {
        ApiType::Income => CategoryType::Income,
        ApiType::Expense => CategoryType::Expense,
    };
    let cmd = CategoryCmd::new(payload.name, category_type);
    match payload.parent {
        Some(parent_id) => cmd.parent_id(parent_id),
        None => cmd,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let categories = state.engine.list_categories(&user.username).await?;
    Ok(Json(categories.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(&user.username, command(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(view(category))))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state.engine.category(&user.username, id).await?;
    Ok(Json(view(category)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryNew>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state
        .engine
        .update_category(&user.username, id, command(payload))
        .await?;
    Ok(Json(view(category)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

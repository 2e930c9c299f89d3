//! Recurring rule endpoints. Rules are stored only; nothing materializes them.

use api_types::recurring::{Frequency as ApiFrequency, RecurringRuleNew, RecurringRuleView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Frequency, RecurringRule, RecurringRuleCmd};

use crate::{ServerError, server::ServerState, user};

fn view(rule: RecurringRule) -> RecurringRuleView {
    RecurringRuleView {
        id: rule.id,
        user: rule.user_id,
        transaction_template: rule.transaction_template_id,
        frequency: match rule.frequency {
            Frequency::Weekly => ApiFrequency::Weekly,
            Frequency::Monthly => ApiFrequency::Monthly,
        },
        day: rule.day,
        next_run: rule.next_run,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<RecurringRuleView>>, ServerError> {
    let rules = state.engine.list_recurring_rules(&user.username).await?;
    Ok(Json(rules.into_iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<RecurringRuleNew>,
) -> Result<(StatusCode, Json<RecurringRuleView>), ServerError> {
    let frequency = match payload.frequency {
        ApiFrequency::Weekly => Frequency::Weekly,
        ApiFrequency::Monthly => Frequency::Monthly,
    };
    let cmd = RecurringRuleCmd::new(
        payload.transaction_template,
        frequency,
        payload.day,
        payload.next_run,
    );
    let rule = state
        .engine
        .create_recurring_rule(&user.username, cmd)
        .await?;
    Ok((StatusCode::CREATED, Json(view(rule))))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<RecurringRuleView>, ServerError> {
    let rule = state.engine.recurring_rule(&user.username, id).await?;
    Ok(Json(view(rule)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_recurring_rule(&user.username, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

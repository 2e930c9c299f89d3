//! Dashboard endpoint: the period report of the authenticated owner.

use api_types::dashboard::{
    BudgetLineView, BudgetStatus as ApiStatus, CategoryExpenseView, Dashboard, DashboardQuery,
    GoalProgressView, PeriodView, TotalsView,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::Local;
use engine::{BudgetStatus, Report};

use crate::{ServerError, server::ServerState, user};

fn view(report: Report) -> Dashboard {
    Dashboard {
        period: PeriodView {
            start_date: report.period.start,
            end_date: report.period.end,
        },
        totals: TotalsView {
            income: report.totals.income.to_string(),
            expense: report.totals.expense.to_string(),
            balance: report.totals.balance.to_string(),
        },
        by_category_expense: report
            .by_category_expense
            .into_iter()
            .map(|line| CategoryExpenseView {
                category_id: line.category_id,
                category: line.category,
                total: line.total.to_string(),
            })
            .collect(),
        budgets: report
            .budgets
            .into_iter()
            .map(|line| BudgetLineView {
                category: line.category,
                planned: line.planned.to_string(),
                spent: line.spent.to_string(),
                remaining: line.remaining.to_string(),
                status: match line.status {
                    BudgetStatus::Ok => ApiStatus::Ok,
                    BudgetStatus::Over => ApiStatus::Over,
                },
            })
            .collect(),
        goals: report
            .goals
            .into_iter()
            .map(|goal| GoalProgressView {
                goal: goal.goal,
                target_amount: goal.target_amount.to_string(),
                due_date: goal.due_date,
                account: goal.account,
                estimated_balance: goal.estimated_balance.map(|b| b.to_string()),
                progress_percent: goal.progress_percent,
            })
            .collect(),
    }
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, ServerError> {
    let today = Local::now().date_naive();
    let report = state
        .engine
        .report(
            &user.username,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            today,
        )
        .await?;
    Ok(Json(view(report)))
}

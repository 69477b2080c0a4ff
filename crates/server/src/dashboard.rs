//! One-shot dashboard view.
//!
//! Built on the tolerant engine API: any section the record store fails to
//! deliver is rendered empty, and the failure is logged instead of failing
//! the whole page.

use axum::{
    Json,
    extract::{Path, State},
};
use engine::{
    Budget, BudgetSummary, CategoryAmount, GoalsSummary, MonthKey, SavingsGoal, Transaction,
    TrendPoint,
};
use serde::Serialize;

use crate::{ServerError, month_param, server::ServerState, statistics::DEFAULT_TREND_MONTHS};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub month: MonthKey,
    pub budgets: Vec<Budget>,
    pub budget_summary: BudgetSummary,
    pub goals: Vec<SavingsGoal>,
    pub goals_summary: GoalsSummary,
    pub category_breakdown: Vec<CategoryAmount>,
    pub trend: Vec<TrendPoint>,
    pub transactions: Vec<Transaction>,
}

pub async fn get(
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<Json<Dashboard>, ServerError> {
    let month = month_param(&month)?;
    let compat = state.engine.compat();

    let budgets = compat.budgets_by_month(month).await;
    let goals = compat.list_savings_goals().await;
    let transactions = compat.transactions_by_month(month).await;

    Ok(Json(Dashboard {
        month,
        budget_summary: BudgetSummary::from_budgets(&budgets),
        goals_summary: GoalsSummary::from_goals(&goals),
        category_breakdown: engine::category_breakdown(&transactions),
        trend: compat
            .income_expense_trend(&month.window(DEFAULT_TREND_MONTHS))
            .await,
        budgets,
        goals,
        transactions,
    }))
}

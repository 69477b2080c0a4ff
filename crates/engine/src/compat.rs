//! Tolerant view over [`Engine`].
//!
//! Every method mirrors the `Engine` operation of the same name but never
//! fails: errors are logged and replaced by an empty list, `None`, `false`
//! or a zeroed summary. Used by callers that render whatever is available,
//! such as the dashboard endpoint.

use crate::{
    Budget, BudgetChanges, BudgetSummary, Category, CategoryAmount, CategoryChanges, Engine,
    EngineError, GoalsSummary, Money, MonthKey, NewBudget, NewCategory, NewSavingsGoal,
    NewTransaction, ResultEngine, SavingsGoal, SavingsGoalChanges, Transaction,
    TransactionChanges, TrendPoint, ops::contribution_overflow, summary,
};

/// Borrowed from [`Engine::compat`].
#[derive(Clone, Copy)]
pub struct Compat<'a> {
    engine: &'a Engine,
}

impl Engine {
    pub fn compat(&self) -> Compat<'_> {
        Compat { engine: self }
    }
}

fn or_default<T: Default>(result: ResultEngine<T>, action: &str) -> T {
    result.unwrap_or_else(|err| {
        tracing::error!("{action}: {err}");
        T::default()
    })
}

fn succeeded(result: ResultEngine<()>, action: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::error!("{action}: {err}");
            false
        }
    }
}

fn ok_or_none<T>(result: ResultEngine<T>, action: &str) -> Option<T> {
    or_default(result.map(Some), action)
}

impl Compat<'_> {
    pub async fn list_transactions(&self) -> Vec<Transaction> {
        or_default(
            self.engine.list_transactions().await,
            "error fetching transactions",
        )
    }

    pub async fn transaction(&self, id: i64) -> Option<Transaction> {
        or_default(
            self.engine.transaction(id).await,
            "error fetching transaction",
        )
    }

    pub async fn transactions_by_month(&self, month: MonthKey) -> Vec<Transaction> {
        or_default(
            self.engine.transactions_by_month(month).await,
            "error fetching transactions by month",
        )
    }

    pub async fn transactions_by_category(&self, category: &str) -> Vec<Transaction> {
        or_default(
            self.engine.transactions_by_category(category).await,
            "error fetching transactions by category",
        )
    }

    pub async fn create_transaction(&self, new: &NewTransaction) -> Option<Transaction> {
        ok_or_none(
            self.engine.create_transaction(new).await,
            "error creating transaction",
        )
    }

    pub async fn update_transaction(
        &self,
        id: i64,
        changes: &TransactionChanges,
    ) -> Option<Transaction> {
        ok_or_none(
            self.engine.update_transaction(id, changes).await,
            "error updating transaction",
        )
    }

    pub async fn delete_transaction(&self, id: i64) -> bool {
        succeeded(
            self.engine.delete_transaction(id).await,
            "error deleting transaction",
        )
    }

    pub async fn list_budgets(&self) -> Vec<Budget> {
        or_default(self.engine.list_budgets().await, "error fetching budgets")
    }

    pub async fn budget(&self, id: i64) -> Option<Budget> {
        or_default(self.engine.budget(id).await, "error fetching budget")
    }

    pub async fn budgets_by_month(&self, month: MonthKey) -> Vec<Budget> {
        or_default(
            self.engine.budgets_by_month(month).await,
            "error fetching budgets by month",
        )
    }

    pub async fn create_budget(&self, new: &NewBudget) -> Option<Budget> {
        ok_or_none(self.engine.create_budget(new).await, "error creating budget")
    }

    pub async fn update_budget(&self, id: i64, changes: &BudgetChanges) -> Option<Budget> {
        ok_or_none(
            self.engine.update_budget(id, changes).await,
            "error updating budget",
        )
    }

    pub async fn update_spent(
        &self,
        category: &str,
        month: MonthKey,
        amount: Money,
    ) -> Option<Budget> {
        or_default(
            self.engine.update_spent(category, month, amount).await,
            "error updating budget spent",
        )
    }

    pub async fn delete_budget(&self, id: i64) -> bool {
        succeeded(self.engine.delete_budget(id).await, "error deleting budget")
    }

    /// Budget summary built from whatever [`Self::budgets_by_month`] returns.
    pub async fn budget_summary(&self, month: MonthKey) -> BudgetSummary {
        BudgetSummary::from_budgets(&self.budgets_by_month(month).await)
    }

    pub async fn list_categories(&self) -> Vec<Category> {
        or_default(
            self.engine.list_categories().await,
            "error fetching categories",
        )
    }

    pub async fn category(&self, id: i64) -> Option<Category> {
        or_default(self.engine.category(id).await, "error fetching category")
    }

    pub async fn category_by_name(&self, name: &str) -> Option<Category> {
        or_default(
            self.engine.category_by_name(name).await,
            "error fetching category by name",
        )
    }

    pub async fn create_category(&self, new: &NewCategory) -> Option<Category> {
        ok_or_none(
            self.engine.create_category(new).await,
            "error creating category",
        )
    }

    pub async fn update_category(&self, id: i64, changes: &CategoryChanges) -> Option<Category> {
        ok_or_none(
            self.engine.update_category(id, changes).await,
            "error updating category",
        )
    }

    pub async fn delete_category(&self, id: i64) -> bool {
        succeeded(
            self.engine.delete_category(id).await,
            "error deleting category",
        )
    }

    pub async fn list_savings_goals(&self) -> Vec<SavingsGoal> {
        or_default(
            self.engine.list_savings_goals().await,
            "error fetching savings goals",
        )
    }

    pub async fn savings_goal(&self, id: i64) -> Option<SavingsGoal> {
        or_default(
            self.engine.savings_goal(id).await,
            "error fetching savings goal",
        )
    }

    pub async fn create_savings_goal(&self, new: &NewSavingsGoal) -> Option<SavingsGoal> {
        ok_or_none(
            self.engine.create_savings_goal(new).await,
            "error creating savings goal",
        )
    }

    pub async fn update_savings_goal(
        &self,
        id: i64,
        changes: &SavingsGoalChanges,
    ) -> Option<SavingsGoal> {
        ok_or_none(
            self.engine.update_savings_goal(id, changes).await,
            "error updating savings goal",
        )
    }

    /// Adds to a goal's saved amount.
    ///
    /// Unlike the rest of the shim, a goal that can't be looked up is still
    /// an error ([`EngineError::KeyNotFound`]); only a failed write collapses
    /// to `Ok(None)`.
    pub async fn add_contribution(
        &self,
        id: i64,
        amount: Money,
    ) -> ResultEngine<Option<SavingsGoal>> {
        let Some(goal) = self.savings_goal(id).await else {
            tracing::error!("error adding contribution: savings goal {id} not found");
            return Err(EngineError::KeyNotFound(format!("savings goal {id}")));
        };

        let Some(current) = goal.current_amount.checked_add(amount) else {
            tracing::error!("error adding contribution: savings goal {id} would overflow");
            return Err(contribution_overflow());
        };
        let changes = SavingsGoalChanges {
            current_amount: Some(current),
            ..SavingsGoalChanges::default()
        };
        Ok(self.update_savings_goal(id, &changes).await)
    }

    pub async fn delete_savings_goal(&self, id: i64) -> bool {
        succeeded(
            self.engine.delete_savings_goal(id).await,
            "error deleting savings goal",
        )
    }

    pub async fn goals_summary(&self) -> GoalsSummary {
        GoalsSummary::from_goals(&self.list_savings_goals().await)
    }

    /// One point per requested month; a month that fails to load counts as
    /// empty.
    pub async fn income_expense_trend(&self, months: &[MonthKey]) -> Vec<TrendPoint> {
        let mut trend = Vec::with_capacity(months.len());
        for &month in months {
            let transactions = self.transactions_by_month(month).await;
            trend.push(TrendPoint::from_transactions(month, &transactions));
        }
        trend
    }

    pub async fn category_breakdown(&self, month: MonthKey) -> Vec<CategoryAmount> {
        summary::category_breakdown(&self.transactions_by_month(month).await)
    }
}

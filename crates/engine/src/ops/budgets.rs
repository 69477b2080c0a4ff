use api_types::records::{Record, Where};

use crate::{
    Budget, BudgetChanges, BudgetSummary, Money, MonthKey, NewBudget, ResultEngine, budgets,
};

use super::{Engine, Notify, ensure_non_negative};

impl Engine {
    pub async fn list_budgets(&self) -> ResultEngine<Vec<Budget>> {
        self.fetch_all(Vec::new(), Vec::new(), Notify::Yes).await
    }

    pub async fn budget(&self, id: i64) -> ResultEngine<Option<Budget>> {
        self.fetch_by_id(id).await
    }

    pub async fn budgets_by_month(&self, month: MonthKey) -> ResultEngine<Vec<Budget>> {
        self.fetch_all(
            vec![Where::equal_to(budgets::MONTH, month.to_string())],
            Vec::new(),
            Notify::No,
        )
        .await
    }

    pub async fn create_budget(&self, new: &NewBudget) -> ResultEngine<Budget> {
        ensure_non_negative(new.monthly_limit, "monthly limit")?;
        self.create_one(Record::from(new)).await
    }

    pub async fn update_budget(&self, id: i64, changes: &BudgetChanges) -> ResultEngine<Budget> {
        if let Some(limit) = changes.monthly_limit {
            ensure_non_negative(limit, "monthly limit")?;
        }
        if let Some(spent) = changes.spent {
            ensure_non_negative(spent, "spent")?;
        }
        self.update_one(changes.to_record(id)).await
    }

    /// Overwrites `spent` on the budget of `category` for `month`.
    ///
    /// Returns `None` when that month has no budget for the category. This is
    /// a read-then-write without version check: concurrent writers to the
    /// same budget can overwrite each other.
    pub async fn update_spent(
        &self,
        category: &str,
        month: MonthKey,
        amount: Money,
    ) -> ResultEngine<Option<Budget>> {
        let budgets = self.budgets_by_month(month).await?;
        let Some(budget) = budgets.into_iter().find(|b| b.category == category) else {
            tracing::debug!("no budget for {category} in {month}");
            return Ok(None);
        };

        let changes = BudgetChanges {
            spent: Some(amount),
            ..BudgetChanges::default()
        };
        self.update_budget(budget.id, &changes).await.map(Some)
    }

    pub async fn delete_budget(&self, id: i64) -> ResultEngine<()> {
        self.delete_one::<Budget>(id).await
    }

    pub async fn budget_summary(&self, month: MonthKey) -> ResultEngine<BudgetSummary> {
        let budgets = self.budgets_by_month(month).await?;
        Ok(BudgetSummary::from_budgets(&budgets))
    }
}

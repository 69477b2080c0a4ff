use crate::{
    CategoryAmount, MonthKey, ResultEngine, TrendPoint, summary::category_breakdown,
};

use super::Engine;

impl Engine {
    /// Income, expenses and net per month, in the order of `months`.
    ///
    /// Months are fetched one after the other; a month without transactions
    /// yields a zero point.
    pub async fn income_expense_trend(&self, months: &[MonthKey]) -> ResultEngine<Vec<TrendPoint>> {
        let mut trend = Vec::with_capacity(months.len());
        for &month in months {
            let transactions = self.transactions_by_month(month).await?;
            trend.push(TrendPoint::from_transactions(month, &transactions));
        }
        Ok(trend)
    }

    /// Expense totals per category for `month`.
    pub async fn category_breakdown(&self, month: MonthKey) -> ResultEngine<Vec<CategoryAmount>> {
        let transactions = self.transactions_by_month(month).await?;
        Ok(category_breakdown(&transactions))
    }
}

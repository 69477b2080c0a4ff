//! Dashboard aggregates.
//!
//! Every function here is a pure reduction over an already fetched snapshot;
//! the engine methods in `ops` only fetch and delegate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Budget, Money, MonthKey, SavingsGoal, Transaction};

/// Totals of one month of budgets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    /// `total_spent / total_budget * 100`, `0.0` when nothing is budgeted.
    pub percentage: f64,
    /// Number of budgets (one per category).
    pub categories: usize,
}

impl BudgetSummary {
    pub fn from_budgets(budgets: &[Budget]) -> Self {
        let total_budget: Money = budgets.iter().map(|b| b.monthly_limit).sum();
        let total_spent: Money = budgets.iter().map(|b| b.spent).sum();
        Self {
            total_budget,
            total_spent,
            remaining: total_budget.saturating_sub(total_spent),
            percentage: total_spent.percent_of(total_budget),
            categories: budgets.len(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsSummary {
    pub total_target_amount: Money,
    pub total_current_amount: Money,
    pub total_remaining: Money,
    pub overall_progress: f64,
    pub active_goals_count: usize,
    pub completed_goals_count: usize,
    pub total_goals_count: usize,
}

impl GoalsSummary {
    pub fn from_goals(goals: &[SavingsGoal]) -> Self {
        let total_target_amount: Money = goals.iter().map(|g| g.target_amount).sum();
        let total_current_amount: Money = goals.iter().map(|g| g.current_amount).sum();
        let completed_goals_count = goals.iter().filter(|g| g.is_completed()).count();
        Self {
            total_target_amount,
            total_current_amount,
            total_remaining: total_target_amount.saturating_sub(total_current_amount),
            overall_progress: total_current_amount.percent_of(total_target_amount),
            active_goals_count: goals.len() - completed_goals_count,
            completed_goals_count,
            total_goals_count: goals.len(),
        }
    }
}

/// Income against expenses for one month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

impl TrendPoint {
    /// Sums the snapshot as-is; callers pass the transactions of `month`.
    pub fn from_transactions(month: MonthKey, transactions: &[Transaction]) -> Self {
        let income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let expenses: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();
        Self {
            month,
            income,
            expenses,
            net: income.saturating_sub(expenses),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Money,
}

/// Expense totals per category, in order of first appearance. Income is
/// ignored.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryAmount> {
    let mut totals: Vec<CategoryAmount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        match positions.get(tx.category.as_str()) {
            Some(&index) => {
                totals[index].amount = totals[index].amount.saturating_add(tx.amount);
            }
            None => {
                positions.insert(tx.category.as_str(), totals.len());
                totals.push(CategoryAmount {
                    category: tx.category.clone(),
                    amount: tx.amount,
                });
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransactionKind;

    fn budget(category: &str, limit: i64, spent: i64) -> Budget {
        Budget {
            id: 0,
            category: category.to_string(),
            month: "2024-01".to_string(),
            monthly_limit: Money::units(limit),
            spent: Money::units(spent),
            rollover: Money::ZERO,
        }
    }

    fn goal(current: i64, target: i64) -> SavingsGoal {
        SavingsGoal {
            id: 0,
            name: "goal".to_string(),
            target_amount: Money::units(target),
            current_amount: Money::units(current),
            deadline: None,
            priority: None,
            created_at: None,
        }
    }

    fn tx(kind: TransactionKind, category: &str, amount: i64) -> Transaction {
        Transaction {
            id: 0,
            amount: Money::units(amount),
            category: category.to_string(),
            date: "2024-01-10".to_string(),
            description: String::new(),
            notes: None,
            kind: Some(kind),
            created_at: None,
        }
    }

    #[test]
    fn budget_summary_matches_dashboard_example() {
        let summary =
            BudgetSummary::from_budgets(&[budget("Food", 500, 300), budget("Rent", 1000, 1000)]);
        assert_eq!(summary.total_budget, Money::units(1500));
        assert_eq!(summary.total_spent, Money::units(1300));
        assert_eq!(summary.remaining, Money::units(200));
        assert!((summary.percentage - 86.67).abs() < 0.01);
        assert_eq!(summary.categories, 2);
    }

    #[test]
    fn budget_summary_of_nothing_is_zero() {
        assert_eq!(BudgetSummary::from_budgets(&[]), BudgetSummary::default());
        let unbudgeted = BudgetSummary::from_budgets(&[budget("Misc", 0, 40)]);
        assert_eq!(unbudgeted.percentage, 0.0);
        assert_eq!(unbudgeted.remaining, Money::units(-40));
    }

    #[test]
    fn goals_partition_into_active_and_completed() {
        let goals = [goal(100, 100), goal(50, 200), goal(0, 0), goal(10, 5)];
        let summary = GoalsSummary::from_goals(&goals);
        assert_eq!(summary.completed_goals_count, 3);
        assert_eq!(summary.active_goals_count, 1);
        assert_eq!(
            summary.active_goals_count + summary.completed_goals_count,
            summary.total_goals_count
        );
        assert_eq!(summary.total_target_amount, Money::units(305));
        assert_eq!(summary.total_current_amount, Money::units(160));
        assert_eq!(summary.total_remaining, Money::units(145));
    }

    #[test]
    fn summaries_clamp_out_of_range_totals() {
        let huge = Money::new(50_000_000_000_000_000);
        let mut big = goal(0, 0);
        big.target_amount = huge;
        let summary = GoalsSummary::from_goals(&[big.clone(), big.clone(), big]);
        assert_eq!(summary.total_target_amount, Money::new(i64::MAX));
        assert_eq!(summary.total_remaining, Money::new(i64::MAX));

        let mut over = budget("Food", 0, 0);
        over.spent = huge;
        let budgets = BudgetSummary::from_budgets(&[over.clone(), over.clone(), over]);
        assert_eq!(budgets.remaining, Money::new(-i64::MAX));

        let mut expense = tx(TransactionKind::Expense, "Food", 0);
        expense.amount = huge;
        let breakdown = category_breakdown(&[expense.clone(), expense.clone(), expense]);
        assert_eq!(breakdown[0].amount, Money::new(i64::MAX));
    }

    #[test]
    fn goals_summary_of_nothing_is_zero() {
        assert_eq!(GoalsSummary::from_goals(&[]), GoalsSummary::default());
    }

    #[test]
    fn trend_point_splits_by_kind() {
        let month = MonthKey::parse("2024-01").unwrap();
        let point = TrendPoint::from_transactions(
            month,
            &[
                tx(TransactionKind::Income, "Salary", 1000),
                tx(TransactionKind::Expense, "Food", 70),
                tx(TransactionKind::Expense, "Rent", 400),
            ],
        );
        assert_eq!(point.income, Money::units(1000));
        assert_eq!(point.expenses, Money::units(470));
        assert_eq!(point.net, Money::units(530));
    }

    #[test]
    fn breakdown_sums_expenses_per_category() {
        let breakdown = category_breakdown(&[
            tx(TransactionKind::Expense, "Food", 50),
            tx(TransactionKind::Expense, "Food", 20),
            tx(TransactionKind::Income, "", 1000),
        ]);
        assert_eq!(
            breakdown,
            vec![CategoryAmount {
                category: "Food".to_string(),
                amount: Money::units(70),
            }]
        );
    }

    #[test]
    fn breakdown_keeps_first_appearance_order() {
        let breakdown = category_breakdown(&[
            tx(TransactionKind::Expense, "Rent", 400),
            tx(TransactionKind::Expense, "Food", 10),
            tx(TransactionKind::Expense, "Rent", 1),
        ]);
        let categories: Vec<&str> = breakdown.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, vec!["Rent", "Food"]);
        assert_eq!(breakdown[0].amount, Money::units(401));
    }
}

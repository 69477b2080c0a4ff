//! Personal finance engine.
//!
//! Maps the four collections of the hosted record store (transactions,
//! budgets, categories and savings goals) to typed entities and computes the
//! dashboard aggregates on top of them. Storage lives behind [`RecordStore`];
//! user-facing failures go to a [`Notifier`].

pub use budgets::{Budget, BudgetChanges, NewBudget};
pub use categories::{Category, CategoryChanges, NewCategory};
pub use compat::Compat;
pub use error::EngineError;
pub use money::Money;
pub use month::MonthKey;
pub use notify::{DEFAULT_NOTIFICATION_CAPACITY, LogNotifier, Notifier, RecordingNotifier};
pub use ops::{Engine, EngineBuilder};
pub use savings_goals::{NewSavingsGoal, SavingsGoal, SavingsGoalChanges};
pub use store::{RecordStore, StoreError, StoreFuture, memory::MemoryStore};
pub use summary::{BudgetSummary, CategoryAmount, GoalsSummary, TrendPoint, category_breakdown};
pub use transactions::{NewTransaction, Transaction, TransactionChanges, TransactionKind};

pub mod categories;
pub mod store;

mod budgets;
mod compat;
mod error;
mod money;
mod month;
mod notify;
mod ops;
mod record;
mod savings_goals;
mod summary;
mod transactions;

pub type ResultEngine<T> = Result<T, EngineError>;

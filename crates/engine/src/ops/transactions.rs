use api_types::records::{OrderBy, Record, Where};

use crate::{
    MonthKey, NewTransaction, ResultEngine, Transaction, TransactionChanges,
    month::validate_date, transactions,
};

use super::{Engine, Notify};

impl Engine {
    /// All transactions, newest first.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        self.fetch_all(
            Vec::new(),
            vec![OrderBy::desc(transactions::DATE)],
            Notify::Yes,
        )
        .await
    }

    pub async fn transaction(&self, id: i64) -> ResultEngine<Option<Transaction>> {
        self.fetch_by_id(id).await
    }

    /// Transactions dated within `month`, newest first.
    pub async fn transactions_by_month(&self, month: MonthKey) -> ResultEngine<Vec<Transaction>> {
        self.fetch_all(
            vec![Where::starts_with(transactions::DATE, &month.to_string())],
            vec![OrderBy::desc(transactions::DATE)],
            Notify::No,
        )
        .await
    }

    pub async fn transactions_by_category(
        &self,
        category: &str,
    ) -> ResultEngine<Vec<Transaction>> {
        self.fetch_all(
            vec![Where::equal_to(transactions::CATEGORY, category)],
            Vec::new(),
            Notify::No,
        )
        .await
    }

    pub async fn create_transaction(&self, new: &NewTransaction) -> ResultEngine<Transaction> {
        validate_date(&new.date)?;
        self.create_one(Record::from(new)).await
    }

    pub async fn update_transaction(
        &self,
        id: i64,
        changes: &TransactionChanges,
    ) -> ResultEngine<Transaction> {
        if let Some(date) = &changes.date {
            validate_date(date)?;
        }
        self.update_one(changes.to_record(id)).await
    }

    pub async fn delete_transaction(&self, id: i64) -> ResultEngine<()> {
        self.delete_one::<Transaction>(id).await
    }
}


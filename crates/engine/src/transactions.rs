//! Income and expense transactions (`transaction_c`).

use api_types::records::Record;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, Money,
    record::{CREATED_ON_FIELD, Entity, Fields, NAME_FIELD, RecordWriter},
};

pub(crate) const AMOUNT: &str = "amount_c";
pub(crate) const CATEGORY: &str = "category_c";
pub(crate) const DATE: &str = "date_c";
pub(crate) const DESCRIPTION: &str = "description_c";
pub(crate) const NOTES: &str = "notes_c";
pub(crate) const TYPE: &str = "type_c";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidRecord(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

/// A transaction as the dashboard sees it.
///
/// `kind` is `None` when the stored type is missing or unknown; such rows are
/// listed but never counted as income or expense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: Money,
    pub category: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub description: String,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub created_at: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == Some(TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Some(TransactionKind::Expense)
    }
}

impl Entity for Transaction {
    const COLLECTION: &'static str = "transaction_c";
    const LABEL: &'static str = "transactions";
    const FIELDS: &'static [&'static str] = &[
        NAME_FIELD,
        AMOUNT,
        CATEGORY,
        DATE,
        DESCRIPTION,
        NOTES,
        TYPE,
        CREATED_ON_FIELD,
    ];
}

impl TryFrom<Record> for Transaction {
    type Error = EngineError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let fields = Fields(&record);
        let kind = fields
            .text(TYPE)
            .and_then(|raw| TransactionKind::try_from(raw.as_str()).ok());
        Ok(Self {
            id: fields.id()?,
            amount: fields.money(AMOUNT),
            category: fields.text(CATEGORY).unwrap_or_default(),
            date: fields.text(DATE).unwrap_or_default(),
            description: fields.text_or(DESCRIPTION, NAME_FIELD).unwrap_or_default(),
            notes: fields.text(NOTES),
            kind,
            created_at: fields.text(CREATED_ON_FIELD),
        })
    }
}

/// Input of [`Engine::create_transaction`](crate::Engine::create_transaction).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Money,
    pub category: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl From<&NewTransaction> for Record {
    fn from(new: &NewTransaction) -> Self {
        RecordWriter::new()
            .set(NAME_FIELD, new.description.as_str())
            .set(AMOUNT, new.amount)
            .set(CATEGORY, new.category.as_str())
            .set(DATE, new.date.as_str())
            .set(DESCRIPTION, new.description.as_str())
            .set(NOTES, new.notes.as_deref().unwrap_or_default())
            .set(TYPE, new.kind.as_str())
            .build()
    }
}

/// Partial update: only `Some` fields reach the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionChanges {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
}

impl TransactionChanges {
    pub(crate) fn to_record(&self, id: i64) -> Record {
        RecordWriter::with_id(id)
            .set_opt(NAME_FIELD, self.description.as_deref())
            .set_opt(DESCRIPTION, self.description.as_deref())
            .set_opt(AMOUNT, self.amount)
            .set_opt(CATEGORY, self.category.as_deref())
            .set_opt(DATE, self.date.as_deref())
            .set_opt(NOTES, self.notes.as_deref())
            .set_opt(TYPE, self.kind.map(TransactionKind::as_str))
            .build()
    }
}

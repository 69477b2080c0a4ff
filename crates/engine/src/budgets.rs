//! Monthly category budgets (`budget_c`).

use api_types::records::Record;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    EngineError, Money, MonthKey,
    record::{Entity, Fields, NAME_FIELD, RecordWriter},
};

pub(crate) const CATEGORY: &str = "category_c";
pub(crate) const MONTH: &str = "month_c";
pub(crate) const MONTHLY_LIMIT: &str = "monthly_limit_c";
pub(crate) const SPENT: &str = "spent_c";
pub(crate) const ROLLOVER: &str = "rollover_c";

/// Spending cap for one category in one month.
///
/// The store is assumed to hold at most one budget per `(category, month)`.
/// Serializes with the derived `remaining` and `percentage` alongside the
/// stored fields.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub category: String,
    /// `YYYY-MM` as stored.
    pub month: String,
    pub monthly_limit: Money,
    pub spent: Money,
    pub rollover: Money,
}

impl Budget {
    pub fn remaining(&self) -> Money {
        self.monthly_limit.saturating_sub(self.spent)
    }

    /// Spent share of the limit, `0.0` for a zero limit.
    pub fn percentage(&self) -> f64 {
        self.spent.percent_of(self.monthly_limit)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetView<'a> {
    id: i64,
    category: &'a str,
    month: &'a str,
    monthly_limit: Money,
    spent: Money,
    rollover: Money,
    remaining: Money,
    percentage: f64,
}

impl Serialize for Budget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BudgetView {
            id: self.id,
            category: &self.category,
            month: &self.month,
            monthly_limit: self.monthly_limit,
            spent: self.spent,
            rollover: self.rollover,
            remaining: self.remaining(),
            percentage: self.percentage(),
        }
        .serialize(serializer)
    }
}

impl Entity for Budget {
    const COLLECTION: &'static str = "budget_c";
    const LABEL: &'static str = "budgets";
    const FIELDS: &'static [&'static str] =
        &[NAME_FIELD, CATEGORY, MONTH, MONTHLY_LIMIT, SPENT, ROLLOVER];
}

impl TryFrom<Record> for Budget {
    type Error = EngineError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let fields = Fields(&record);
        Ok(Self {
            id: fields.id()?,
            category: fields.text(CATEGORY).unwrap_or_default(),
            month: fields.text(MONTH).unwrap_or_default(),
            monthly_limit: fields.money(MONTHLY_LIMIT),
            spent: fields.money(SPENT),
            rollover: fields.money(ROLLOVER),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: String,
    pub month: MonthKey,
    pub monthly_limit: Money,
}

/// New budgets start with nothing spent and no rollover.
impl From<&NewBudget> for Record {
    fn from(new: &NewBudget) -> Self {
        RecordWriter::new()
            .set(NAME_FIELD, new.category.as_str())
            .set(CATEGORY, new.category.as_str())
            .set(MONTH, new.month.to_string())
            .set(MONTHLY_LIMIT, new.monthly_limit)
            .set(SPENT, Money::ZERO)
            .set(ROLLOVER, Money::ZERO)
            .build()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetChanges {
    pub category: Option<String>,
    pub month: Option<MonthKey>,
    pub monthly_limit: Option<Money>,
    pub spent: Option<Money>,
    pub rollover: Option<Money>,
}

impl BudgetChanges {
    pub(crate) fn to_record(&self, id: i64) -> Record {
        RecordWriter::with_id(id)
            .set_opt(NAME_FIELD, self.category.as_deref())
            .set_opt(CATEGORY, self.category.as_deref())
            .set_opt(MONTH, self.month.map(String::from))
            .set_opt(MONTHLY_LIMIT, self.monthly_limit)
            .set_opt(SPENT, self.spent)
            .set_opt(ROLLOVER, self.rollover)
            .build()
    }
}

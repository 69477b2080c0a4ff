//! Savings goals (`savings_goal_c`).

use api_types::records::Record;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    EngineError, Money,
    record::{CREATED_ON_FIELD, Entity, Fields, NAME_FIELD, RecordWriter},
};

pub(crate) const NAME: &str = "name_c";
pub(crate) const TARGET_AMOUNT: &str = "target_amount_c";
pub(crate) const CURRENT_AMOUNT: &str = "current_amount_c";
pub(crate) const DEADLINE: &str = "deadline_c";
pub(crate) const PRIORITY: &str = "priority_c";

/// A savings target. Lists are ordered by ascending `priority`.
///
/// Serialized with `remaining`, `progress` and `completed` computed from
/// the two amounts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub deadline: Option<String>,
    pub priority: Option<i64>,
    pub created_at: Option<String>,
}

impl SavingsGoal {
    /// A goal is completed once the saved amount reaches the target.
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn remaining(&self) -> Money {
        self.target_amount.saturating_sub(self.current_amount)
    }

    pub fn progress(&self) -> f64 {
        self.current_amount.percent_of(self.target_amount)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavingsGoalView<'a> {
    id: i64,
    name: &'a str,
    target_amount: Money,
    current_amount: Money,
    deadline: Option<&'a str>,
    priority: Option<i64>,
    created_at: Option<&'a str>,
    remaining: Money,
    progress: f64,
    completed: bool,
}

impl Serialize for SavingsGoal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SavingsGoalView {
            id: self.id,
            name: &self.name,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            deadline: self.deadline.as_deref(),
            priority: self.priority,
            created_at: self.created_at.as_deref(),
            remaining: self.remaining(),
            progress: self.progress(),
            completed: self.is_completed(),
        }
        .serialize(serializer)
    }
}

impl Entity for SavingsGoal {
    const COLLECTION: &'static str = "savings_goal_c";
    const LABEL: &'static str = "savings goals";
    const FIELDS: &'static [&'static str] = &[
        NAME_FIELD,
        NAME,
        TARGET_AMOUNT,
        CURRENT_AMOUNT,
        DEADLINE,
        PRIORITY,
        CREATED_ON_FIELD,
    ];
}

impl TryFrom<Record> for SavingsGoal {
    type Error = EngineError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let fields = Fields(&record);
        Ok(Self {
            id: fields.id()?,
            name: fields.text_or(NAME, NAME_FIELD).unwrap_or_default(),
            target_amount: fields.money(TARGET_AMOUNT),
            current_amount: fields.money(CURRENT_AMOUNT),
            deadline: fields.text(DEADLINE),
            priority: fields.integer(PRIORITY),
            created_at: fields.text(CREATED_ON_FIELD),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
}

/// New goals start from zero saved.
impl From<&NewSavingsGoal> for Record {
    fn from(new: &NewSavingsGoal) -> Self {
        RecordWriter::new()
            .set(NAME_FIELD, new.name.as_str())
            .set(NAME, new.name.as_str())
            .set(TARGET_AMOUNT, new.target_amount)
            .set(CURRENT_AMOUNT, Money::ZERO)
            .set_opt(DEADLINE, new.deadline.as_deref())
            .set_opt(PRIORITY, new.priority)
            .build()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavingsGoalChanges {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub current_amount: Option<Money>,
    pub deadline: Option<String>,
    pub priority: Option<i64>,
}

impl SavingsGoalChanges {
    pub(crate) fn to_record(&self, id: i64) -> Record {
        RecordWriter::with_id(id)
            .set_opt(NAME_FIELD, self.name.as_deref())
            .set_opt(NAME, self.name.as_deref())
            .set_opt(TARGET_AMOUNT, self.target_amount)
            .set_opt(CURRENT_AMOUNT, self.current_amount)
            .set_opt(DEADLINE, self.deadline.as_deref())
            .set_opt(PRIORITY, self.priority)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn goal(current: i64, target: i64) -> SavingsGoal {
        SavingsGoal {
            id: 1,
            name: "Trip".to_string(),
            target_amount: Money::units(target),
            current_amount: Money::units(current),
            deadline: None,
            priority: Some(1),
            created_at: None,
        }
    }

    #[test]
    fn completion_is_inclusive() {
        assert!(goal(100, 100).is_completed());
        assert!(goal(120, 100).is_completed());
        assert!(!goal(99, 100).is_completed());
        assert_eq!(goal(25, 100).progress(), 25.0);
        assert_eq!(goal(0, 0).progress(), 0.0);
    }

    #[test]
    fn serializes_progress_with_the_goal() {
        let value = serde_json::to_value(goal(120, 100)).unwrap();
        assert_eq!(value["targetAmount"], json!(100));
        assert_eq!(value["remaining"], json!(-20));
        assert_eq!(value["progress"], json!(120.0));
        assert_eq!(value["completed"], json!(true));
        assert_eq!(value["deadline"], json!(null));
    }

    #[test]
    fn reads_priority_from_text() {
        let raw = match json!({"Id": 3, "name_c": "Car", "priority_c": "2", "target_amount_c": 5000}) {
            Value::Object(map) => map,
            _ => Record::new(),
        };
        let goal = SavingsGoal::try_from(raw).unwrap();
        assert_eq!(goal.priority, Some(2));
        assert_eq!(goal.current_amount, Money::ZERO);
        assert_eq!(goal.target_amount, Money::units(5000));
    }
}

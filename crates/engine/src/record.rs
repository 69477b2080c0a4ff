//! Internal helpers to read and write raw store records.
//!
//! These utilities are **not** part of the public API. Reads apply the
//! falsy-or-default rules of the backend (missing, `null`, empty and
//! unparseable values all fall back), writes only emit the fields a caller
//! actually provided.

use api_types::records::{Field, ID_FIELD, Record};
use serde_json::Value;

use crate::{EngineError, Money, ResultEngine};

/// Display name mirrored by the backend on every collection.
pub(crate) const NAME_FIELD: &str = "Name";
pub(crate) const CREATED_ON_FIELD: &str = "CreatedOn";

/// A domain type stored in one collection of the record store.
pub(crate) trait Entity: TryFrom<Record, Error = EngineError> {
    /// Backend collection name.
    const COLLECTION: &'static str;
    /// Plural label for log lines.
    const LABEL: &'static str;
    /// Projection requested on every read.
    const FIELDS: &'static [&'static str];

    fn fields() -> Vec<Field> {
        Self::FIELDS.iter().map(|name| Field::named(name)).collect()
    }
}

/// Read-only view over a raw record.
pub(crate) struct Fields<'a>(pub(crate) &'a Record);

impl Fields<'_> {
    pub(crate) fn id(&self) -> ResultEngine<i64> {
        let value = self
            .0
            .get(ID_FIELD)
            .ok_or_else(|| EngineError::InvalidRecord("record without Id".to_string()))?;
        match value {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| EngineError::InvalidRecord(format!("invalid Id: {value}")))
    }

    /// Amount field, `0` when absent or unreadable.
    pub(crate) fn money(&self, name: &str) -> Money {
        self.0
            .get(name)
            .and_then(Money::from_value)
            .unwrap_or_default()
    }

    /// Non-empty text field. Numbers are rendered as text.
    pub(crate) fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    /// `primary`, falling back to `fallback` when `primary` is empty.
    pub(crate) fn text_or(&self, primary: &str, fallback: &str) -> Option<String> {
        self.text(primary).or_else(|| self.text(fallback))
    }

    pub(crate) fn flag(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => text.eq_ignore_ascii_case("true"),
            Some(Value::Number(number)) => number.as_i64().is_some_and(|n| n != 0),
            _ => false,
        }
    }

    pub(crate) fn integer(&self, name: &str) -> Option<i64> {
        match self.0.get(name)? {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f.round() as i64)),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Builder for write payloads; `None` values are skipped entirely.
#[derive(Debug, Default)]
pub(crate) struct RecordWriter(Record);

impl RecordWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_id(id: i64) -> Self {
        let mut writer = Self::new();
        writer.0.insert(ID_FIELD.to_string(), Value::from(id));
        writer
    }

    pub(crate) fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub(crate) fn set_opt(self, name: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    pub(crate) fn build(self) -> Record {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => Record::new(),
        }
    }

    #[test]
    fn id_accepts_numbers_and_numeric_strings() {
        assert_eq!(Fields(&record(json!({"Id": 7}))).id().unwrap(), 7);
        assert_eq!(Fields(&record(json!({"Id": "8"}))).id().unwrap(), 8);
        assert!(Fields(&record(json!({"Id": "x"}))).id().is_err());
        assert!(Fields(&record(json!({}))).id().is_err());
    }

    #[test]
    fn empty_text_falls_back() {
        let raw = record(json!({"name_c": "", "Name": "Groceries"}));
        assert_eq!(
            Fields(&raw).text_or("name_c", NAME_FIELD).as_deref(),
            Some("Groceries")
        );
    }

    #[test]
    fn money_defaults_to_zero() {
        let raw = record(json!({"spent_c": null, "monthly_limit_c": "abc"}));
        assert_eq!(Fields(&raw).money("spent_c"), Money::ZERO);
        assert_eq!(Fields(&raw).money("monthly_limit_c"), Money::ZERO);
        assert_eq!(Fields(&raw).money("rollover_c"), Money::ZERO);
    }

    #[test]
    fn writer_skips_missing_values() {
        let built = RecordWriter::with_id(3)
            .set("spent_c", Money::units(40))
            .set_opt("month_c", None::<String>)
            .build();
        assert_eq!(Value::Object(built), json!({"Id": 3, "spent_c": 40}));
    }
}

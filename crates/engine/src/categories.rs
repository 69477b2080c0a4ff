//! Spending categories (`category_c`).

use api_types::records::Record;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    record::{Entity, Fields, NAME_FIELD, RecordWriter},
};

pub(crate) const NAME: &str = "name_c";
pub(crate) const COLOR: &str = "color_c";
pub(crate) const ICON: &str = "icon_c";
pub(crate) const IS_CUSTOM: &str = "is_custom_c";

pub const DEFAULT_COLOR: &str = "#6b7280";
pub const DEFAULT_ICON: &str = "Tag";

/// A category. Built-in categories (`is_custom == false`) cannot be deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub is_custom: bool,
}

impl Entity for Category {
    const COLLECTION: &'static str = "category_c";
    const LABEL: &'static str = "categories";
    const FIELDS: &'static [&'static str] = &[NAME_FIELD, NAME, COLOR, ICON, IS_CUSTOM];
}

impl TryFrom<Record> for Category {
    type Error = EngineError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let fields = Fields(&record);
        Ok(Self {
            id: fields.id()?,
            name: fields.text_or(NAME, NAME_FIELD).unwrap_or_default(),
            color: fields
                .text(COLOR)
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: fields.text(ICON).unwrap_or_else(|| DEFAULT_ICON.to_string()),
            is_custom: fields.flag(IS_CUSTOM),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Categories created through the engine are always custom.
impl From<&NewCategory> for Record {
    fn from(new: &NewCategory) -> Self {
        RecordWriter::new()
            .set(NAME_FIELD, new.name.as_str())
            .set(NAME, new.name.as_str())
            .set_opt(COLOR, new.color.as_deref())
            .set_opt(ICON, new.icon.as_deref())
            .set(IS_CUSTOM, true)
            .build()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_custom: Option<bool>,
}

impl CategoryChanges {
    pub(crate) fn to_record(&self, id: i64) -> Record {
        RecordWriter::with_id(id)
            .set_opt(NAME_FIELD, self.name.as_deref())
            .set_opt(NAME, self.name.as_deref())
            .set_opt(COLOR, self.color.as_deref())
            .set_opt(ICON, self.icon.as_deref())
            .set_opt(IS_CUSTOM, self.is_custom)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn display_fields_get_defaults() {
        let raw = match json!({"Id": 1, "Name": "Food"}) {
            Value::Object(map) => map,
            _ => Record::new(),
        };
        let category = Category::try_from(raw).unwrap();
        assert_eq!(category.name, "Food");
        assert_eq!(category.color, DEFAULT_COLOR);
        assert_eq!(category.icon, DEFAULT_ICON);
        assert!(!category.is_custom);
    }

    #[test]
    fn created_categories_are_custom() {
        let new = NewCategory {
            name: "Pets".to_string(),
            color: None,
            icon: Some("Dog".to_string()),
        };
        assert_eq!(
            Value::Object(Record::from(&new)),
            json!({"Name": "Pets", "name_c": "Pets", "icon_c": "Dog", "is_custom_c": true})
        );
    }
}

//! Wire types shared by the engine, the record store adapters and the HTTP
//! API.
//!
//! [`records`] mirrors the JSON contract of the hosted record store, field
//! names included. [`dashboard`] holds request bodies accepted by the server.

pub mod records {
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};

    /// A raw stored item. Keys are backend field names (`Id`, `Name`,
    /// `amount_c`, ...).
    pub type Record = Map<String, Value>;

    /// Key of the store-assigned identifier inside a [`Record`].
    pub const ID_FIELD: &str = "Id";

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FieldName {
        #[serde(rename = "Name")]
        pub name: String,
    }

    /// One entry of a field projection: `{"field": {"Name": "amount_c"}}`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Field {
        pub field: FieldName,
    }

    impl Field {
        pub fn named(name: &str) -> Self {
            Self {
                field: FieldName {
                    name: name.to_string(),
                },
            }
        }

        pub fn name(&self) -> &str {
            &self.field.name
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Operator {
        EqualTo,
        StartsWith,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Where {
        #[serde(rename = "FieldName")]
        pub field_name: String,
        #[serde(rename = "Operator")]
        pub operator: Operator,
        #[serde(rename = "Values")]
        pub values: Vec<Value>,
    }

    impl Where {
        pub fn equal_to(field_name: &str, value: impl Into<Value>) -> Self {
            Self {
                field_name: field_name.to_string(),
                operator: Operator::EqualTo,
                values: vec![value.into()],
            }
        }

        pub fn starts_with(field_name: &str, prefix: &str) -> Self {
            Self {
                field_name: field_name.to_string(),
                operator: Operator::StartsWith,
                values: vec![Value::String(prefix.to_string())],
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum SortType {
        Asc,
        Desc,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct OrderBy {
        #[serde(rename = "fieldName")]
        pub field_name: String,
        pub sorttype: SortType,
    }

    impl OrderBy {
        pub fn asc(field_name: &str) -> Self {
            Self {
                field_name: field_name.to_string(),
                sorttype: SortType::Asc,
            }
        }

        pub fn desc(field_name: &str) -> Self {
            Self {
                field_name: field_name.to_string(),
                sorttype: SortType::Desc,
            }
        }
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct FetchParams {
        pub fields: Vec<Field>,
        #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
        pub filters: Vec<Where>,
        #[serde(rename = "orderBy", default, skip_serializing_if = "Vec::is_empty")]
        pub order_by: Vec<OrderBy>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GetParams {
        pub fields: Vec<Field>,
    }

    /// Body of a by-id lookup when the store is reached over HTTP.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GetRequest {
        #[serde(rename = "Id")]
        pub id: i64,
        pub fields: Vec<Field>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct FetchResponse {
        pub success: bool,
        #[serde(default)]
        pub data: Option<Vec<Record>>,
        #[serde(default)]
        pub message: Option<String>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct GetResponse {
        pub success: bool,
        #[serde(default)]
        pub data: Option<Record>,
        #[serde(default)]
        pub message: Option<String>,
    }

    /// Batch body for create and update. Update records must carry `Id`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct MutationParams {
        pub records: Vec<Record>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct RecordResult {
        pub success: bool,
        #[serde(default)]
        pub data: Option<Record>,
        #[serde(default)]
        pub message: Option<String>,
    }

    /// Response of create, update and delete. Delete results carry no `data`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct MutationResponse {
        pub success: bool,
        #[serde(default)]
        pub results: Option<Vec<RecordResult>>,
        #[serde(default)]
        pub message: Option<String>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DeleteParams {
        #[serde(rename = "RecordIds")]
        pub record_ids: Vec<i64>,
    }
}

pub mod dashboard {
    use serde::{Deserialize, Serialize};
    use serde_json::Number;

    /// Overwrite the `spent` figure of the budget for `(category, month)`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SpentUpdate {
        pub category: String,
        pub month: String,
        pub amount: Number,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContributionNew {
        pub amount: Number,
    }

    /// Trend window. `months` is a comma separated list of `YYYY-MM` keys,
    /// `last` a count of months ending with the current one. At most one of
    /// the two may be given.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TrendQuery {
        pub months: Option<String>,
        pub last: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub error: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Deleted {
        pub deleted: bool,
    }
}

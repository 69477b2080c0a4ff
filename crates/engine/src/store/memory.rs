//! In-process [`RecordStore`] with the query semantics the engine relies on:
//! field projection, `EqualTo`/`StartsWith` filters and single-field sorts.

use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use api_types::records::{
    DeleteParams, FetchParams, FetchResponse, Field, GetParams, GetResponse, ID_FIELD,
    MutationParams, MutationResponse, Operator, Record, RecordResult, SortType, Where,
};
use chrono::Utc;
use serde_json::Value;

use super::{RecordStore, StoreError, StoreFuture};

/// Store-managed creation timestamp.
pub const CREATED_ON_FIELD: &str = "CreatedOn";

#[derive(Debug, Default)]
struct State {
    collections: HashMap<String, Vec<Record>>,
    next_id: i64,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record as-is, assigning an `Id` when it has none.
    pub fn insert(&self, collection: &str, mut record: Record) -> Result<i64, StoreError> {
        let mut state = self.lock()?;
        let id = match record.get(ID_FIELD).and_then(Value::as_i64) {
            Some(id) => {
                state.next_id = state.next_id.max(id);
                id
            }
            None => state.allocate_id(),
        };
        record.insert(ID_FIELD.to_string(), Value::from(id));
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
        Ok(id)
    }

    /// Full copy of a stored record, without projection.
    pub fn record(&self, collection: &str, id: i64) -> Result<Option<Record>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned())
    }

    pub fn len(&self, collection: &str) -> Result<usize, StoreError> {
        let state = self.lock()?;
        Ok(state.collections.get(collection).map_or(0, Vec::len))
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn fetch(&self, collection: &str, params: &FetchParams) -> Result<FetchResponse, StoreError> {
        let state = self.lock()?;
        let mut matching: Vec<&Record> = state
            .collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| params.filters.iter().all(|w| matches(w, record)))
                    .collect()
            })
            .unwrap_or_default();

        // Stable sort, so with several keys the first one wins.
        for order in params.order_by.iter().rev() {
            matching.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.field_name), b.get(&order.field_name));
                match order.sorttype {
                    SortType::Asc => ordering,
                    SortType::Desc => ordering.reverse(),
                }
            });
        }

        let data = matching
            .into_iter()
            .map(|record| project(record, &params.fields))
            .collect();
        Ok(FetchResponse {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    fn get(&self, collection: &str, id: i64, params: &GetParams) -> Result<GetResponse, StoreError> {
        let state = self.lock()?;
        let data = state
            .collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .map(|record| project(record, &params.fields));
        Ok(GetResponse {
            success: true,
            data,
            message: None,
        })
    }

    fn create(&self, collection: &str, params: &MutationParams) -> Result<MutationResponse, StoreError> {
        let mut state = self.lock()?;
        let mut results = Vec::with_capacity(params.records.len());
        for record in &params.records {
            let id = state.allocate_id();
            let mut stored = record.clone();
            stored.insert(ID_FIELD.to_string(), Value::from(id));
            stored.insert(
                CREATED_ON_FIELD.to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
            state
                .collections
                .entry(collection.to_string())
                .or_default()
                .push(stored.clone());
            results.push(RecordResult {
                success: true,
                data: Some(stored),
                message: None,
            });
        }
        Ok(batch_response(results))
    }

    fn update(&self, collection: &str, params: &MutationParams) -> Result<MutationResponse, StoreError> {
        let mut state = self.lock()?;
        let records = state.collections.entry(collection.to_string()).or_default();
        let results = params
            .records
            .iter()
            .map(|changes| {
                let Some(id) = record_id(changes) else {
                    return failed("Id is required for update".to_string());
                };
                let Some(stored) = records.iter_mut().find(|r| record_id(r) == Some(id)) else {
                    return failed(format!("Record {id} does not exist"));
                };
                for (key, value) in changes {
                    if key != ID_FIELD {
                        stored.insert(key.clone(), value.clone());
                    }
                }
                RecordResult {
                    success: true,
                    data: Some(stored.clone()),
                    message: None,
                }
            })
            .collect();
        Ok(batch_response(results))
    }

    fn delete(&self, collection: &str, params: &DeleteParams) -> Result<MutationResponse, StoreError> {
        let mut state = self.lock()?;
        let records = state.collections.entry(collection.to_string()).or_default();
        let results = params
            .record_ids
            .iter()
            .map(|id| match records.iter().position(|r| record_id(r) == Some(*id)) {
                Some(index) => {
                    records.remove(index);
                    RecordResult {
                        success: true,
                        data: None,
                        message: None,
                    }
                }
                None => failed(format!("Record {id} does not exist")),
            })
            .collect();
        Ok(batch_response(results))
    }
}

impl RecordStore for MemoryStore {
    fn fetch_records<'a>(
        &'a self,
        collection: &'a str,
        params: &'a FetchParams,
    ) -> StoreFuture<'a, FetchResponse> {
        Box::pin(async move { self.fetch(collection, params) })
    }

    fn get_record_by_id<'a>(
        &'a self,
        collection: &'a str,
        id: i64,
        params: &'a GetParams,
    ) -> StoreFuture<'a, GetResponse> {
        Box::pin(async move { self.get(collection, id, params) })
    }

    fn create_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a MutationParams,
    ) -> StoreFuture<'a, MutationResponse> {
        Box::pin(async move { self.create(collection, params) })
    }

    fn update_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a MutationParams,
    ) -> StoreFuture<'a, MutationResponse> {
        Box::pin(async move { self.update(collection, params) })
    }

    fn delete_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a DeleteParams,
    ) -> StoreFuture<'a, MutationResponse> {
        Box::pin(async move { self.delete(collection, params) })
    }
}

fn record_id(record: &Record) -> Option<i64> {
    record.get(ID_FIELD).and_then(Value::as_i64)
}

fn failed(message: String) -> RecordResult {
    RecordResult {
        success: false,
        data: None,
        message: Some(message),
    }
}

fn batch_response(results: Vec<RecordResult>) -> MutationResponse {
    MutationResponse {
        success: true,
        results: Some(results),
        message: None,
    }
}

/// Keeps `Id` plus the requested fields; an empty projection keeps everything.
fn project(record: &Record, fields: &[Field]) -> Record {
    if fields.is_empty() {
        return record.clone();
    }
    record
        .iter()
        .filter(|(key, _)| key.as_str() == ID_FIELD || fields.iter().any(|f| f.name() == key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn matches(filter: &Where, record: &Record) -> bool {
    let Some(value) = record.get(&filter.field_name) else {
        return false;
    };
    match filter.operator {
        Operator::EqualTo => filter
            .values
            .iter()
            .any(|candidate| compare_values(Some(value), Some(candidate)) == Ordering::Equal),
        Operator::StartsWith => {
            let Some(text) = value.as_str() else {
                return false;
            };
            filter
                .values
                .iter()
                .filter_map(Value::as_str)
                .any(|prefix| text.starts_with(prefix))
        }
    }
}

/// Missing and null values sort first, numbers compare numerically, strings
/// lexicographically.
fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    let left = left.filter(|v| !v.is_null());
    let right = right.filter(|v| !v.is_null());
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or_default();
            let b = b.as_f64().unwrap_or_default();
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}

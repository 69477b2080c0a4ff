//! The record store seam.
//!
//! The hosted backend is an opaque CRUD store addressed by collection name.
//! The engine only talks to it through [`RecordStore`], so any transport (the
//! HTTP adapter, the in-memory store used in tests) can be injected when the
//! [`Engine`](crate::Engine) is built.

use std::{future::Future, pin::Pin};

use api_types::records::{
    DeleteParams, FetchParams, FetchResponse, GetParams, GetResponse, MutationParams,
    MutationResponse,
};
use thiserror::Error;

pub mod memory;

/// Boxed future returned by every [`RecordStore`] call.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Transport-level failures. A reachable store that refuses a request answers
/// with `success: false` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed store response: {0}")]
    Decode(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD contract of the hosted record store.
pub trait RecordStore: Send + Sync {
    fn fetch_records<'a>(
        &'a self,
        collection: &'a str,
        params: &'a FetchParams,
    ) -> StoreFuture<'a, FetchResponse>;

    fn get_record_by_id<'a>(
        &'a self,
        collection: &'a str,
        id: i64,
        params: &'a GetParams,
    ) -> StoreFuture<'a, GetResponse>;

    fn create_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a MutationParams,
    ) -> StoreFuture<'a, MutationResponse>;

    /// Every record in `params` must carry its `Id`; other keys are the fields
    /// to overwrite.
    fn update_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a MutationParams,
    ) -> StoreFuture<'a, MutationResponse>;

    fn delete_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a DeleteParams,
    ) -> StoreFuture<'a, MutationResponse>;
}

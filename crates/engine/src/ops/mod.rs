use std::sync::Arc;

use api_types::records::{
    DeleteParams, FetchParams, GetParams, MutationParams, MutationResponse, OrderBy, Record,
    RecordResult, Where,
};

use crate::{
    EngineError, Money, ResultEngine,
    notify::{LogNotifier, Notifier},
    record::Entity,
    store::RecordStore,
};

mod budgets;
mod categories;
mod savings_goals;
mod stats;
mod transactions;

/// Whether a refused request should reach the notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Notify {
    Yes,
    No,
}

/// Entry point of the finance engine.
///
/// Holds no data of its own: every call fetches a fresh snapshot from the
/// injected [`RecordStore`].
#[derive(Clone)]
pub struct Engine {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn fetch_all<E: Entity>(
        &self,
        filters: Vec<Where>,
        order_by: Vec<OrderBy>,
        notify: Notify,
    ) -> ResultEngine<Vec<E>> {
        let params = FetchParams {
            fields: E::fields(),
            filters,
            order_by,
        };
        let response = self
            .store
            .fetch_records(E::COLLECTION, &params)
            .await
            .inspect_err(|err| tracing::error!("error fetching {}: {err}", E::LABEL))?;

        if !response.success {
            let message = refusal_message(response.message);
            tracing::error!("fetching {} refused: {message}", E::LABEL);
            if notify == Notify::Yes {
                self.notifier.error(&message);
            }
            return Err(EngineError::Rejected(message));
        }

        response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(E::try_from)
            .collect()
    }

    async fn fetch_by_id<E: Entity>(&self, id: i64) -> ResultEngine<Option<E>> {
        let params = GetParams {
            fields: E::fields(),
        };
        let response = self
            .store
            .get_record_by_id(E::COLLECTION, id, &params)
            .await
            .inspect_err(|err| tracing::error!("error fetching {} {id}: {err}", E::LABEL))?;

        if !response.success {
            let message = refusal_message(response.message);
            tracing::error!("fetching {} {id} refused: {message}", E::LABEL);
            return Err(EngineError::Rejected(message));
        }

        response.data.map(E::try_from).transpose()
    }

    async fn create_one<E: Entity>(&self, record: Record) -> ResultEngine<E> {
        let params = MutationParams {
            records: vec![record],
        };
        let response = self
            .store
            .create_record(E::COLLECTION, &params)
            .await
            .inspect_err(|err| tracing::error!("error creating {}: {err}", E::LABEL))?;
        let created = self.settle_batch(response, "create", E::LABEL)?;
        first_entity(created)
    }

    async fn update_one<E: Entity>(&self, record: Record) -> ResultEngine<E> {
        let params = MutationParams {
            records: vec![record],
        };
        let response = self
            .store
            .update_record(E::COLLECTION, &params)
            .await
            .inspect_err(|err| tracing::error!("error updating {}: {err}", E::LABEL))?;
        let updated = self.settle_batch(response, "update", E::LABEL)?;
        first_entity(updated)
    }

    async fn delete_one<E: Entity>(&self, id: i64) -> ResultEngine<()> {
        let params = DeleteParams {
            record_ids: vec![id],
        };
        let response = self
            .store
            .delete_record(E::COLLECTION, &params)
            .await
            .inspect_err(|err| tracing::error!("error deleting {}: {err}", E::LABEL))?;
        self.settle_batch(response, "delete", E::LABEL).map(|_| ())
    }

    /// Splits a batch answer into its successful results.
    ///
    /// A refused batch is notified once; otherwise every failed record that
    /// carries a message is notified on its own. Fails when nothing succeeded.
    fn settle_batch(
        &self,
        response: MutationResponse,
        action: &str,
        label: &str,
    ) -> ResultEngine<Vec<RecordResult>> {
        if !response.success {
            let message = refusal_message(response.message);
            tracing::error!("{action} {label} refused: {message}");
            self.notifier.error(&message);
            return Err(EngineError::Rejected(message));
        }

        let Some(results) = response.results else {
            return Err(EngineError::Rejected(format!(
                "record store returned no results for {action} {label}"
            )));
        };

        let (successful, failed): (Vec<_>, Vec<_>) =
            results.into_iter().partition(|result| result.success);

        if !failed.is_empty() {
            tracing::error!("failed to {action} {} {label}: {failed:?}", failed.len());
            for message in failed.iter().filter_map(|result| result.message.as_deref()) {
                self.notifier.error(message);
            }
        }

        if successful.is_empty() {
            let message = failed
                .into_iter()
                .filter_map(|result| result.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(EngineError::Rejected(if message.is_empty() {
                format!("failed to {action} {label}")
            } else {
                message
            }));
        }

        Ok(successful)
    }
}

/// Limits, targets and saved amounts can't go below zero.
fn ensure_non_negative(amount: Money, label: &str) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be >= 0, got {amount}"
        )));
    }
    Ok(())
}

pub(crate) fn contribution_overflow() -> EngineError {
    EngineError::InvalidAmount("contribution overflows the saved amount".to_string())
}

fn refusal_message(message: Option<String>) -> String {
    message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "record store request failed".to_string())
}

fn first_entity<E: Entity>(results: Vec<RecordResult>) -> ResultEngine<E> {
    results
        .into_iter()
        .next()
        .and_then(|result| result.data)
        .ok_or_else(|| EngineError::InvalidRecord(format!("{} result without data", E::LABEL)))
        .and_then(E::try_from)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn RecordStore>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl EngineBuilder {
    /// Pass the required record store.
    pub fn store(mut self, store: Arc<dyn RecordStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Pass where user-facing failures go. Defaults to [`LogNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> EngineBuilder {
        self.notifier = Some(notifier);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let store = self
            .store
            .ok_or_else(|| EngineError::Configuration("record store is required".to_string()))?;
        Ok(Engine {
            store,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
        })
    }
}

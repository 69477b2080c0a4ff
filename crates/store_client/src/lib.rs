//! HTTP adapter for the hosted record store.
//!
//! Every operation is a `POST {base_url}/{collection}/{action}` with a JSON
//! body; the answer is the store's own `{success, ...}` envelope.

use std::time::Duration;

use api_types::records::{
    DeleteParams, FetchParams, FetchResponse, GetParams, GetRequest, GetResponse,
    MutationParams, MutationResponse,
};
use engine::{RecordStore, StoreError, StoreFuture};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base_url: {0}")]
    BaseUrl(String),
    #[error("http client error: {0}")]
    Build(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

#[derive(Clone, Debug)]
pub struct RecordClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl RecordClient {
    /// `timeout` bounds each whole request; `None` waits indefinitely.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|err| ClientError::BaseUrl(err.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.is_empty()),
        })
    }

    fn url(&self, collection: &str, action: &str) -> String {
        format!("{}/{collection}/{action}", self.base_url)
    }

    async fn post_json<TReq, TResp>(
        &self,
        collection: &str,
        action: &str,
        body: &TReq,
    ) -> Result<TResp, StoreError>
    where
        TReq: Serialize + ?Sized,
        TResp: DeserializeOwned,
    {
        let url = self.url(collection, action);
        tracing::debug!("POST {url}");

        let mut req = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(transport_error)?;
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<TResp>()
                .await
                .map_err(|err| StoreError::Decode(err.to_string()));
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("server error")
                .to_string(),
        };
        tracing::warn!("record store answered {status} for {url}: {message}");
        Err(status_error(status, message))
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() || err.is_connect() {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Transport(err.to_string())
    }
}

fn status_error(status: StatusCode, message: String) -> StoreError {
    match status {
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            StoreError::Unavailable(message)
        }
        _ => StoreError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

impl RecordStore for RecordClient {
    fn fetch_records<'a>(
        &'a self,
        collection: &'a str,
        params: &'a FetchParams,
    ) -> StoreFuture<'a, FetchResponse> {
        Box::pin(self.post_json(collection, "fetch", params))
    }

    fn get_record_by_id<'a>(
        &'a self,
        collection: &'a str,
        id: i64,
        params: &'a GetParams,
    ) -> StoreFuture<'a, GetResponse> {
        Box::pin(async move {
            let body = GetRequest {
                id,
                fields: params.fields.clone(),
            };
            self.post_json(collection, "get", &body).await
        })
    }

    fn create_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a MutationParams,
    ) -> StoreFuture<'a, MutationResponse> {
        Box::pin(self.post_json(collection, "create", params))
    }

    fn update_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a MutationParams,
    ) -> StoreFuture<'a, MutationResponse> {
        Box::pin(self.post_json(collection, "update", params))
    }

    fn delete_record<'a>(
        &'a self,
        collection: &'a str,
        params: &'a DeleteParams,
    ) -> StoreFuture<'a, MutationResponse> {
        Box::pin(self.post_json(collection, "delete", params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_base_url() {
        let err = RecordClient::new("records.local", None, None).unwrap_err();
        assert!(matches!(err, ClientError::BaseUrl(_)));
    }

    #[test]
    fn builds_collection_urls() {
        let client = RecordClient::new("http://store.local/api/", None, None).unwrap();
        assert_eq!(
            client.url("budget_c", "fetch"),
            "http://store.local/api/budget_c/fetch"
        );
    }

    #[test]
    fn empty_token_is_ignored() {
        let client = RecordClient::new("http://store.local", Some(String::new()), None).unwrap();
        assert!(client.token.is_none());
    }

    #[test]
    fn maps_statuses() {
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, "down".to_string()),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "token".to_string()),
            StoreError::Status { status: 401, .. }
        ));
    }
}

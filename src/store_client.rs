use std::time::Duration;

use reqwest::{Client, Url};

use crate::domain::{AppData, NewReason};

/// HTTP client for the store service.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http_client: Client,
    base_url: Url,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreClientError {
    #[error("{0} cannot be used as a store base url")]
    InvalidBaseUrl(String),
    #[error("store request failed, reqwest error {0}")]
    Request(#[from] reqwest::Error),
}

impl StoreClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, StoreClientError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn parse(base_url: &str, timeout: Duration) -> Result<Self, StoreClientError> {
        let url = Url::parse(base_url)
            .map_err(|_| StoreClientError::InvalidBaseUrl(base_url.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(StoreClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Self::new(url, timeout)
    }

    #[tracing::instrument(name = "Fetching directory and reasons from the store", skip(self))]
    pub async fn fetch_data(&self) -> Result<AppData, StoreClientError> {
        let data = self
            .http_client
            .get(self.endpoint(&["data"])?)
            .send()
            .await?
            .error_for_status()?
            .json::<AppData>()
            .await?;
        Ok(data)
    }

    #[tracing::instrument(name = "Persisting a reason to the store", skip(self))]
    pub async fn add_reason(
        &self,
        reason: &str,
        add_to_signature_reasons: Option<bool>,
    ) -> Result<(), StoreClientError> {
        let body = NewReason {
            reason: reason.to_string(),
            add_to_signature_reasons,
        };
        self.http_client
            .post(self.endpoint(&["reasons"])?)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[tracing::instrument(name = "Deleting a reason from the store", skip(self))]
    pub async fn delete_reason(&self, reason: &str) -> Result<(), StoreClientError> {
        self.http_client
            .delete(self.endpoint(&["reasons", reason])?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

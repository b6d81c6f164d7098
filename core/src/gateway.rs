//! `RecordGateway`: one async method per record API operation.
//!
//! # Design
//! The gateway pairs a `RecordClient` with an injected `Transport`. Every
//! operation builds one request, hands it to the transport exactly once, and
//! parses whatever comes back. Nothing is cached, retried, or deduplicated,
//! and no state survives between calls, so a gateway can be shared freely
//! across tasks. Concurrent calls are independent; two overlapping
//! `update_by_id` calls for the same record resolve in whatever order the
//! server answers them.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::client::RecordClient;
use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError};

/// Async facade over the record API: one method per server operation.
///
/// Holds a `RecordClient` and the injected transport and nothing else. Result
/// and body types are generic so payloads pass through as the caller wants
/// them; the DTOs in `types` (`Record`, `NewRecord`, `CatalogRecord`) are the
/// usual choice, and `serde_json::Value` works for shapes they do not cover.
#[derive(Debug, Clone)]
pub struct RecordGateway<T> {
    client: RecordClient,
    transport: T,
}

impl<T: Transport> RecordGateway<T> {
    pub fn new(client: RecordClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn from_config(config: &GatewayConfig, transport: T) -> Result<Self, ApiError> {
        Ok(Self::new(RecordClient::new(&config.base_url)?, transport))
    }

    pub fn client(&self) -> &RecordClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute a prebuilt request and return the transport's response as is.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "dispatching request");
        let result = self.transport.execute(request).await;
        match &result {
            Ok(response) => debug!(status = response.status, "response received"),
            Err(error) => debug!(%error, "transport failed"),
        }
        result
    }

    /// Elements are usually `Record`.
    pub async fn list_by_collection<R: DeserializeOwned>(
        &self,
        collection_id: impl Display,
    ) -> Result<Vec<R>, ApiError> {
        let request = self.client.build_list_by_collection(collection_id)?;
        let response = self.send(request).await?;
        self.client.parse_list_by_collection(response)
    }

    /// Elements are usually `Record`.
    pub async fn list_by_user<R: DeserializeOwned>(
        &self,
        user_id: impl Display,
    ) -> Result<Vec<R>, ApiError> {
        let request = self.client.build_list_by_user(user_id)?;
        let response = self.send(request).await?;
        self.client.parse_list_by_user(response)
    }

    /// Usually posts a `NewRecord` and decodes the stored `Record`.
    pub async fn create<B, R>(&self, input: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.client.build_create(input)?;
        let response = self.send(request).await?;
        self.client.parse_create(response)
    }

    /// Number of records owned by `user_id`; the backend answers `-1` when
    /// the user owns none.
    pub async fn count_by_user(&self, user_id: impl Display) -> Result<i64, ApiError> {
        let request = self.client.build_count_by_user(user_id)?;
        let response = self.send(request).await?;
        self.client.parse_count_by_user(response)
    }

    /// Usually decoded as a `Record`.
    pub async fn get_by_id<R: DeserializeOwned>(
        &self,
        record_id: impl Display,
    ) -> Result<R, ApiError> {
        let request = self.client.build_get_by_id(record_id)?;
        let response = self.send(request).await?;
        self.client.parse_get_by_id(response)
    }

    /// Usually puts a `Record` and decodes the updated `Record`.
    pub async fn update_by_id<B, R>(
        &self,
        record_id: impl Display,
        record: &B,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.client.build_update_by_id(record_id, record)?;
        let response = self.send(request).await?;
        self.client.parse_update_by_id(response)
    }

    /// Elements are usually `CatalogRecord`.
    pub async fn list_all<R: DeserializeOwned>(&self) -> Result<Vec<R>, ApiError> {
        let request = self.client.build_list_all()?;
        let response = self.send(request).await?;
        self.client.parse_list_all(response)
    }
}

#[cfg(feature = "reqwest")]
impl RecordGateway<crate::reqwest_transport::ReqwestTransport> {
    /// Gateway over a fresh `reqwest` client built from `config`.
    pub fn connect(config: &GatewayConfig) -> Result<Self, ApiError> {
        let transport = crate::reqwest_transport::ReqwestTransport::new(config)?;
        Self::from_config(config, transport)
    }
}

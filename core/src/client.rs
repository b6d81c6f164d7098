//! Stateless HTTP request builder and response parser for the record API.
//!
//! # Design
//! `RecordClient` holds only the parsed base URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Whoever sits in between (a `Transport`, or the host
//! application) executes the actual round-trip, keeping this type
//! deterministic and free of I/O.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::path::{parse_base_url, routes, PathTemplate};

/// Stateless request builder and response parser for the record API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Payload types are left to the caller: the DTOs in
/// `types` are the usual choice, but any `Serialize` body and any
/// `DeserializeOwned` result type (including `serde_json::Value`) pass
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordClient {
    base_url: Url,
}

impl RecordClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn build_list_by_collection(
        &self,
        collection_id: impl Display,
    ) -> Result<HttpRequest, ApiError> {
        self.get(routes::COLLECTION_RECORDS, &[("collectionId", &collection_id)])
    }

    pub fn build_list_by_user(&self, user_id: impl Display) -> Result<HttpRequest, ApiError> {
        self.get(routes::USER_RECORDS, &[("userId", &user_id)])
    }

    /// Usually called with a `NewRecord`.
    pub fn build_create<B: Serialize + ?Sized>(&self, input: &B) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, routes::NEW_RECORD, &[], input)
    }

    pub fn build_count_by_user(&self, user_id: impl Display) -> Result<HttpRequest, ApiError> {
        self.get(routes::USER_RECORD_COUNT, &[("userId", &user_id)])
    }

    pub fn build_get_by_id(&self, record_id: impl Display) -> Result<HttpRequest, ApiError> {
        self.get(routes::RECORD, &[("recordId", &record_id)])
    }

    /// Usually called with a `Record`.
    pub fn build_update_by_id<B: Serialize + ?Sized>(
        &self,
        record_id: impl Display,
        record: &B,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, routes::RECORD, &[("recordId", &record_id)], record)
    }

    pub fn build_list_all(&self) -> Result<HttpRequest, ApiError> {
        self.get(routes::RECORDS, &[])
    }

    /// Elements are usually `Record`.
    pub fn parse_list_by_collection<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<T>, ApiError> {
        decode(response)
    }

    /// Elements are usually `Record`.
    pub fn parse_list_by_user<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<T>, ApiError> {
        decode(response)
    }

    /// Usually decoded as the stored `Record`.
    pub fn parse_create<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        decode(response)
    }

    /// The backend reports `-1` for a user that owns no records.
    pub fn parse_count_by_user(&self, response: HttpResponse) -> Result<i64, ApiError> {
        decode(response)
    }

    /// Usually decoded as a `Record`.
    pub fn parse_get_by_id<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        decode(response)
    }

    /// Usually decoded as a `Record`.
    pub fn parse_update_by_id<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        decode(response)
    }

    /// Elements are usually `CatalogRecord`.
    pub fn parse_list_all<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<T>, ApiError> {
        decode(response)
    }

    fn get(
        &self,
        template: PathTemplate,
        params: &[(&str, &dyn Display)],
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: template.render(&self.base_url, params)?.into(),
            headers: Vec::new(),
            body: None,
        })
    }

    fn with_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        template: PathTemplate,
        params: &[(&str, &dyn Display)],
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url: template.render(&self.base_url, params)?.into(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound {
            body: response.body.clone(),
        });
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

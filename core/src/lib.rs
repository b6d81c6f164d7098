//! Async API client for the record catalog service.
//!
//! # Overview
//! `RecordGateway` exposes one method per server operation (list records by
//! collection, by user, or all; count by user; fetch, create, and update a
//! record). Each call issues exactly one HTTP request through an injected
//! `Transport` and decodes the body into whatever type the caller asks for
//! (usually one of the DTOs in `types`).
//!
//! # Design
//! - `RecordClient` is stateless: it holds only the base URL and splits each
//!   operation into `build_*` (produces an `HttpRequest`) and `parse_*`
//!   (consumes an `HttpResponse`), so it can also be driven by a host that
//!   does its own I/O.
//! - Routes are named `PathTemplate`s rendered with per-segment
//!   percent-encoding; unresolved placeholders are errors.
//! - Transport failures pass through `ApiError::Transport` unchanged.
//! - `ReqwestTransport` (feature `reqwest`, on by default) is the stock
//!   transport.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod path;
#[cfg(feature = "reqwest")]
pub mod reqwest_transport;
pub mod transport;
pub mod types;

pub use client::RecordClient;
pub use config::{ConfigError, GatewayConfig};
pub use error::ApiError;
pub use gateway::RecordGateway;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use path::PathTemplate;
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;
pub use transport::{Transport, TransportError};
pub use types::{Artist, CatalogRecord, Collection, Genre, NewRecord, Record};

//! Domain DTOs for the record API.
//!
//! # Design
//! These types mirror the backend's JSON (camelCase field names) but are
//! defined independently of the mock-server crate; the integration tests catch
//! any schema drift between the two. String fields are optional because the
//! backend stores them as nullable columns.

use serde::{Deserialize, Serialize};

/// A record (album) owned by a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub record_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub album_cover: Option<String>,
    /// ISO date, `yyyy-mm-dd`.
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub record_notes: Option<String>,
}

/// Request payload for creating a record. The server assigns `recordId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// A record as listed by `GET /records`: the record itself plus every
/// collection it belongs to and its artist and genre tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogRecord {
    #[serde(flatten)]
    pub record: Record,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub collection_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(rename = "public", default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub artist_id: i64,
    #[serde(default)]
    pub artist_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub genre_id: i64,
    #[serde(default)]
    pub genre_name: Option<String>,
}

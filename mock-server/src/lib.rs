use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub record_id: i64,
    pub user_id: i64,
    pub album_name: Option<String>,
    pub album_cover: Option<String>,
    pub release_date: Option<String>,
    pub media_type: Option<String>,
    pub record_notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub collection_id: i64,
    pub user_id: i64,
    pub collection_name: String,
    #[serde(rename = "public")]
    pub is_public: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub artist_id: i64,
    pub artist_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub genre_id: i64,
    pub genre_name: String,
}

/// `GET /records` entry: the record plus its collections and tags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(flatten)]
    pub record: Record,
    pub collections: Vec<Collection>,
    pub artists: Vec<Artist>,
    pub genres: Vec<Genre>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub user_id: i64,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub album_cover: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// Body of `PUT /records/{id}`. Clients send the whole record, but only the
/// notes are editable.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    #[serde(default)]
    pub record_notes: Option<String>,
}

/// In-memory catalog. Collections, artists and genres are only ever seeded;
/// the HTTP surface creates and edits records alone.
#[derive(Debug, Default)]
pub struct Store {
    records: BTreeMap<i64, Record>,
    collections: BTreeMap<i64, Collection>,
    /// (collection id, record id)
    memberships: BTreeSet<(i64, i64)>,
    artists: BTreeMap<i64, Vec<Artist>>,
    genres: BTreeMap<i64, Vec<Genre>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_record(&mut self, input: NewRecord) -> Record {
        let record_id = self.records.keys().next_back().map_or(1, |id| id + 1);
        let record = Record {
            record_id,
            user_id: input.user_id,
            album_name: input.album_name,
            album_cover: input.album_cover,
            release_date: input.release_date,
            media_type: input.media_type,
            record_notes: None,
        };
        self.records.insert(record_id, record.clone());
        record
    }

    pub fn add_collection(&mut self, collection: Collection) {
        self.collections.insert(collection.collection_id, collection);
    }

    pub fn add_to_collection(&mut self, collection_id: i64, record_id: i64) {
        self.memberships.insert((collection_id, record_id));
    }

    pub fn tag_artist(&mut self, record_id: i64, artist: Artist) {
        self.artists.entry(record_id).or_default().push(artist);
    }

    pub fn tag_genre(&mut self, record_id: i64, genre: Genre) {
        self.genres.entry(record_id).or_default().push(genre);
    }

    fn catalog_entry(&self, record: &Record) -> CatalogRecord {
        let collections = self
            .memberships
            .iter()
            .filter(|(_, record_id)| *record_id == record.record_id)
            .filter_map(|(collection_id, _)| self.collections.get(collection_id).cloned())
            .collect();
        CatalogRecord {
            record: record.clone(),
            collections,
            artists: self.artists.get(&record.record_id).cloned().unwrap_or_default(),
            genres: self.genres.get(&record.record_id).cloned().unwrap_or_default(),
        }
    }

    fn records_of_user(&self, user_id: i64) -> Vec<Record> {
        self.records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, &'static str);

pub fn app() -> Router {
    app_with(Store::new())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/records", get(list_records))
        .route("/records/{id}", get(get_record).put(update_record_notes))
        .route("/record", post(create_record))
        .route("/users/{id}/records", get(list_user_records))
        .route("/users/{id}/records/amount", get(count_user_records))
        .route("/collections/{id}/records", get(list_collection_records))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn list_records(State(db): State<Db>) -> Json<Vec<CatalogRecord>> {
    let store = db.read().await;
    Json(
        store
            .records
            .values()
            .map(|record| store.catalog_entry(record))
            .collect(),
    )
}

async fn get_record(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Record>, Rejection> {
    let store = db.read().await;
    store
        .records
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Record Details Not Found"))
}

async fn list_user_records(State(db): State<Db>, Path(user_id): Path<i64>) -> Json<Vec<Record>> {
    Json(db.read().await.records_of_user(user_id))
}

/// Mirrors the backend's `COUNT ... GROUP BY user_id`, which yields no row
/// (and so `-1`) for a user without records.
async fn count_user_records(State(db): State<Db>, Path(user_id): Path<i64>) -> Json<i64> {
    let count = db.read().await.records_of_user(user_id).len();
    Json(if count == 0 { -1 } else { count as i64 })
}

async fn list_collection_records(
    State(db): State<Db>,
    Path(collection_id): Path<i64>,
) -> Result<Json<Vec<Record>>, Rejection> {
    let store = db.read().await;
    if !store.collections.contains_key(&collection_id) {
        return Err((StatusCode::NOT_FOUND, "Collection Not Found"));
    }
    let records = store
        .memberships
        .range((collection_id, i64::MIN)..=(collection_id, i64::MAX))
        .filter_map(|(_, record_id)| store.records.get(record_id).cloned())
        .collect();
    Ok(Json(records))
}

async fn create_record(
    State(db): State<Db>,
    Json(input): Json<NewRecord>,
) -> (StatusCode, Json<Record>) {
    let record = db.write().await.insert_record(input);
    tracing::debug!(record_id = record.record_id, user_id = record.user_id, "record created");
    (StatusCode::CREATED, Json(record))
}

async fn update_record_notes(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<RecordUpdate>,
) -> Result<Json<Record>, Rejection> {
    let mut store = db.write().await;
    let record = store
        .records
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, "No notes to add"))?;
    record.record_notes = input.record_notes;
    tracing::debug!(record_id = id, "record notes updated");
    Ok(Json(record.clone()))
}

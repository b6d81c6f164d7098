use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use record_mock_server::{app, app_with, Artist, CatalogRecord, Collection, NewRecord, Record, Store};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

/// Two users; user 1 owns records 1 and 2, user 2 owns record 3.
/// Collection 10 (public) holds records 1 and 3.
fn seeded() -> Store {
    let mut store = Store::new();
    for (user_id, name) in [(1, "Blue Train"), (1, "Giant Steps"), (2, "Hejira")] {
        store.insert_record(NewRecord {
            user_id,
            album_name: Some(name.to_string()),
            media_type: Some("vinyl".to_string()),
            ..Default::default()
        });
    }
    store.add_collection(Collection {
        collection_id: 10,
        user_id: 1,
        collection_name: "Favourites".to_string(),
        is_public: true,
    });
    store.add_to_collection(10, 1);
    store.add_to_collection(10, 3);
    store.tag_artist(
        1,
        Artist {
            artist_id: 7,
            artist_name: "John Coltrane".to_string(),
        },
    );
    store
}

// --- list all ---

#[tokio::test]
async fn list_records_empty() {
    let resp = app().oneshot(get_request("/records")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let records: Vec<CatalogRecord> = body_json(resp).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn list_records_includes_collections_and_tags() {
    let resp = app_with(seeded()).oneshot(get_request("/records")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let records: Vec<CatalogRecord> = body_json(resp).await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].collections[0].collection_id, 10);
    assert_eq!(records[0].artists[0].artist_name, "John Coltrane");
    assert!(records[1].collections.is_empty());
}

// --- by user ---

#[tokio::test]
async fn list_user_records_filters_by_owner() {
    let resp = app_with(seeded())
        .oneshot(get_request("/users/1/records"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let records: Vec<Record> = body_json(resp).await;
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.user_id == 1));
}

#[tokio::test]
async fn count_user_records() {
    let resp = app_with(seeded())
        .oneshot(get_request("/users/1/records/amount"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let count: i64 = body_json(resp).await;
    assert_eq!(count, 2);
}

#[tokio::test]
async fn count_for_user_without_records_is_minus_one() {
    let resp = app_with(seeded())
        .oneshot(get_request("/users/99/records/amount"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let count: i64 = body_json(resp).await;
    assert_eq!(count, -1);
}

// --- by collection ---

#[tokio::test]
async fn list_collection_records() {
    let resp = app_with(seeded())
        .oneshot(get_request("/collections/10/records"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let records: Vec<Record> = body_json(resp).await;
    let ids: Vec<i64> = records.iter().map(|r| r.record_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn unknown_collection_returns_404() {
    let resp = app_with(seeded())
        .oneshot(get_request("/collections/11/records"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- create ---

#[tokio::test]
async fn create_record_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/record",
            r#"{"userId":4,"albumName":"Kind of Blue","releaseDate":"1959-08-17"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let record: Record = body_json(resp).await;
    assert_eq!(record.record_id, 1);
    assert_eq!(record.user_id, 4);
    assert_eq!(record.release_date.as_deref(), Some("1959-08-17"));
}

#[tokio::test]
async fn create_record_without_user_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/record", r#"{"albumName":"Orphan"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_record_not_found() {
    let resp = app().oneshot(get_request("/records/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(&body_bytes(resp).await[..], b"Record Details Not Found");
}

#[tokio::test]
async fn get_record_non_numeric_id_returns_400() {
    let resp = app().oneshot(get_request("/records/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_record_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/records/5", r#"{"recordNotes":"nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- lifecycle ---

#[tokio::test]
async fn create_update_get_lifecycle() {
    use tower::Service;

    let mut app = app_with(seeded()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/record", r#"{"userId":2,"albumName":"Blue"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Record = body_json(resp).await;
    assert_eq!(created.record_id, 4);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/records/{}", created.record_id),
            r#"{"recordId":4,"userId":2,"albumName":"ignored","recordNotes":"signed copy"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Record = body_json(resp).await;
    assert_eq!(updated.album_name.as_deref(), Some("Blue")); // only notes are editable
    assert_eq!(updated.record_notes.as_deref(), Some("signed copy"));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/records/4"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Record = body_json(resp).await;
    assert_eq!(fetched, updated);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/users/2/records/amount"))
        .await
        .unwrap();
    let count: i64 = body_json(resp).await;
    assert_eq!(count, 2);
}

//! Deterministic in-memory rendition of the consumed 500px API surface.
//!
//! Serves paginated photo listings, photo detail and comment threads from
//! seeded fixtures. The seed deliberately includes malformed records (a list
//! entry missing `nsfw`, one with a mistyped `id`, a comment without a body)
//! so integration tests can exercise the client's lenient list decoding over
//! real HTTP. Requests without a `consumer_key` are rejected with 401.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Raw list entries per page (malformed entries included).
pub const PAGE_SIZE: usize = 5;
/// Comments per page.
pub const COMMENTS_PAGE_SIZE: usize = 2;

#[derive(Debug)]
pub struct Fixtures {
    photos: Vec<Value>,
    details: HashMap<u64, Value>,
    comments: HashMap<u64, Vec<Value>>,
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    Router::new()
        .route("/photos", get(list_photos))
        .route("/photos/{id}", get(photo_detail))
        .route("/photos/{id}/comments", get(list_comments))
        .with_state(seed())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Seeded ids, in feed order.
pub fn seeded_ids() -> Vec<u64> {
    (101..=112).collect()
}

fn seed() -> Db {
    let mut photos = Vec::new();
    let mut details = HashMap::new();
    let mut comments = HashMap::new();

    for id in seeded_ids() {
        photos.push(json!({
            "id": id,
            "image_url": format!("https://cdn.example/{id}/4.jpg"),
            "nsfw": false,
            "name": format!("Photo {id}"),
            "rating": 50.0 + (id % 40) as f64,
        }));
        details.insert(
            id,
            json!({
                "id": id,
                "image_url": format!("https://cdn.example/{id}/4.jpg"),
                "name": format!("Photo {id}"),
                "description": format!("Seeded fixture photo {id}"),
                "favorites_count": id * 2,
                "votes_count": id * 3,
                "comments_count": 5,
                "times_viewed": id * 100,
                "highest_rating": 90.5,
                "rating": 50.0 + (id % 40) as f64,
                "camera": "X100V",
                "focal_length": "23",
                "shutter_speed": "1/250",
                "aperture": "2.0",
                "iso": "400",
                "category": (id % 28) as i64,
                "taken_at": "2014-09-01T08:00:00-04:00",
                "created_at": "2014-09-02T10:00:00-04:00",
                "user": {
                    "username": format!("user{id}"),
                    "fullname": format!("User {id}"),
                    "userpic_url": format!("https://cdn.example/users/{id}.jpg"),
                },
            }),
        );
        comments.insert(id, Vec::new());
    }

    // Malformed list entries: one missing `nsfw` (page 1), one with a
    // mistyped id (page 2). Clients are expected to drop both.
    photos.insert(
        2,
        json!({"id": 901, "image_url": "https://cdn.example/901/4.jpg"}),
    );
    photos.insert(
        7,
        json!({"id": "not-a-number", "image_url": "https://cdn.example/902/4.jpg", "nsfw": false}),
    );

    let thread = vec![
        json!({"user": {"fullname": "Ava", "userpic_url": "https://cdn.example/users/ava.jpg"}, "body": "Gorgeous light."}),
        json!({"user": {"fullname": "Ben", "userpic_url": "https://cdn.example/users/ben.jpg"}, "body": "Where was this taken?"}),
        // Malformed: no body; clients drop it without failing the page.
        json!({"user": {"fullname": "Caz", "userpic_url": "https://cdn.example/users/caz.jpg"}}),
        json!({"user": {"fullname": "Dee", "userpic_url": "https://cdn.example/users/dee.jpg"}, "body": "Stunning."}),
        json!({"user": {"fullname": "Eli", "userpic_url": "https://cdn.example/users/eli.jpg"}, "body": "Great tones."}),
    ];
    comments.insert(101, thread);

    Arc::new(Fixtures {
        photos,
        details,
        comments,
    })
}

#[derive(Deserialize)]
struct ListQuery {
    consumer_key: Option<String>,
    page: Option<usize>,
    feature: Option<String>,
}

#[derive(Deserialize)]
struct DetailQuery {
    consumer_key: Option<String>,
    #[allow(dead_code)]
    image_size: Option<u8>,
}

#[derive(Deserialize)]
struct CommentsQuery {
    consumer_key: Option<String>,
    comments_page: Option<usize>,
}

fn authorized(consumer_key: &Option<String>) -> bool {
    consumer_key.as_deref().is_some_and(|k| !k.is_empty())
}

fn page_slice<T: Clone>(items: &[T], page: usize, size: usize) -> Vec<T> {
    let start = (page.max(1) - 1) * size;
    items.iter().skip(start).take(size).cloned().collect()
}

async fn list_photos(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&query.consumer_key) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let page = query.page.unwrap_or(1);
    let photos = page_slice(&db.photos, page, PAGE_SIZE);
    let total_pages = db.photos.len().div_ceil(PAGE_SIZE);
    Ok(Json(json!({
        "feature": query.feature.unwrap_or_else(|| "fresh_week".to_string()),
        "current_page": page,
        "total_pages": total_pages,
        "photos": photos,
    })))
}

async fn photo_detail(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&query.consumer_key) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let detail = db.details.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({ "photo": detail })))
}

async fn list_comments(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(query): Query<CommentsQuery>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&query.consumer_key) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let thread = db.comments.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let page = query.comments_page.unwrap_or(1);
    let total_pages = thread.len().div_ceil(COMMENTS_PAGE_SIZE).max(1);
    Ok(Json(json!({
        "current_page": page,
        "total_pages": total_pages,
        "comments": page_slice(thread, page, COMMENTS_PAGE_SIZE),
    })))
}

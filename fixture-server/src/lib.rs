//! In-process stand-in for the JSONPlaceholder fixture service.
//!
//! Serves six fixed-size collections generated deterministically at startup.
//! Like the public service, writes are answered but never persisted: a POST
//! returns the payload with the next id, PUT/PATCH echo the merged record and
//! DELETE answers `{}`. Routing misses and unknown ids answer 404 with `{}`;
//! a write whose body is not valid JSON gets axum's plain-text rejection.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const USERS: u64 = 10;
pub const POSTS: u64 = 100;
pub const COMMENTS: u64 = 500;
pub const ALBUMS: u64 = 100;
pub const PHOTOS: u64 = 5000;
pub const TODOS: u64 = 200;

/// (parent collection, child collection, child field pointing at the parent)
const NESTED: &[(&str, &str, &str)] = &[
    ("posts", "comments", "postId"),
    ("albums", "photos", "albumId"),
    ("users", "posts", "userId"),
    ("users", "albums", "userId"),
    ("users", "todos", "userId"),
];

type Reply = (StatusCode, Json<Value>);

/// The seeded collections, keyed by path segment. Read-only once built.
#[derive(Debug, Clone)]
pub struct Fixtures {
    collections: HashMap<&'static str, Vec<Value>>,
}

impl Fixtures {
    pub fn seeded() -> Self {
        let mut collections = HashMap::new();
        collections.insert("users", (1..=USERS).map(user).collect());
        collections.insert("posts", (1..=POSTS).map(post).collect());
        collections.insert("comments", (1..=COMMENTS).map(comment).collect());
        collections.insert("albums", (1..=ALBUMS).map(album).collect());
        collections.insert("photos", (1..=PHOTOS).map(photo).collect());
        collections.insert("todos", (1..=TODOS).map(todo).collect());
        Self { collections }
    }

    pub fn collection(&self, name: &str) -> Option<&[Value]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    pub fn find(&self, name: &str, id: u64) -> Option<&Value> {
        self.collection(name)?
            .iter()
            .find(|item| item["id"].as_u64() == Some(id))
    }
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    let db: Db = Arc::new(Fixtures::seeded());
    Router::new()
        .route("/{resource}", get(list).post(create))
        .route(
            "/{resource}/{id}",
            get(fetch).put(replace).patch(patch).delete(remove),
        )
        .route("/{resource}/{id}/{child}", get(nested))
        .fallback(unmatched)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "fixture server listening");
    }
    axum::serve(listener, app()).await
}

fn not_found() -> Reply {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

async fn unmatched() -> Reply {
    not_found()
}

fn ok(value: Value) -> Reply {
    (StatusCode::OK, Json(value))
}

/// Query-string match: strings compare as-is, everything else by its JSON text.
fn field_matches(item: &Value, key: &str, expected: &str) -> bool {
    match item.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

fn with_id(body: Value, id: u64) -> Value {
    let mut object = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    object.insert("id".to_string(), json!(id));
    Value::Object(object)
}

async fn list(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Reply {
    let Some(items) = db.collection(&resource) else {
        return not_found();
    };
    let selected: Vec<Value> = items
        .iter()
        .filter(|item| filters.iter().all(|(k, v)| field_matches(item, k, v)))
        .cloned()
        .collect();
    tracing::debug!(
        resource = %resource,
        filters = filters.len(),
        count = selected.len(),
        "list"
    );
    ok(Value::Array(selected))
}

async fn fetch(State(db): State<Db>, Path((resource, id)): Path<(String, String)>) -> Reply {
    id.parse::<u64>()
        .ok()
        .and_then(|id| db.find(&resource, id))
        .map(|item| ok(item.clone()))
        .unwrap_or_else(not_found)
}

async fn nested(
    State(db): State<Db>,
    Path((resource, id, child)): Path<(String, String, String)>,
) -> Reply {
    let Some((_, _, key)) = NESTED
        .iter()
        .find(|(parent, nested, _)| *parent == resource && *nested == child)
    else {
        return not_found();
    };
    let Some(items) = db.collection(&child) else {
        return not_found();
    };
    let selected: Vec<Value> = items
        .iter()
        .filter(|item| field_matches(item, key, &id))
        .cloned()
        .collect();
    ok(Value::Array(selected))
}

async fn create(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    let Some(items) = db.collection(&resource) else {
        return not_found();
    };
    let id = items.len() as u64 + 1;
    (StatusCode::CREATED, Json(with_id(body, id)))
}

async fn replace(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Reply {
    match id
        .parse::<u64>()
        .ok()
        .filter(|id| db.find(&resource, *id).is_some())
    {
        Some(id) => ok(with_id(body, id)),
        None => not_found(),
    }
}

async fn patch(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Reply {
    let Some(existing) = id
        .parse::<u64>()
        .ok()
        .and_then(|id| db.find(&resource, id))
    else {
        return not_found();
    };
    let mut merged = existing.clone();
    if let (Value::Object(target), Value::Object(fields)) = (&mut merged, body) {
        for (key, value) in fields {
            if key != "id" {
                target.insert(key, value);
            }
        }
    }
    ok(merged)
}

async fn remove(State(db): State<Db>, Path((resource, _id)): Path<(String, String)>) -> Reply {
    if db.collection(&resource).is_none() {
        return not_found();
    }
    ok(json!({}))
}

// --- seed records ---

fn owner(id: u64, per_parent: u64) -> u64 {
    (id - 1) / per_parent + 1
}

fn user(n: u64) -> Value {
    json!({
        "id": n,
        "name": format!("Fixture User {n}"),
        "username": format!("user{n}"),
        "email": format!("user{n}@fixture.example"),
        "address": {
            "street": format!("{n} Kulas Light"),
            "suite": format!("Apt. {}", 500 + n),
            "city": "Gwenborough",
            "zipcode": format!("92998-{:04}", 3870 + n),
            "geo": {
                "lat": format!("-37.{:04}", 3159 + n),
                "lng": format!("81.{:04}", 1496 + n)
            }
        },
        "phone": format!("1-770-736-80{n:02}"),
        "website": format!("user{n}.example"),
        "company": {
            "name": format!("Fixture Company {n}"),
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

fn post(n: u64) -> Value {
    json!({
        "userId": owner(n, POSTS / USERS),
        "id": n,
        "title": format!("post title {n}"),
        "body": format!("post body {n}\nquia et suscipit")
    })
}

fn comment(n: u64) -> Value {
    json!({
        "postId": owner(n, COMMENTS / POSTS),
        "id": n,
        "name": format!("comment name {n}"),
        "email": format!("commenter{n}@fixture.example"),
        "body": format!("comment body {n}")
    })
}

fn album(n: u64) -> Value {
    json!({
        "userId": owner(n, ALBUMS / USERS),
        "id": n,
        "title": format!("album title {n}")
    })
}

fn photo(n: u64) -> Value {
    let colour = format!("{:06x}", n * 2731 % 0xffffff);
    json!({
        "albumId": owner(n, PHOTOS / ALBUMS),
        "id": n,
        "title": format!("photo title {n}"),
        "url": format!("https://via.placeholder.com/600/{colour}"),
        "thumbnailUrl": format!("https://via.placeholder.com/150/{colour}")
    })
}

fn todo(n: u64) -> Value {
    json!({
        "userId": owner(n, TODOS / USERS),
        "id": n,
        "title": format!("todo title {n}"),
        "completed": n % 3 == 0
    })
}

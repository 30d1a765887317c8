//! In-process stand-in for the books REST service.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use bookshelf_app::books::{Book, BookId, Genre, HttpBooksApi};
use bookshelf_http::ApiClient;
use bookshelf_kernel::settings::ApiSettings;

#[derive(Default)]
struct Store {
    books: Vec<Value>,
    next_seq: u64,
}

/// Handle on a running fake service.
#[derive(Clone, Default)]
pub struct FakeBooks {
    store: Arc<Mutex<Store>>,
    fail_deletes: Arc<AtomicBool>,
    fail_lists: Arc<AtomicBool>,
}

impl FakeBooks {
    /// Start serving on an ephemeral port and return a client for it.
    pub async fn start(&self) -> HttpBooksApi {
        let router = Router::new()
            .route("/api/books", get(list_books).post(create_book))
            .route("/api/books/{id}", get(get_book).delete(delete_book))
            .route("/api/books/{id}/more-details", get(more_details))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = ApiClient::new(&ApiSettings::with_base_url(format!("http://{addr}"))).unwrap();
        HttpBooksApi::new(client)
    }

    /// Store a book directly, assigning the next `B-NNN` id.
    pub fn seed(&self, title: &str, author: &str, genre: Genre, rating: u8, date: &str) -> BookId {
        let mut store = self.store.lock().unwrap();
        store.next_seq += 1;
        let id = format!("B-{:03}", store.next_seq);
        let isbn = format!("{:013}", 9_780_000_000_000u64 + store.next_seq);
        store.books.push(json!({
            "id": id,
            "title": title,
            "author": author,
            "isbn": isbn,
            "genre": genre.as_str(),
            "rating": rating,
            "publicationDate": date,
        }));
        BookId::new(id)
    }

    pub fn stored_ids(&self) -> Vec<String> {
        let store = self.store.lock().unwrap();
        store
            .books
            .iter()
            .map(|b| b["id"].as_str().unwrap().to_string())
            .collect()
    }

    pub fn stored_book(&self, id: &BookId) -> Option<Book> {
        let store = self.store.lock().unwrap();
        store
            .books
            .iter()
            .find(|b| b["id"] == id.as_str())
            .map(|b| serde_json::from_value(b.clone()).unwrap())
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }
}

async fn list_books(State(fake): State<FakeBooks>) -> Response {
    if fake.fail_lists.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let store = fake.store.lock().unwrap();
    if store.books.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(store.books.clone()).into_response()
    }
}

fn validate(payload: &Value, existing: &[Value]) -> BTreeMap<String, String> {
    let text = |key: &str| payload[key].as_str().unwrap_or("").trim().to_string();
    let mut errors = BTreeMap::new();

    let title = text("title");
    if title.is_empty() {
        errors.insert("title".into(), "Title is required".into());
    } else if title.chars().count() > 100 {
        errors.insert("title".into(), "Title must be less than 100 characters".into());
    }

    let author = text("author");
    if author.is_empty() {
        errors.insert("author".into(), "Author is required".into());
    } else if author.chars().count() > 50 {
        errors.insert("author".into(), "Author must be less than 50 characters".into());
    }

    let isbn = text("isbn");
    if isbn.is_empty() {
        errors.insert("isbn".into(), "ISBN is required".into());
    } else if isbn.len() != 13 || !isbn.chars().all(|c| c.is_ascii_digit()) {
        errors.insert("isbn".into(), "ISBN must be a 13-digit number".into());
    } else if existing.iter().any(|b| b["isbn"] == isbn.as_str()) {
        errors.insert("isbn".into(), "ISBN already exists".into());
    }

    if !Genre::ALL.iter().any(|g| g.as_str() == text("genre")) {
        errors.insert("genre".into(), "Genre is required".into());
    }

    match text("rating").parse::<i64>() {
        Err(_) => {
            errors.insert("rating".into(), "Rating is required".into());
        }
        Ok(r) if r < 1 => {
            errors.insert("rating".into(), "Rating must be at least 1".into());
        }
        Ok(r) if r > 5 => {
            errors.insert("rating".into(), "Rating cannot be more than 5".into());
        }
        Ok(_) => {}
    }

    if text("publicationDate").is_empty() {
        errors.insert("publicationDate".into(), "Publication date is required".into());
    }

    errors
}

async fn create_book(State(fake): State<FakeBooks>, Json(payload): Json<Value>) -> Response {
    let mut store = fake.store.lock().unwrap();
    let errors = validate(&payload, &store.books);
    if !errors.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
    }

    store.next_seq += 1;
    let id = format!("B-{:03}", store.next_seq);
    let rating: i64 = payload["rating"].as_str().unwrap().trim().parse().unwrap();
    let book = json!({
        "id": id,
        "title": payload["title"].as_str().unwrap().trim(),
        "author": payload["author"].as_str().unwrap().trim(),
        "isbn": payload["isbn"].as_str().unwrap().trim(),
        "genre": payload["genre"],
        "rating": rating,
        "publicationDate": payload["publicationDate"],
    });
    store.books.push(book.clone());
    (StatusCode::CREATED, Json(book)).into_response()
}

async fn get_book(State(fake): State<FakeBooks>, Path(id): Path<String>) -> Response {
    let store = fake.store.lock().unwrap();
    match store.books.iter().find(|b| b["id"] == id.as_str()) {
        Some(book) => Json(book.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_book(State(fake): State<FakeBooks>, Path(id): Path<String>) -> Response {
    if fake.fail_deletes.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let mut store = fake.store.lock().unwrap();
    let before = store.books.len();
    store.books.retain(|b| b["id"] != id.as_str());
    if store.books.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn more_details(State(fake): State<FakeBooks>, Path(id): Path<String>) -> Response {
    let store = fake.store.lock().unwrap();
    let Some(book) = store.books.iter().find(|b| b["id"] == id.as_str()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    Json(json!({
        "kind": "books#volumes",
        "totalItems": 1,
        "items": [{
            "volumeInfo": {
                "title": book["title"],
                "authors": [book["author"]],
                "description": "A volume found by title and author.",
                "categories": ["Fiction"],
                "imageLinks": { "thumbnail": "http://books.example/thumb.jpg" },
                "infoLink": "http://books.example/info"
            }
        }]
    }))
    .into_response()
}

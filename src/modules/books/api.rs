use async_trait::async_trait;
use serde_json::Value;

use bookshelf_http::{ApiClient, ApiResult};

use super::models::{Book, BookId, NewBook};

const BOOKS: [&str; 2] = ["api", "books"];

/// Remote operations of the books service.
#[async_trait]
pub trait BooksApi: Send + Sync {
    /// `GET /api/books`; an empty collection may come back as `204 No Content`.
    async fn list_books(&self) -> ApiResult<Vec<Book>>;

    /// `POST /api/books`; returns the canonical record the server stored.
    async fn create_book(&self, book: &NewBook) -> ApiResult<Book>;

    /// `DELETE /api/books/{id}`
    async fn delete_book(&self, id: &BookId) -> ApiResult<()>;

    /// `GET /api/books/{id}`
    async fn get_book(&self, id: &BookId) -> ApiResult<Book>;

    /// `GET /api/books/{id}/more-details`, the third-party lookup passed through untouched.
    async fn more_details(&self, id: &BookId) -> ApiResult<Value>;
}

/// [`BooksApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    client: ApiClient,
}

impl HttpBooksApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self) -> ApiResult<Vec<Book>> {
        let books = self.client.get_optional_json(&BOOKS).await?;
        Ok(books.unwrap_or_default())
    }

    async fn create_book(&self, book: &NewBook) -> ApiResult<Book> {
        self.client.post_json(&BOOKS, book).await
    }

    async fn delete_book(&self, id: &BookId) -> ApiResult<()> {
        self.client.delete(&[BOOKS[0], BOOKS[1], id.as_str()]).await
    }

    async fn get_book(&self, id: &BookId) -> ApiResult<Book> {
        self.client.get_json(&[BOOKS[0], BOOKS[1], id.as_str()]).await
    }

    async fn more_details(&self, id: &BookId) -> ApiResult<Value> {
        self.client
            .get_json(&[BOOKS[0], BOOKS[1], id.as_str(), "more-details"])
            .await
    }
}

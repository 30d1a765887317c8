use std::collections::BTreeSet;
use std::sync::Arc;

use bookshelf_events::{detail_route, EventBus};
use bookshelf_http::ApiResult;

use super::add_form::{AddBookForm, SubmitOutcome};
use super::api::BooksApi;
use super::models::{Book, BookId};
use super::page::{self, PageControls, PageState};
use super::sort::{sort_books, SortIndicator, SortKey, SortState};

pub const DELETE_SUCCESS_MESSAGE: &str = "Book deleted successfully!";
pub const DELETE_FAILURE_MESSAGE: &str = "Failed to delete book.";

/// Whether the initial fetch has produced a list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// The fetch failed; the table shows a placeholder instead of rows.
    Unavailable,
}

/// The confirmation prompt. Confirmed deletes leave the prompt and are
/// tracked as in flight until their completion is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    ConfirmPending(BookId),
}

/// How a delete request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No delete was awaiting confirmation.
    NothingPending,
    Cancelled(BookId),
    Applied(BookId),
    Failed(BookId),
}

/// What the table body shows for the current page.
#[derive(Debug, PartialEq, Eq)]
pub enum PageRows<'a> {
    Rows(Vec<&'a Book>),
    /// "No Books Found"
    Empty,
}

/// In-memory book table: the collection as last confirmed by the server, plus
/// the sort and page the user picked.
pub struct BookListView<A: BooksApi + ?Sized> {
    api: Arc<A>,
    events: EventBus,
    books: Vec<Book>,
    load_state: LoadState,
    sort: SortState,
    page: PageState,
    delete: DeleteState,
    in_flight: BTreeSet<BookId>,
    add_form: AddBookForm,
}

impl<A: BooksApi + ?Sized> BookListView<A> {
    pub fn new(api: Arc<A>, events: EventBus) -> Self {
        Self {
            api,
            events,
            books: Vec::new(),
            load_state: LoadState::Loading,
            sort: SortState::default(),
            page: PageState::default(),
            delete: DeleteState::Idle,
            in_flight: BTreeSet::new(),
            add_form: AddBookForm::new(),
        }
    }

    /// Fetch the collection. Failures are logged and leave the view `Unavailable`.
    pub async fn load(&mut self) -> LoadState {
        match self.api.list_books().await {
            Ok(books) => {
                tracing::info!(count = books.len(), "books loaded");
                self.books = books;
                self.load_state = LoadState::Ready;
            }
            Err(error) => {
                tracing::warn!(%error, "error fetching books");
                self.load_state = LoadState::Unavailable;
            }
        }
        self.load_state
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// The collection in server/insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Column header click.
    pub fn request_sort(&mut self, key: SortKey) {
        self.sort.request_sort(key);
        tracing::debug!(key = %key, direction = ?self.sort.direction, "sort requested");
    }

    pub fn sort_indicator(&self, key: SortKey) -> SortIndicator {
        self.sort.indicator(key)
    }

    /// The whole collection in display order.
    pub fn sorted(&self) -> Vec<&Book> {
        sort_books(&self.books, &self.sort)
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page
    }

    /// Jump to page `n`. Callers keep `n` within `1..=total_pages()`.
    pub fn set_page(&mut self, n: usize) {
        self.page.current_page = n;
    }

    pub fn total_pages(&self) -> usize {
        page::total_pages(self.books.len())
    }

    pub fn page_controls(&self) -> PageControls {
        PageControls::new(self.page.current_page, self.total_pages())
    }

    /// Sorted rows of page `n`.
    pub fn page_rows(&self, n: usize) -> Vec<&Book> {
        let sorted = self.sorted();
        page::page(&sorted, n).to_vec()
    }

    /// Table body for the current page.
    pub fn rows(&self) -> PageRows<'_> {
        let rows = self.page_rows(self.page.current_page);
        if rows.is_empty() {
            PageRows::Empty
        } else {
            PageRows::Rows(rows)
        }
    }

    /// Row click: ask the router for the detail view of `id`.
    pub fn activate_row(&self, id: &BookId) -> bool {
        if !self.books.iter().any(|book| &book.id == id) {
            tracing::debug!(book_id = %id, "activated row is not in the list");
            return false;
        }
        self.events.navigate(detail_route(id.as_str()));
        true
    }

    pub fn add_form(&self) -> &AddBookForm {
        &self.add_form
    }

    pub fn add_form_mut(&mut self) -> &mut AddBookForm {
        &mut self.add_form
    }

    /// Submit the add form; a created book is appended as the server returned it.
    /// Sort state and page stay where they are.
    pub async fn submit_add_form(&mut self) -> SubmitOutcome {
        let outcome = self.add_form.submit(self.api.as_ref()).await;
        if let SubmitOutcome::Created(book) = &outcome {
            self.append(book.clone());
        }
        outcome
    }

    /// Add a server-confirmed record. A record whose id is already listed replaces it.
    pub fn append(&mut self, book: Book) {
        match self.books.iter_mut().find(|existing| existing.id == book.id) {
            Some(existing) => {
                tracing::warn!(book_id = %book.id, "created book id already listed; replacing");
                *existing = book;
            }
            None => self.books.push(book),
        }
    }

    /// Remove `id` from the local collection. Absent ids are a no-op.
    /// A removal that empties the last page moves the view back onto the new
    /// last page.
    pub fn remove(&mut self, id: &BookId) -> bool {
        let before = self.books.len();
        self.books.retain(|book| &book.id != id);
        if self.books.len() == before {
            return false;
        }
        let last = self.total_pages();
        if self.page.current_page > last {
            tracing::debug!(from = self.page.current_page, to = last, "page moved back after removal");
            self.page.current_page = last;
        }
        true
    }

    /// Handle on the service, for hosts that issue confirmed deletes themselves.
    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    pub fn delete_state(&self) -> &DeleteState {
        &self.delete
    }

    /// Trash-icon click: wait for the user to confirm deleting `id`.
    pub fn request_delete(&mut self, id: BookId) {
        tracing::debug!(book_id = %id, "delete awaiting confirmation");
        self.delete = DeleteState::ConfirmPending(id);
    }

    /// Answer the confirmation prompt. A yes moves the id to the in-flight
    /// set and returns it; the caller issues the remote delete and hands the
    /// result to [`apply_delete`](Self::apply_delete). The view stays usable
    /// while that request runs, so further deletes can be confirmed.
    pub fn confirm_delete(&mut self, confirmed: bool) -> Option<BookId> {
        let DeleteState::ConfirmPending(id) = std::mem::replace(&mut self.delete, DeleteState::Idle)
        else {
            return None;
        };
        if !confirmed {
            tracing::debug!(book_id = %id, "delete cancelled");
            return None;
        }
        tracing::debug!(book_id = %id, "delete issued");
        self.in_flight.insert(id.clone());
        Some(id)
    }

    /// Ids whose remote delete has been issued but not yet applied.
    pub fn in_flight_deletes(&self) -> &BTreeSet<BookId> {
        &self.in_flight
    }

    /// Answer the prompt and, on a yes, run the remote delete to completion.
    pub async fn resolve_delete(&mut self, confirmed: bool) -> DeleteOutcome {
        let pending = match &self.delete {
            DeleteState::ConfirmPending(id) => id.clone(),
            DeleteState::Idle => return DeleteOutcome::NothingPending,
        };
        let Some(id) = self.confirm_delete(confirmed) else {
            return DeleteOutcome::Cancelled(pending);
        };
        let result = self.api.delete_book(&id).await;
        self.apply_delete(id, result)
    }

    /// Apply the completion of a remote delete. Safe to call for several
    /// deletes that were in flight at once, in any order.
    pub fn apply_delete(&mut self, id: BookId, result: ApiResult<()>) -> DeleteOutcome {
        if !self.in_flight.remove(&id) {
            tracing::debug!(book_id = %id, "applying a delete that was not issued through the prompt");
        }
        match result {
            Ok(()) => {
                let removed = self.remove(&id);
                tracing::info!(book_id = %id, removed, "book deleted");
                self.events.success(DELETE_SUCCESS_MESSAGE);
                DeleteOutcome::Applied(id)
            }
            Err(error) => {
                tracing::warn!(book_id = %id, %error, "error deleting book");
                self.events.error(DELETE_FAILURE_MESSAGE);
                DeleteOutcome::Failed(id)
            }
        }
    }
}

impl<A: BooksApi + ?Sized> std::fmt::Debug for BookListView<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookListView")
            .field("books", &self.books.len())
            .field("load_state", &self.load_state)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("delete", &self.delete)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

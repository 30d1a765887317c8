use std::sync::Arc;

use bookshelf_events::{EventBus, LIST_ROUTE};

use super::api::BooksApi;
use super::models::{Book, BookId};
use super::more_details::MoreDetails;

/// A remotely fetched section of the detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    /// Not fetched yet, or fetch in progress.
    Loading,
    Ready(T),
    /// The fetch failed; a placeholder is shown.
    Unavailable,
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Detail page for one book: basic fields plus the third-party lookup.
pub struct BookDetailView<A: BooksApi + ?Sized> {
    api: Arc<A>,
    events: EventBus,
    id: BookId,
    book: Section<Book>,
    more: Section<MoreDetails>,
}

impl<A: BooksApi + ?Sized> BookDetailView<A> {
    pub fn new(api: Arc<A>, events: EventBus, id: BookId) -> Self {
        Self {
            api,
            events,
            id,
            book: Section::Loading,
            more: Section::Loading,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn book(&self) -> &Section<Book> {
        &self.book
    }

    pub fn more_details(&self) -> &Section<MoreDetails> {
        &self.more
    }

    /// Fetch the basic fields.
    pub async fn load(&mut self) -> &Section<Book> {
        self.book = match self.api.get_book(&self.id).await {
            Ok(book) => Section::Ready(book),
            Err(error) => {
                tracing::warn!(book_id = %self.id, %error, "error fetching book details");
                Section::Unavailable
            }
        };
        &self.book
    }

    /// Switching to the "more details" tab refetches the third-party lookup every time.
    pub async fn enter_more_details(&mut self) -> &Section<MoreDetails> {
        self.more = Section::Loading;
        self.more = match self.api.more_details(&self.id).await {
            Ok(payload) => Section::Ready(MoreDetails::new(payload)),
            Err(error) => {
                tracing::warn!(book_id = %self.id, %error, "error fetching more details");
                Section::Unavailable
            }
        };
        &self.more
    }

    /// "Back to list" control.
    pub fn back_to_list(&self) {
        self.events.navigate(LIST_ROUTE);
    }
}

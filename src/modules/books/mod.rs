//! Book catalog: models, the remote API seam, and the list and detail views.

pub mod add_form;
pub mod api;
pub mod detail_view;
pub mod list_view;
pub mod models;
pub mod more_details;
pub mod page;
pub mod sort;

pub use add_form::{AddBookForm, FormField, SubmitOutcome};
pub use api::{BooksApi, HttpBooksApi};
pub use detail_view::{BookDetailView, Section};
pub use list_view::{BookListView, DeleteOutcome, DeleteState, LoadState, PageRows};
pub use models::{Book, BookId, Genre, NewBook};
pub use more_details::MoreDetails;
pub use page::{PageControls, ITEMS_PER_PAGE};
pub use sort::{SortDirection, SortIndicator, SortKey, SortState};

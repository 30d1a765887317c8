use std::fmt;

use bookshelf_http::{ApiError, FieldErrors};

use super::api::BooksApi;
use super::models::{Book, NewBook};

/// Input of the add-book form. Names match the keys the service uses in
/// validation responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Author,
    Isbn,
    Genre,
    Rating,
    PublicationDate,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Author,
        FormField::Isbn,
        FormField::Genre,
        FormField::Rating,
        FormField::PublicationDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Author => "author",
            FormField::Isbn => "isbn",
            FormField::Genre => "genre",
            FormField::Rating => "rating",
            FormField::PublicationDate => "publicationDate",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; carries the server's canonical record.
    Created(Book),
    /// Server validation failed; errors are now attached to their fields.
    Rejected,
    /// Transport or unexpected server failure; the form is left as it was.
    Failed,
}

/// Modal form for creating a book.
#[derive(Debug, Clone, Default)]
pub struct AddBookForm {
    open: bool,
    values: NewBook,
    errors: FieldErrors,
}

impl AddBookForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close without submitting. Typed values and errors are kept for the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn values(&self) -> &NewBook {
        &self.values
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.values.title,
            FormField::Author => &self.values.author,
            FormField::Isbn => &self.values.isbn,
            FormField::Genre => &self.values.genre,
            FormField::Rating => &self.values.rating,
            FormField::PublicationDate => &self.values.publication_date,
        }
    }

    /// Edit one input; its validation message goes away with the edit.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.values.title = value,
            FormField::Author => self.values.author = value,
            FormField::Isbn => self.values.isbn = value,
            FormField::Genre => self.values.genre = value,
            FormField::Rating => self.values.rating = value,
            FormField::PublicationDate => self.values.publication_date = value,
        }
        self.errors.remove(field.name());
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(field.name()).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Send the current values to the service.
    pub async fn submit<A>(&mut self, api: &A) -> SubmitOutcome
    where
        A: BooksApi + ?Sized,
    {
        match api.create_book(&self.values).await {
            Ok(book) => {
                tracing::info!(book_id = %book.id, title = %book.title, "book created");
                self.values = NewBook::default();
                self.errors.clear();
                self.open = false;
                SubmitOutcome::Created(book)
            }
            Err(ApiError::Validation(fields)) => {
                let rejected: Vec<&String> = fields.keys().collect();
                tracing::debug!(fields = ?rejected, "book rejected by validation");
                self.errors = fields;
                SubmitOutcome::Rejected
            }
            Err(error) => {
                tracing::error!(%error, "error adding book");
                SubmitOutcome::Failed
            }
        }
    }
}

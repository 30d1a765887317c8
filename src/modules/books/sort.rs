use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::models::Book;

/// Column a book list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Title,
    Author,
    Isbn,
    Genre,
    Rating,
    PublicationDate,
}

impl SortKey {
    /// Field name as used on the wire and in column headers.
    pub fn field_name(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Isbn => "isbn",
            SortKey::Genre => "genre",
            SortKey::Rating => "rating",
            SortKey::PublicationDate => "publicationDate",
        }
    }

    /// Native ordering of this field between two books.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Author => a.author.cmp(&b.author),
            SortKey::Isbn => a.isbn.cmp(&b.isbn),
            SortKey::Genre => a.genre.as_str().cmp(b.genre.as_str()),
            SortKey::Rating => a.rating.cmp(&b.rating),
            SortKey::PublicationDate => a.publication_date.cmp(&b.publication_date),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key '{0}'; expected one of id, title, author, isbn, genre, rating, publicationDate")]
pub struct ParseSortKeyError(String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "isbn" => Ok(SortKey::Isbn),
            "genre" => Ok(SortKey::Genre),
            "rating" => Ok(SortKey::Rating),
            "publicationDate" | "publication-date" => Ok(SortKey::PublicationDate),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Header marker for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

/// Active sort column and direction; `key == None` keeps server order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// A header click: same column flips direction, another column starts ascending.
    pub fn request_sort(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn indicator(&self, key: SortKey) -> SortIndicator {
        match (self.key, self.direction) {
            (Some(active), SortDirection::Ascending) if active == key => SortIndicator::Ascending,
            (Some(active), SortDirection::Descending) if active == key => {
                SortIndicator::Descending
            }
            _ => SortIndicator::Unsorted,
        }
    }
}

/// Ordered view over `books`. The slice itself is never reordered and ties keep
/// their relative order.
pub fn sort_books<'a>(books: &'a [Book], state: &SortState) -> Vec<&'a Book> {
    let mut sorted: Vec<&Book> = books.iter().collect();
    if let Some(key) = state.key {
        sorted.sort_by(|a, b| {
            let ordering = key.compare(a, b);
            match state.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    sorted
}

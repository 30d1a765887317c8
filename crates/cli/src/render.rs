//! Plain-text rendering of views for the terminal.

use bookshelf_app::books::{
    AddBookForm, Book, BookListView, BooksApi, FormField, MoreDetails, PageRows, SortIndicator,
    SortKey,
};
use bookshelf_events::{Notification, UiEvent};

const COLUMNS: [(SortKey, &str, usize); 7] = [
    (SortKey::Id, "ID", 7),
    (SortKey::Title, "Title", 28),
    (SortKey::Author, "Author", 20),
    (SortKey::PublicationDate, "Publication Date", 18),
    (SortKey::Isbn, "ISBN", 15),
    (SortKey::Genre, "Genre", 12),
    (SortKey::Rating, "Rating", 8),
];

fn cell(text: &str, width: usize) -> String {
    let mut text: String = text.chars().take(width.saturating_sub(1)).collect();
    while text.chars().count() < width {
        text.push(' ');
    }
    text
}

pub fn table<A: BooksApi + ?Sized>(view: &BookListView<A>) {
    let header: String = COLUMNS
        .iter()
        .map(|(key, label, width)| {
            let marker = match view.sort_indicator(*key) {
                SortIndicator::Unsorted => "",
                SortIndicator::Ascending => " ^",
                SortIndicator::Descending => " v",
            };
            cell(&format!("{label}{marker}"), *width)
        })
        .collect();
    println!("{}", header.trim_end());

    match view.rows() {
        PageRows::Rows(rows) => {
            for book in rows {
                let values = [
                    book.id.to_string(),
                    book.title.clone(),
                    book.author.clone(),
                    book.publication_date.to_string(),
                    book.isbn.clone(),
                    book.genre.to_string(),
                    book.rating.to_string(),
                ];
                let line: String = values
                    .iter()
                    .zip(COLUMNS.iter())
                    .map(|(value, (_, _, width))| cell(value, *width))
                    .collect();
                println!("{}", line.trim_end());
            }
        }
        PageRows::Empty => println!("No Books Found"),
    }

    let controls = view.page_controls();
    if controls.visible() {
        let mut line = String::new();
        line.push_str(if controls.first_enabled() { "<< " } else { "-- " });
        line.push_str(if controls.prev_enabled() { "< " } else { "- " });
        for (n, active) in controls.items() {
            if active {
                line.push_str(&format!("[{n}] "));
            } else {
                line.push_str(&format!("{n} "));
            }
        }
        line.push_str(if controls.next_enabled() { "> " } else { "- " });
        line.push_str(if controls.last_enabled() { ">>" } else { "--" });
        println!();
        println!("{line}");
    }
}

pub fn book(book: &Book) {
    println!("{}", book.title);
    println!("  ID:               {}", book.id);
    println!("  Author:           {}", book.author);
    println!("  ISBN:             {}", book.isbn);
    println!("  Genre:            {}", book.genre.label());
    println!("  Rating:           {}", book.rating);
    println!("  Publication Date: {}", book.publication_date);
}

pub fn more_details(details: &MoreDetails) {
    println!("From Google Books:");
    let lines = [
        ("Title", details.title().map(str::to_string)),
        ("Description", details.description().map(str::to_string)),
        ("Authors", details.authors()),
        ("Thumbnail", details.thumbnail().map(str::to_string)),
        ("Categories", details.categories()),
        ("More Info", details.info_link().map(str::to_string)),
        ("Buy Link", details.buy_link().map(str::to_string)),
    ];
    for (label, value) in lines {
        if let Some(value) = value {
            println!("  {label}: {value}");
        }
    }
}

pub fn created(book: &Book) {
    println!("Added {} ({})", book.title, book.id);
}

pub fn field_errors(form: &AddBookForm) {
    println!("The book was not saved:");
    for field in FormField::ALL {
        if let Some(message) = form.error(field) {
            println!("  {field}: {message}");
        }
    }
}

pub fn events(events: Vec<UiEvent>) {
    for event in events {
        match event {
            UiEvent::Notify(Notification::Success(message)) => println!("{message}"),
            UiEvent::Notify(Notification::Error(message)) => eprintln!("{message}"),
            UiEvent::Navigate(path) => tracing::debug!(%path, "navigation ignored"),
        }
    }
}

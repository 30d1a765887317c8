mod render;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;

use bookshelf_app::books::{
    BookDetailView, BookId, BookListView, BooksApi, FormField, HttpBooksApi, LoadState, SortKey,
    SubmitOutcome,
};
use bookshelf_events::{drain, EventBus, UiEvent};
use bookshelf_http::ApiClient;
use bookshelf_kernel::settings::Settings;

const DETAIL_ROUTE_PREFIX: &str = "/books/";

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Browse and manage the book catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of the book table
    List {
        /// Column header to click; repeat to click again (e.g. `--sort rating --sort rating`)
        #[arg(long = "sort", value_name = "KEY")]
        sort: Vec<SortKey>,
        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Open the detail page of this row after listing
        #[arg(long, value_name = "ID")]
        open: Option<String>,
    },
    /// Show a book's details
    Show {
        id: String,
        /// Also fetch the third-party metadata
        #[arg(long)]
        more: bool,
    },
    /// Add a book; values are sent as typed and validated by the service
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        isbn: String,
        /// FICTION, NON_FICTION, MYSTERY, FANTASY, ROMANCE, SCI_FI or OTHERS
        #[arg(long, default_value = "")]
        genre: String,
        /// 1 to 5
        #[arg(long, default_value = "")]
        rating: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        publication_date: String,
    },
    /// Delete a book after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;

    // Settings are read before the subscriber exists, so they are logged here.
    tracing::debug!(
        env = ?settings.environment,
        api = %settings.api.base_url,
        timeout_ms = ?settings.api.request_timeout_ms,
        log_format = ?settings.telemetry.log_format,
        "settings loaded"
    );

    let client = ApiClient::new(&settings.api).with_context(|| "failed to create API client")?;
    let api: Arc<dyn BooksApi> = Arc::new(HttpBooksApi::new(client));
    let (events, mut rx) = EventBus::channel();

    match cli.command {
        Command::List { sort, page, open } => {
            list(api, events, &mut rx, &sort, page, open.map(BookId::new)).await
        }
        Command::Show { id, more } => show(api, events, BookId::new(id), more).await,
        Command::Add {
            title,
            author,
            isbn,
            genre,
            rating,
            publication_date,
        } => {
            let mut view = BookListView::new(api, events);
            let form = view.add_form_mut();
            form.open();
            form.set_field(FormField::Title, title);
            form.set_field(FormField::Author, author);
            form.set_field(FormField::Isbn, isbn);
            form.set_field(FormField::Genre, genre);
            form.set_field(FormField::Rating, rating);
            form.set_field(FormField::PublicationDate, publication_date);

            match view.submit_add_form().await {
                SubmitOutcome::Created(book) => render::created(&book),
                SubmitOutcome::Rejected => render::field_errors(view.add_form()),
                SubmitOutcome::Failed => println!("Could not add the book; see logs for details."),
            }
            render::events(drain(&mut rx));
            Ok(())
        }
        Command::Delete { id, yes } => {
            let id = BookId::new(id);
            let mut view = BookListView::new(api, events);
            view.load().await;
            if view.load_state() == LoadState::Ready && !view.books().iter().any(|b| b.id == id) {
                tracing::warn!(book_id = %id, "book is not in the current list");
            }

            view.request_delete(id);
            let confirmed = yes || confirm("Are you sure you want to delete this book?")?;
            if let Some(id) = view.confirm_delete(confirmed) {
                let result = view.api().delete_book(&id).await;
                let outcome = view.apply_delete(id, result);
                tracing::debug!(?outcome, "delete finished");
            }
            render::events(drain(&mut rx));
            Ok(())
        }
    }
}

async fn list(
    api: Arc<dyn BooksApi>,
    events: EventBus,
    rx: &mut UnboundedReceiver<UiEvent>,
    sort: &[SortKey],
    page: usize,
    open: Option<BookId>,
) -> anyhow::Result<()> {
    let mut view = BookListView::new(api.clone(), events.clone());
    if view.load().await == LoadState::Unavailable {
        println!("Books are unavailable right now.");
        return Ok(());
    }

    for key in sort {
        view.request_sort(*key);
    }

    let total = view.total_pages();
    if page == 0 || page > total {
        bail!("page {page} is out of range (1..={total})");
    }
    view.set_page(page);

    render::table(&view);

    if let Some(id) = open {
        if !view.activate_row(&id) {
            bail!("book {id} is not in the list");
        }
    }

    // Act as the router for navigation the view asked for.
    for event in drain(rx) {
        match event {
            UiEvent::Navigate(path) => {
                if let Some(id) = path.strip_prefix(DETAIL_ROUTE_PREFIX) {
                    println!();
                    show(api.clone(), events.clone(), BookId::new(id), false).await?;
                }
            }
            other => render::events(vec![other]),
        }
    }
    Ok(())
}

async fn show(
    api: Arc<dyn BooksApi>,
    events: EventBus,
    id: BookId,
    more: bool,
) -> anyhow::Result<()> {
    let mut view = BookDetailView::new(api, events, id);
    match view.load().await.ready() {
        Some(book) => render::book(book),
        None => {
            println!("Book details are unavailable.");
            return Ok(());
        }
    }

    if more {
        println!();
        match view.enter_more_details().await.ready() {
            Some(details) => render::more_details(details),
            None => println!("More details are unavailable."),
        }
    }
    Ok(())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{question} [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use portfolio_kernel::settings::Settings;
use portfolio_site::modules::books::{
    render::MarkdownRenderer,
    store::{ContentStore, FsContentStore},
    views::{format_rating, format_read_date, sorted_by_rating},
};
use portfolio_site::modules::catalog::source::CatalogSource;

#[derive(Parser)]
#[command(name = "portfolio-cli")]
#[command(version, about = "Serve and inspect the portfolio site", long_about = None)]
struct Cli {
    /// Content root holding `books/` and `catalog.json` (overrides configuration)
    #[arg(long, global = true, value_name = "DIR")]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Print every book, best rated first
    Books,
    /// Load every review and the catalog, reporting the first problem
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load().context("failed to load portfolio settings")?;
    if let Some(content) = cli.content {
        settings.content.root = content;
    }
    portfolio_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => portfolio_site::serve(&settings).await,
        Command::Books => print_books(&settings).await,
        Command::Check => check(&settings).await,
    }
}

fn book_store(settings: &Settings) -> FsContentStore {
    FsContentStore::new(settings.content.books_dir(), Arc::new(MarkdownRenderer))
}

async fn print_books(settings: &Settings) -> anyhow::Result<()> {
    let books = book_store(settings)
        .list_books()
        .await
        .context("failed to load book reviews")?;

    for book in sorted_by_rating(&books) {
        println!(
            "{}\t{}\t{} by {}\t{}",
            format_rating(book.rating),
            book.slug,
            book.title,
            book.author,
            format_read_date(&book.date)
        );
    }

    Ok(())
}

async fn check(settings: &Settings) -> anyhow::Result<()> {
    let store = book_store(settings);
    let books = store
        .list_books()
        .await
        .context("failed to load book reviews")?;

    for book in &books {
        store
            .get_book(&book.slug)
            .await
            .with_context(|| format!("failed to load review '{}'", book.slug))?
            .with_context(|| format!("review '{}' is listed but cannot be opened", book.slug))?;
    }

    let catalog = CatalogSource::new(settings.content.catalog_path())
        .load()
        .await
        .context("failed to load catalog")?;

    tracing::info!(books = books.len(), entries = catalog.len(), "content check passed");
    println!("ok: {} books, {} catalog entries", books.len(), catalog.len());
    Ok(())
}

//! Seed the record store with sample books

use bookapi_server::{config::AppConfig, models::book::NewBook, repository::Repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .init();

    let repository = Repository::connect(&config.database).await?;

    let books = [
        NewBook {
            title: "Book One".to_string(),
            author: "Author A".to_string(),
            genre: Some("Fiction".to_string()),
            read: true,
        },
        NewBook {
            title: "Book Two".to_string(),
            author: "Author B".to_string(),
            genre: Some("Non-Fiction".to_string()),
            read: false,
        },
    ];

    for book in &books {
        let created = repository.books.insert(book).await?;
        tracing::info!("Seeded '{}' as {}", created.title, created.id);
    }

    tracing::info!(
        "Seeding done, {} books in store",
        repository.books.count().await?
    );
    Ok(())
}

//! Zatrano maintenance tool.
//!
//! Loads configuration, connects to PostgreSQL and runs one maintenance
//! command against the persistence layer.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use zatrano_core::config::AppConfig;
use zatrano_core::error::AppError;
use zatrano_core::types::ListParams;
use zatrano_database::DatabasePool;
use zatrano_database::migration::run_migrations;
use zatrano_database::{
    BankRepository, CardRepository, InvitationCategoryRepository, InvitationRepository,
    SocialMediaRepository, UserRepository,
};

/// Zatrano persistence maintenance
#[derive(Debug, Parser)]
#[command(name = "zatrano", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Check that the database is reachable
    Check,
    /// Print the number of live rows per entity
    Stats {
        /// Apply pending migrations first
        #[arg(long)]
        migrate: bool,
    },
    /// List one page of cards with their links
    Cards {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Cards per page; the configured default when omitted
        #[arg(long, default_value_t = 0)]
        per_page: i64,
        /// Sort column
        #[arg(long)]
        sort_by: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli.command, config).await {
        tracing::error!(kind = %e.kind, "{}", e.message);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(command: Commands, config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Zatrano v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    let result = match command {
        Commands::Migrate => run_migrations(db.pool()).await,
        Commands::Check => check(&db).await,
        Commands::Stats { migrate } => {
            if migrate {
                run_migrations(db.pool()).await?;
            }
            stats(&db, &config).await
        }
        Commands::Cards {
            page,
            per_page,
            sort_by,
        } => cards(&db, &config, page, per_page, sort_by).await,
    };
    db.close().await;
    result
}

async fn check(db: &DatabasePool) -> Result<(), AppError> {
    if db.health_check().await? {
        tracing::info!("Database is reachable");
        Ok(())
    } else {
        Err(AppError::store_unavailable("Health check returned an unexpected value"))
    }
}

async fn cards(
    db: &DatabasePool,
    config: &AppConfig,
    page: i64,
    per_page: i64,
    sort_by: Option<String>,
) -> Result<(), AppError> {
    let repo = CardRepository::new(db.pool().clone()).with_pagination(config.pagination);
    let mut params = ListParams::new().page(page).per_page(per_page);
    params.sort_by = sort_by;

    let result = repo.find_all(&params).await?;
    for card in &result.data {
        tracing::info!(
            id = card.id,
            slug = %card.slug,
            banks = card.banks.len(),
            social_media = card.social_media.len(),
            "Card"
        );
    }
    tracing::info!(
        page = result.meta.current_page,
        per_page = result.meta.per_page,
        total_items = result.meta.total_items,
        total_pages = result.meta.total_pages,
        "Cards listed"
    );
    Ok(())
}

async fn stats(db: &DatabasePool, config: &AppConfig) -> Result<(), AppError> {
    let pool = db.pool().clone();

    let counts = [
        ("users", UserRepository::new(pool.clone()).count().await?),
        ("banks", BankRepository::new(pool.clone()).count().await?),
        (
            "social_media",
            SocialMediaRepository::new(pool.clone()).count().await?,
        ),
        (
            "invitation_categories",
            InvitationCategoryRepository::new(pool.clone()).count().await?,
        ),
        ("cards", CardRepository::new(pool.clone()).count().await?),
        (
            "invitations",
            InvitationRepository::new(pool)
                .with_keys(&config.keys)
                .count()
                .await?,
        ),
    ];

    for (table, count) in counts {
        tracing::info!(table, count, "Live rows");
    }
    Ok(())
}

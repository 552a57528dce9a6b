use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use concierge::accounts::{self, Registration};
use concierge::config::Config;
use concierge::db::models::User;
use concierge::db::Database;
use concierge::output::terminal;
use concierge::pipeline;

/// Recent analyses shown on the dashboard.
const DASHBOARD_RECENT: u32 = 10;

/// Concierge: sentiment analysis for hotel guest reviews.
///
/// Classifies reviews as positive, negative, or neutral and keeps a
/// per-user history of everything analyzed.
#[derive(Parser)]
#[command(name = "concierge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Login used by commands that record analyses.
#[derive(Args)]
struct Credentials {
    /// Username to record analyses under
    #[arg(long, env = "CONCIERGE_USER")]
    user: String,

    /// Password for that user
    #[arg(long, env = "CONCIERGE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Create a user account
    Signup {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "CONCIERGE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Repeat the password (defaults to --password)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Analyze a single review
    Analyze {
        /// The review text
        text: String,

        #[command(flatten)]
        credentials: Credentials,
    },

    /// Analyze one review per line, from a file or stdin
    Batch {
        /// Read reviews from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        credentials: Credentials,
    },

    /// Analyze the labelled review dataset
    Dataset {
        /// CSV file to analyze (default: CONCIERGE_DATASET_PATH)
        #[arg(long)]
        path: Option<PathBuf>,

        #[command(flatten)]
        credentials: Credentials,
    },

    /// Show recent analyses and totals for a user
    Dashboard {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Show system status (database location, size, table counts)
    Status,

    /// Start the JSON web API
    #[cfg(feature = "web")]
    Serve {
        #[arg(long, default_value = "3000")]
        port: u16,

        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("concierge=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Concierge database...");
            let config = Config::load()?;
            let db = concierge::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: create an account");
            println!("  concierge signup --username <name> --email <email>");
        }

        Commands::Signup {
            username,
            email,
            password,
            confirm_password,
        } => {
            let config = Config::load()?;
            let db = concierge::db::open_sqlite(&config.db_path)?;
            let registration = Registration {
                username: &username,
                email: &email,
                password: &password,
                confirm_password: confirm_password.as_deref().unwrap_or(&password),
            };
            let user = accounts::register(db.as_ref(), &registration).await?;
            println!("{}", "Registration successful!".green().bold());
            println!("  User: {} <{}>", user.username, user.email);
        }

        Commands::Analyze { text, credentials } => {
            let config = Config::load()?;
            config.require_lexicon()?;
            let db = concierge::db::open_sqlite(&config.db_path)?;
            let user = sign_in(&db, &credentials).await?;
            let scorer = pipeline::create_scorer(&config)?;

            let outcome =
                pipeline::analyze::analyze_single(db.as_ref(), scorer.as_ref(), user.id, &text)
                    .await?;
            for result in &outcome.results {
                terminal::display_result(result);
            }
        }

        Commands::Batch { file, credentials } => {
            let config = Config::load()?;
            config.require_lexicon()?;
            let db = concierge::db::open_sqlite(&config.db_path)?;
            let user = sign_in(&db, &credentials).await?;
            let scorer = pipeline::create_scorer(&config)?;

            let raw = match &file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read reviews from {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read reviews from stdin")?;
                    buf
                }
            };

            let outcome =
                pipeline::analyze::analyze_batch(db.as_ref(), scorer.as_ref(), user.id, &raw)
                    .await?;
            terminal::display_batch(&outcome);
        }

        Commands::Dataset { path, credentials } => {
            let config = Config::load()?;
            config.require_lexicon()?;
            let db = concierge::db::open_sqlite(&config.db_path)?;
            let user = sign_in(&db, &credentials).await?;
            let scorer = pipeline::create_scorer(&config)?;
            let path = path.unwrap_or_else(|| config.dataset_path.clone());

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg}")?);
            spinner.set_message(format!("Analyzing {}", path.display()));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let report =
                pipeline::dataset::run(db.as_ref(), scorer.as_ref(), user.id, &path).await;
            spinner.finish_and_clear();

            let report = report?;
            terminal::display_dataset_report(&report);
            println!(
                "\n{}",
                format!(
                    "Saved the first {} results to your history.",
                    report.results.len().min(pipeline::dataset::SAVED_SAMPLE)
                )
                .dimmed()
            );
        }

        Commands::Dashboard { credentials } => {
            let config = Config::load()?;
            let db = concierge::db::open_sqlite(&config.db_path)?;
            let user = sign_in(&db, &credentials).await?;

            let recent = db.get_recent_analyses(user.id, DASHBOARD_RECENT).await?;
            let stats = db.get_user_stats(user.id).await?;
            terminal::display_dashboard(&user, &stats, &recent);
        }

        Commands::Status => {
            let config = Config::load()?;
            if !concierge::status::is_initialized(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `concierge init` to set up the database.");
                return Ok(());
            }
            let db = concierge::db::open_sqlite(&config.db_path)?;
            concierge::status::show(&db, &config).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            config.require_session_secret()?;
            config.require_lexicon()?;
            let db = concierge::db::initialize_sqlite(&config.db_path)?;
            let scorer: Arc<dyn concierge::sentiment::PolarityScorer> =
                Arc::from(pipeline::create_scorer(&config)?);
            concierge::web::run_server(config, db, scorer, port, &bind).await?;
        }
    }

    Ok(())
}

/// Log in with the given credentials.
async fn sign_in(db: &Arc<dyn Database>, credentials: &Credentials) -> Result<User> {
    let user = accounts::authenticate(db.as_ref(), &credentials.user, &credentials.password)
        .await?;
    info!(user = %user.username, "Signed in");
    Ok(user)
}


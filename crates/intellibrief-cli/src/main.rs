mod briefs;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use intellibrief_core::{AppConfig, UserId};
use intellibrief_db::{BriefStore, MemoryBriefStore, PgBriefStore};
use intellibrief_narrative::ExportFormat;
use intellibrief_signals::SignalCollector;
use rand::{rngs::StdRng, SeedableRng};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "intellibrief")]
#[command(about = "Strategic outreach briefs from public company signals")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect signals for a company and save a new brief
    Create {
        /// Target company name
        #[arg(long)]
        company: String,
        /// What you want to sell or achieve with this company
        #[arg(long)]
        intent: String,
        /// Company website, used for the logo
        #[arg(long)]
        website: Option<String>,
        /// Owner of the brief
        #[arg(long)]
        user: Option<String>,
        /// Print the brief without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// List briefs, newest first
    List {
        #[arg(long)]
        user: Option<String>,
    },
    /// Print one brief
    Show {
        id: Uuid,
        #[arg(long)]
        user: Option<String>,
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a brief's narrative from its stored signals
    Improve {
        id: Uuid,
        #[arg(long)]
        user: Option<String>,
    },
    /// Permanently delete a brief
    Delete {
        id: Uuid,
        #[arg(long)]
        user: Option<String>,
    },
    /// Database operations
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Export briefs as CSV or HTML
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        #[arg(long)]
        user: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Csv,
    Html,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Html => ExportFormat::Html,
        }
    }
}

fn owner(user: Option<&str>) -> Option<UserId> {
    user.and_then(UserId::parse)
}

fn simulation_rng(config: &AppConfig) -> StdRng {
    match config.simulation_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool_config = intellibrief_db::PoolConfig::from_app_config(config);
    let database_url = config.require_database_url()?;
    Ok(intellibrief_db::connect_pool(database_url, pool_config).await?)
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<PgBriefStore> {
    let pool = connect(config).await?;
    intellibrief_db::run_migrations(&pool).await?;
    Ok(PgBriefStore::new(pool))
}

/// The in-memory store for a dry run, Postgres otherwise.
///
/// A dry run never reads `DATABASE_URL`.
async fn open_store(config: &AppConfig, dry_run: bool) -> anyhow::Result<Box<dyn BriefStore>> {
    if dry_run {
        return Ok(Box::new(MemoryBriefStore::new()));
    }
    Ok(Box::new(connect_store(config).await?))
}

async fn run_db(command: DbCommands, config: &AppConfig) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    match command {
        DbCommands::Ping => {
            intellibrief_db::ping(&pool).await?;
            println!("database ok");
        }
        DbCommands::Migrate => {
            let applied = intellibrief_db::run_migrations(&pool).await?;
            println!("migrations applied: {applied}");
        }
    }
    pool.close().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("intellibrief: pass --help to see available commands");
        return Ok(());
    };

    let config = intellibrief_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Db { command } = command {
        return run_db(command, &config).await;
    }

    let dry_run = matches!(command, Commands::Create { dry_run: true, .. });
    let store = open_store(&config, dry_run).await?;

    run(command, &config, store.as_ref()).await
}

async fn run(command: Commands, config: &AppConfig, store: &dyn BriefStore) -> anyhow::Result<()> {
    match command {
        Commands::Create {
            company,
            intent,
            website,
            user,
            dry_run,
        } => {
            let collector =
                SignalCollector::from_credentials(&config.credentials, &config.user_agent)?;
            let mut rng = simulation_rng(config);
            let input = briefs::CreateInput {
                company: &company,
                intent: &intent,
                website: website.as_deref(),
                owner: owner(user.as_deref()),
            };
            briefs::run_create(store, &collector, &input, &mut rng, dry_run).await
        }
        Commands::List { user } => briefs::run_list(store, owner(user.as_deref()).as_ref()).await,
        Commands::Show { id, user, json } => {
            briefs::run_show(store, id, owner(user.as_deref()).as_ref(), json).await
        }
        Commands::Improve { id, user } => {
            briefs::run_improve(store, id, owner(user.as_deref()).as_ref()).await
        }
        Commands::Delete { id, user } => {
            briefs::run_delete(store, id, owner(user.as_deref()).as_ref()).await
        }
        Commands::Db { command } => run_db(command, config).await,
        Commands::Export { format, user, out } => {
            briefs::run_export(
                store,
                format.into(),
                owner(user.as_deref()).as_ref(),
                out.as_deref(),
            )
            .await
        }
    }
}

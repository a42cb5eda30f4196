mod commands;
mod context;
mod view;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use geolens_analytics::EntityKind;

use crate::context::AppContext;

#[derive(Debug, Parser)]
#[command(name = "geolens")]
#[command(about = "LLM answer-engine visibility dashboard")]
struct Cli {
    #[command(flatten)]
    auth: AuthArgs,

    #[command(flatten)]
    scope: ScopeArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct AuthArgs {
    /// Login email.
    #[arg(long, env = "GEOLENS_EMAIL")]
    email: String,

    /// Login password.
    #[arg(long, env = "GEOLENS_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct ScopeArgs {
    /// Customer to analyze. Admins may pick any customer; everyone else is
    /// pinned to their profile's customer.
    #[arg(long)]
    customer: Option<String>,

    /// Query to analyze, for commands scoped to a single query.
    #[arg(long)]
    query: Option<String>,

    /// Start of an inclusive date-range filter (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of an inclusive date-range filter (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Competitor,
    Source,
    Domain,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Competitor => EntityKind::Competitor,
            KindArg::Source => EntityKind::Source,
            KindArg::Domain => EntityKind::Domain,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List distinct customers (administrators only).
    Customers,
    /// List distinct queries for the resolved customer.
    Queries,
    /// GEO visibility score card for a customer+query.
    Score {
        /// Trailing window in days.
        #[arg(long)]
        days: Option<i64>,
    },
    /// Top competitors across all of the customer's queries.
    Competitors {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Top cited sources across all of the customer's queries.
    Sources {
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
    /// Cited sources grouped by domain.
    Domains {
        #[arg(long, default_value_t = 15)]
        top: usize,
    },
    /// Daily trend for one entity.
    Trend {
        /// Competitor name, source URL, or domain to track.
        #[arg(long)]
        entity: String,
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Restrict the trend to the selected `--query`.
        #[arg(long)]
        query_only: bool,
    },
    /// Daily mentioned/top-ranked performance for the customer.
    Performance,
    /// Full markdown visibility report.
    Report,
    /// Dump the fetched rows.
    Raw {
        #[arg(long)]
        json: bool,
    },
    /// Change the account password.
    SetPassword {
        #[arg(long)]
        new_password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = geolens_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let mut ctx = AppContext::init(config, &cli.auth.email, &cli.auth.password).await?;

    match cli.command {
        Commands::Customers => commands::customers::run(&mut ctx).await,
        Commands::Queries => commands::queries::run(&mut ctx, &cli.scope).await,
        Commands::Score { days } => commands::score::run(&mut ctx, &cli.scope, days).await,
        Commands::Competitors { top } => {
            commands::competitors::run(&mut ctx, &cli.scope, top).await
        }
        Commands::Sources { top } => commands::sources::run(&mut ctx, &cli.scope, top).await,
        Commands::Domains { top } => commands::domains::run(&mut ctx, &cli.scope, top).await,
        Commands::Trend {
            entity,
            kind,
            query_only,
        } => commands::trend::run(&mut ctx, &cli.scope, &entity, kind.into(), query_only).await,
        Commands::Performance => commands::performance::run(&mut ctx, &cli.scope).await,
        Commands::Report => commands::report::run(&mut ctx, &cli.scope).await,
        Commands::Raw { json } => commands::raw::run(&mut ctx, &cli.scope, json).await,
        Commands::SetPassword { new_password } => {
            commands::set_password::run(&ctx, &new_password).await
        }
    }
}

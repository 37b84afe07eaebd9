mod report;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dealrecon_engine::{OutputMode, SchemaVersion};

#[derive(Debug, Parser)]
#[command(name = "dealrecon-cli")]
#[command(about = "Weekly promotional-deals reconciliation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile the weekly deals sheet against both feeds and write the report.
    Report {
        /// Forward-looking horizon in days; non-positive values fall back
        /// to the default.
        #[arg(long, env = "DEALRECON_DAYS_OUT", default_value_t = 10)]
        days_out: i64,

        /// Source-sheet layout revision.
        #[arg(long, env = "DEALRECON_SCHEMA", default_value = "v3")]
        schema: SchemaVersion,

        /// Which rows reach the destination; defaults to the revision's
        /// own mode.
        #[arg(long, env = "DEALRECON_OUTPUT")]
        output: Option<OutputMode>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dealrecon_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report {
            days_out,
            schema,
            output,
        } => report::run(&config, days_out, schema, output).await,
    }
}

#[macro_use]
extern crate log;

use std::{fs::File, io, path::PathBuf, str::FromStr};

use anyhow::{Context, anyhow};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use hasr::{
    DatabaseHandler, HasrEngine, SearchHasrRows, activity_log,
    algo::{HasrConfig, StratumWeights},
};

#[derive(Parser)]
pub struct HasrCli {
    #[arg(env, long)]
    pub database_url: Option<String>,
    #[command(flatten)]
    pub config: ConfigArgs,
    #[clap(subcommand)]
    pub subcommand: HasrCommand,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Days in the baseline window
    #[arg(env, long, default_value_t = 90)]
    pub baseline_window_days: u32,
    /// Days in the recent window, ending on the anchor date
    #[arg(env, long, default_value_t = 21)]
    pub recent_window_days: u32,
    /// Daily decay factor of the window weights
    #[arg(env, long, default_value_t = 0.978)]
    pub decay_lambda: f64,
    /// Weighted load-per-minute quantile above which a session is Hard
    #[arg(env, long, default_value_t = 0.70)]
    pub quantile_hard: f64,
    /// Weighted duration quantile above which a non-Hard session is Long
    #[arg(env, long, default_value_t = 0.80)]
    pub quantile_long: f64,
    /// Composite weights as `easy,hard,long`
    #[arg(env, long, default_value = "0.15,0.45,0.40")]
    pub stratum_weights: WeightsArg,
    /// Activity log column holding the session load
    #[arg(env, long, default_value = "Training load")]
    pub aggregate_variable: String,
}

impl From<ConfigArgs> for HasrConfig {
    fn from(args: ConfigArgs) -> Self {
        HasrConfig {
            baseline_window_days: args.baseline_window_days,
            recent_window_days: args.recent_window_days,
            decay_lambda: args.decay_lambda,
            stratum_weights: args.stratum_weights.0,
            quantile_hard: args.quantile_hard,
            quantile_long: args.quantile_long,
            aggregate_variable: args.aggregate_variable,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WeightsArg(StratumWeights);

impl FromStr for WeightsArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;

        match values[..] {
            [easy, hard, long] => Ok(Self(StratumWeights { easy, hard, long })),
            _ => Err(anyhow!("Expected three weights as `easy,hard,long`")),
        }
    }
}

#[derive(Subcommand)]
pub enum HasrCommand {
    ///
    /// Import sessions from an activity log CSV
    ///
    ImportActivities { file: PathBuf },
    ///
    /// Calculate HASR rows for every session after the last stored one
    ///
    Calculate,
    ///
    /// Export stored HASR rows as CSV
    ///
    Export { file: PathBuf },
    ///
    /// Generate shell completions
    ///
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("sqlx::query", log::LevelFilter::Off)
        .filter_module("sea_orm_migration::migrator", log::LevelFilter::Off)
        .init();

    let cli = HasrCli::parse();
    if let HasrCommand::Completions { shell } = cli.subcommand {
        let mut command = HasrCli::command();
        clap_complete::generate(shell, &mut command, "hasr", &mut io::stdout());
        return Ok(());
    }

    let config = HasrConfig::from(cli.config);
    config.validate()?;
    let database_url = cli
        .database_url
        .context("--database-url or DATABASE_URL is required")?;
    let db_handler = DatabaseHandler::new(database_url).await?;

    match cli.subcommand {
        HasrCommand::ImportActivities { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open {}", file.display()))?;
            let sessions = activity_log::read_sessions(reader, &config.aggregate_variable)?;
            let count = sessions.len();
            db_handler.create_sessions(sessions).await?;
            info!("Imported {} sessions from {}", count, file.display());
            Ok(())
        }
        HasrCommand::Calculate => {
            let engine = HasrEngine::new(db_handler.clone(), db_handler, config)?;
            let report = engine.run().await?;
            println!("{report}");
            Ok(())
        }
        HasrCommand::Export { file } => {
            let rows = db_handler
                .search_hasr_rows(SearchHasrRows::default())
                .await?;
            let writer = File::create(&file)
                .with_context(|| format!("Failed to create {}", file.display()))?;
            activity_log::write_rows(writer, &rows, &config.aggregate_abbreviation())?;
            info!("Exported {} rows to {}", rows.len(), file.display());
            Ok(())
        }
        HasrCommand::Completions { .. } => Ok(()),
    }
}

//! Cadence: human-readable views of scheduler jobs and triggers
//!
//! Main binary with subcommands:
//! - `jobs`: Summaries of every job in a scheduler snapshot
//! - `triggers`: Kind and schedule description of a job's triggers
//! - `describe`: Describe a single cron expression

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cadence_jobs::{DEFAULT_GROUP, JobKey, JobSummarizer, SchedulerSnapshot};
use cadence_schedule::{CronTranslator, EnglishCron};

mod render;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Describe scheduler jobs and triggers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List job summaries
    Jobs {
        /// Scheduler snapshot file (JSON)
        #[arg(long, env = "CADENCE_SNAPSHOT")]
        snapshot: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Describe the triggers of one job
    Triggers {
        /// Scheduler snapshot file (JSON)
        #[arg(long, env = "CADENCE_SNAPSHOT")]
        snapshot: PathBuf,

        /// Job name
        #[arg(long)]
        job: String,

        /// Job group
        #[arg(long, default_value = DEFAULT_GROUP)]
        group: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Describe a cron expression
    Describe {
        /// Cron expression, e.g. "0 15 10 ? * MON-FRI"
        #[arg(long)]
        cron: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cadence=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Jobs { snapshot, json } => {
            let summarizer = load(&snapshot).await?;
            let summaries = summarizer.list_jobs().await.into_diagnostic()?;

            if json {
                print_json(&summaries)?;
            } else {
                for summary in &summaries {
                    println!("{}", render::job_line(summary));
                }
            }
            Ok(())
        }

        Commands::Triggers {
            snapshot,
            job,
            group,
            json,
        } => {
            let summarizer = load(&snapshot).await?;
            let key = JobKey::new(group, job);
            let triggers = summarizer.triggers_of_job(&key).await.into_diagnostic()?;

            if json {
                print_json(&triggers)?;
            } else {
                for trigger in &triggers {
                    println!("{}", render::trigger_line(trigger));
                }
            }
            Ok(())
        }

        Commands::Describe { cron } => {
            let description = EnglishCron.describe(&cron).into_diagnostic()?;
            println!("{description}");
            Ok(())
        }
    }
}

async fn load(path: &std::path::Path) -> Result<JobSummarizer<SchedulerSnapshot>> {
    tracing::debug!(path = %path.display(), "loading scheduler snapshot");
    let snapshot = SchedulerSnapshot::load_from_path(path)
        .await
        .into_diagnostic()?;
    Ok(JobSummarizer::new(snapshot))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

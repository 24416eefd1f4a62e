mod commands;
mod logging;
mod render;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};

use commands::CliContext;

#[derive(Parser)]
#[command(name = "cycledir")]
#[command(about = "Record period start dates and predict your next cycle")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the start of a period
    Log {
        /// Start date (YYYY-MM-DD)
        date: String,
    },
    /// Remove a recorded period start
    Remove {
        /// Start date (YYYY-MM-DD)
        date: String,
    },
    /// List recorded periods, most recent first
    List {
        /// Show at most this many
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show or change cycle settings
    Settings {
        /// Days from one period start to the next
        #[arg(short, long)]
        cycle_length: Option<i64>,

        /// Days a period lasts
        #[arg(short, long)]
        period_length: Option<i64>,
    },
    /// Predict the next period, ovulation day and fertile window
    Predict {
        /// Predict from this date instead of the latest record (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Override the stored cycle length
        #[arg(short, long)]
        cycle_length: Option<i64>,

        /// Override the stored period length
        #[arg(short, long)]
        period_length: Option<i64>,

        /// Print the prediction as JSON (null when unavailable)
        #[arg(long)]
        json: bool,
    },
    /// Countdown to the next period
    Status,
    /// Month calendar with recorded and predicted days marked
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show configuration paths and defaults
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Command output is the interface here; only surface problems.
    logging::init("warn");
    let ctx = CliContext::load()?;

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Log { date } => commands::log::run(&ctx, &date),
        Commands::Remove { date } => commands::remove::run(&ctx, &date),
        Commands::List { limit } => commands::list::run(&ctx, limit),
        Commands::Settings {
            cycle_length,
            period_length,
        } => commands::settings::run(&ctx, cycle_length, period_length),
        Commands::Predict {
            from,
            cycle_length,
            period_length,
            json,
        } => commands::predict::run(&ctx, from.as_deref(), cycle_length, period_length, json),
        Commands::Status => commands::status::run(&ctx, today),
        Commands::Calendar { month } => commands::calendar::run(&ctx, month.as_deref(), today),
        Commands::Config => commands::config::run(&ctx),
    }
}

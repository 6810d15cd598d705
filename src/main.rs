use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cc_savings::{Card, ChartConfig, MonthlySavingsRecord, Transaction, loader, sample};
use clap::{Parser, Subcommand, ValueEnum};
use tabled::builder::Builder;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Credit Card Savings: monthly reward savings by category
#[derive(Parser)]
#[command(name = "cc-savings", version, about)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate transactions into monthly savings rows
    Chart {
        /// JSON array of transactions
        #[arg(long)]
        transactions: PathBuf,
        /// JSON card catalog (object keyed by id, or array)
        #[arg(long)]
        cards: PathBuf,
        /// Chart config (categories, colors, point value)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Run the aggregation on the built-in sample data
    Demo {
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// List tracked categories and their legend colors
    Categories {
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write the default chart config to a file
    InitConfig {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Chart {
            transactions,
            cards,
            config,
            format,
        } => {
            let config = load_config(config.as_deref())?;
            let txn_path = transactions;
            let transactions = loader::load_transactions(&txn_path).with_context(|| {
                format!("Failed to load transactions from {}", txn_path.display())
            })?;
            let card_path = cards;
            let cards = loader::load_cards(&card_path)
                .with_context(|| format!("Failed to load cards from {}", card_path.display()))?;
            info!(
                transactions = transactions.len(),
                cards = cards.len(),
                "loaded inputs"
            );
            run_chart(&transactions, &cards, &config, format)?;
        }

        Commands::Demo { format } => {
            let config = ChartConfig::default();
            run_chart(&sample::transactions(), &sample::cards(), &config, format)?;
        }

        Commands::Categories { config } => {
            let config = load_config(config.as_deref())?;
            let mut builder = Builder::default();
            builder.push_record(["category", "color"]);
            for series in &config.categories {
                builder.push_record([series.name.clone(), series.color.clone()]);
            }
            println!("{}", builder.build());
        }

        Commands::InitConfig { path } => {
            ChartConfig::default()
                .save(&path)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ChartConfig> {
    match path {
        Some(path) => ChartConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ChartConfig::default()),
    }
}

fn run_chart(
    transactions: &[Transaction],
    cards: &HashMap<String, Card>,
    config: &ChartConfig,
    format: Format,
) -> Result<()> {
    let records = cc_savings::aggregate_with(
        transactions,
        cards,
        &config.tracked_categories(),
        &config.options(),
    )
    .context("Failed to aggregate savings")?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        Format::Table if records.is_empty() => println!("No savings to chart."),
        Format::Table => println!("{}", render_table(&records, &config.tracked_categories())),
    }
    Ok(())
}

fn render_table(records: &[MonthlySavingsRecord], categories: &[String]) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["month".to_string()];
    header.extend(categories.iter().cloned());
    header.push("total".to_string());
    builder.push_record(header);

    for record in records {
        let mut row = vec![record.month.clone()];
        row.extend(record.values.iter().map(|(_, value)| format!("{value:.2}")));
        row.push(format!("{:.2}", record.total()));
        builder.push_record(row);
    }

    builder.build().to_string()
}

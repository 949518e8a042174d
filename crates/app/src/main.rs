use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};
use expense_store::{
    Amount, CategoryTotal, ExpenseFilter, ExpenseOrder, Intent, Period, Store,
};
use serde::Serialize;
use serde_json::Value;

mod settings;

#[derive(Parser, Debug)]
#[command(name = "expense_tracker")]
#[command(about = "Inspect and query the expense document store")]
struct Cli {
    /// Settings file, without extension (also read from `EXPENSES_CONFIG`).
    #[arg(long, env = "EXPENSES_CONFIG", default_value = "settings")]
    config: String,

    /// Override the document path from the settings.
    #[arg(long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the document with empty collections if it is missing.
    Init,
    /// List a user's expenses, newest date first.
    Expenses {
        user_id: u64,
        /// Only today's expenses, most recently recorded first.
        #[arg(long)]
        today: bool,
    },
    /// Total, current month, count and per-category totals for a user.
    Summary { user_id: u64 },
    /// Today's total and count for a user.
    Daily { user_id: u64 },
    /// Run any intent, e.g. `exec '"delete_expense"' '[3, 1]'`.
    Exec {
        /// Intent as JSON.
        intent: String,
        /// Positional parameters as a JSON array.
        #[arg(default_value = "[]")]
        params: String,
    },
}

#[derive(Debug, Serialize)]
struct Summary {
    total: Amount,
    monthly: Amount,
    count: usize,
    categories: Vec<CategoryTotal>,
}

#[derive(Debug, Serialize)]
struct Daily {
    total: Amount,
    count: usize,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_tracker={level},expense_store={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let path = cli.data.unwrap_or(settings.store.path);
    tracing::debug!(path = %path.display(), "opening store");
    let store = Store::builder()
        .path(path)
        .id_strategy(settings.store.id_strategy)
        .recover_malformed(settings.store.recover_malformed)
        .build()
        .await?;

    match cli.command {
        Command::Init => {
            println!("document ready: {}", store.documents().path().display());
        }
        Command::Expenses { user_id, today } => {
            let (period, order) = if today {
                (Period::Today, ExpenseOrder::CreatedAtDesc)
            } else {
                (Period::All, ExpenseOrder::DateDesc)
            };
            let expenses = store
                .expenses(ExpenseFilter::user(user_id, period), order)
                .await?;
            print_json(&expenses)?;
        }
        Command::Summary { user_id } => {
            let summary = Summary {
                total: store
                    .sum_expenses(ExpenseFilter::user(user_id, Period::All))
                    .await?,
                monthly: store
                    .sum_expenses(ExpenseFilter::user(user_id, Period::CurrentMonth))
                    .await?,
                count: store
                    .count_expenses(ExpenseFilter::user(user_id, Period::All))
                    .await?,
                categories: store
                    .expenses_by_category(ExpenseFilter::user(user_id, Period::All))
                    .await?,
            };
            print_json(&summary)?;
        }
        Command::Daily { user_id } => {
            let today = ExpenseFilter::user(user_id, Period::Today);
            let daily = Daily {
                total: store.sum_expenses(today).await?,
                count: store.count_expenses(today).await?,
            };
            print_json(&daily)?;
        }
        Command::Exec { intent, params } => {
            let intent: Intent = serde_json::from_str(&intent)?;
            let params: Vec<Value> = serde_json::from_str(&params)?;
            let result = store.execute(intent, &params).await?;
            tracing::info!(?intent, "query executed");
            print_json(&result)?;
        }
    }

    Ok(())
}

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use expense_tracker::{
    load_settings, render_text, ClearOutcome, ExpenseForm, ExpenseTracker, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "expense-tracker", version, about = "In-memory expense tracker")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Currency symbol for rendered amounts (overrides config)
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// Run a short scripted session and print the report after each step
    Demo,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings()?;
    if let Some(symbol) = &args.currency {
        settings.currency_symbol = symbol.clone();
    }

    match args.command.unwrap_or(Command::Tui) {
        Command::Demo => {
            init_logging(&settings, args.log_file.as_ref(), true)?;
            run_demo(&settings)?;
        }
        Command::Tui => {
            // stderr would scribble over the alternate screen
            init_logging(&settings, args.log_file.as_ref(), false)?;
            run_ui_mode(&settings)?;
        }
    }

    Ok(())
}

fn init_logging(settings: &Settings, log_file: Option<&PathBuf>, allow_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if allow_stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }

    Ok(())
}

fn run_demo(settings: &Settings) -> Result<()> {
    println!("💸 Expense Tracker - Demo Session");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut tracker = ExpenseTracker::from_settings(settings)?;

    println!("\n📭 Empty ledger\n");
    print!("{}", render_text(&tracker.view()));

    println!("\n➕ Adding two expenses\n");
    let lunch = tracker.submit(&demo_form("Lunch", "250", "Food", "2024-05-01"))?;
    tracker.submit(&demo_form("Bus", "50", "Transport", "2024-05-02"))?;
    print!("{}", render_text(&tracker.view()));

    println!("\n🚫 Rejected: negative amount\n");
    if let Err(e) = tracker.submit(&demo_form("Refund", "-20", "Other", "2024-05-03")) {
        println!("  {}", e.user_message());
    }

    println!("\n🗑️  Deleting '{}'\n", lunch.description());
    tracker.delete(lunch.id());
    print!("{}", render_text(&tracker.view()));

    println!("\n🧹 Clearing everything\n");
    let mut yes = |_: &str| true;
    for _ in 0..2 {
        match tracker.clear_all(&mut yes) {
            ClearOutcome::Cleared(n) => println!("  ✓ Removed {} expense(s)", n),
            outcome => {
                if let Some(msg) = outcome.message() {
                    println!("  {}", msg);
                }
            }
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    print!("{}", render_text(&tracker.view()));

    Ok(())
}

fn demo_form(description: &str, amount: &str, category: &str, date: &str) -> ExpenseForm {
    ExpenseForm {
        description: description.to_string(),
        amount: amount.to_string(),
        category: category.to_string(),
        date: date.to_string(),
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    let tracker = ExpenseTracker::from_settings(settings)?;
    let mut app = ui::App::new(tracker, chrono::Local::now().date_naive());
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed. {} expense(s) discarded with the session.", app.tracker.ledger().len());

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or run the scripted session: expense-tracker demo");
    std::process::exit(1);
}

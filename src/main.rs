use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::{settings::Style, Table, Tabled};

use statement::config::{
    config_dir, default_records_path, load_config, resolve_output_dir, CONFIG_TEMPLATE,
    HISTORY_TEMPLATE,
};
use statement::error::{Result, StatementError};
use statement::pdf::format::{day_with_weekday, format_money};
use statement::pdf::{build_document, SourcePrinter, TypstPrinter};
use statement::print::PrintScheduler;
use statement::record::load_records;
use statement::view::{derive, facilities, reduce, Action, Effect, ViewState};

#[derive(Parser)]
#[command(name = "statement")]
#[command(version, about = "Monthly service statements and 8-up receipts", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.statement or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List facilities found in the service history
    Facilities {
        /// Service history JSON (default: <config-dir>/history.json)
        #[arg(short, long)]
        records: Option<PathBuf>,
    },

    /// Show the records of one month
    List {
        /// Service history JSON (default: <config-dir>/history.json)
        #[arg(short, long)]
        records: Option<PathBuf>,

        /// Month to show, YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Only records of this facility
        #[arg(short, long)]
        facility: Option<String>,
    },

    /// Print the full statement, or 8-up receipts with --receipts
    Print {
        /// Service history JSON (default: <config-dir>/history.json)
        #[arg(short, long)]
        records: Option<PathBuf>,

        /// Month to print, YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Only records of this facility
        #[arg(short, long)]
        facility: Option<String>,

        /// Print individual receipts instead of the statement
        #[arg(long)]
        receipts: bool,

        /// Output PDF path (a directory with --source-only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the Typst source and data instead of compiling a PDF
        #[arg(long)]
        source_only: bool,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("STATEMENT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Facilities { records } => cmd_facilities(&cfg_dir, records),
        Commands::List {
            records,
            month,
            facility,
        } => cmd_list(&cfg_dir, records, month, facility),
        Commands::Print {
            records,
            month,
            facility,
            receipts,
            output,
            source_only,
            open,
        } => {
            let opts = PrintOptions {
                receipts,
                output,
                source_only,
                open,
            };
            cmd_print(&cfg_dir, records, month, facility, opts).await
        }
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(StatementError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(default_records_path(cfg_dir), HISTORY_TEMPLATE)?;

    println!("Initialized statement config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your business details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Export service history to:   {}",
        default_records_path(cfg_dir).display()
    );
    println!();
    println!("Then print a month:");
    println!("  statement print --month <YYYY-MM> [--facility <name>] [--receipts]");

    Ok(())
}

/// Apply the command-line selections to a fresh view state
fn select(month: Option<String>, facility: Option<String>) -> ViewState {
    let mut state = ViewState::new(chrono::Local::now().date_naive());
    if let Some(month) = month {
        state = reduce(&state, Action::SelectMonth(month)).0;
    }
    if let Some(facility) = facility {
        state = reduce(&state, Action::SelectFacility(facility)).0;
    }
    state
}

fn records_path(cfg_dir: &Path, records: Option<PathBuf>) -> Result<PathBuf> {
    match records {
        Some(path) => Ok(path),
        None if cfg_dir.exists() => Ok(default_records_path(cfg_dir)),
        None => Err(StatementError::ConfigNotFound(cfg_dir.to_path_buf())),
    }
}

/// Load config.toml when the config dir exists, defaults otherwise
fn config_or_default(cfg_dir: &Path) -> Result<statement::Config> {
    if cfg_dir.exists() {
        load_config(cfg_dir)
    } else {
        Ok(statement::Config::default())
    }
}

#[derive(Tabled)]
struct FacilityRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "FACILITY")]
    name: String,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "NO")]
    number: usize,
    #[tabled(rename = "DAY")]
    day: String,
    #[tabled(rename = "FACILITY")]
    facility: String,
    #[tabled(rename = "ROOM")]
    room: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "MENU")]
    menu: String,
    #[tabled(rename = "PRICE")]
    price: String,
}

/// List facilities found in the service history
fn cmd_facilities(cfg_dir: &Path, records: Option<PathBuf>) -> Result<()> {
    let records = load_records(&records_path(cfg_dir, records)?)?;
    let names = facilities(&records);

    if names.is_empty() {
        println!("No facilities in the service history.");
        return Ok(());
    }

    let rows: Vec<FacilityRow> = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| FacilityRow { index: i + 1, name })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Show the sorted records of one month with their total
fn cmd_list(
    cfg_dir: &Path,
    records: Option<PathBuf>,
    month: Option<String>,
    facility: Option<String>,
) -> Result<()> {
    let path = records_path(cfg_dir, records)?;
    let config = config_or_default(cfg_dir)?;
    let records = load_records(&path)?;
    let state = select(month, facility);
    let view = derive(&records, &state);
    let symbol = &config.statement.currency_symbol;

    if view.sorted.is_empty() {
        println!("No records for {}.", describe_selection(&state));
        return Ok(());
    }

    let rows: Vec<RecordRow> = view
        .sorted
        .iter()
        .enumerate()
        .map(|(i, r)| RecordRow {
            number: i + 1,
            day: day_with_weekday(r.date),
            facility: r.facility.clone().unwrap_or_default(),
            room: r.room.clone(),
            name: r.name.clone(),
            menu: r.menu.clone(),
            price: format_money(r.price, symbol),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!(
        "Total: {} ({} records, {})",
        format_money(view.total, symbol),
        view.sorted.len(),
        describe_selection(&state)
    );

    Ok(())
}

fn describe_selection(state: &ViewState) -> String {
    if state.selected_facility.is_empty() {
        state.selected_month.clone()
    } else {
        format!("{} at {}", state.selected_month, state.selected_facility)
    }
}

/// Default output name, e.g. `receipts-2024-05-Sunrise`
fn output_stem(state: &ViewState) -> String {
    let mut stem = format!("{}-{}", state.mode, state.selected_month);
    if !state.selected_facility.is_empty() {
        stem.push('-');
        stem.push_str(&state.selected_facility);
    }
    stem.chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '_' } else { c })
        .collect()
}

struct PrintOptions {
    receipts: bool,
    output: Option<PathBuf>,
    source_only: bool,
    open: bool,
}

/// Switch to the requested template, commit it, then print after the delay
async fn cmd_print(
    cfg_dir: &Path,
    records: Option<PathBuf>,
    month: Option<String>,
    facility: Option<String>,
    opts: PrintOptions,
) -> Result<()> {
    let path = records_path(cfg_dir, records)?;
    let config = config_or_default(cfg_dir)?;
    let records = load_records(&path)?;

    let action = if opts.receipts {
        Action::PrintReceipts
    } else {
        Action::PrintStatement
    };
    let (state, effect) = reduce(&select(month, facility), action);
    let Some(Effect::RequestPrint(mode)) = effect else {
        return Ok(());
    };

    let view = derive(&records, &state);
    let document = build_document(&view, &state, &config);
    let pages = document.page_count();

    if pages == 0 {
        println!("No records for {}. Nothing to print.", describe_selection(&state));
        return Ok(());
    }

    let output_dir = resolve_output_dir(&config.print.output_dir, cfg_dir);
    let stem = output_stem(&state);
    let scheduler = PrintScheduler::new(Duration::from_millis(config.print.delay_ms));

    let handle = if opts.source_only {
        let dir = opts.output.unwrap_or_else(|| output_dir.join(&stem));
        scheduler.schedule(SourcePrinter { dir }, document)
    } else {
        let output = opts
            .output
            .unwrap_or_else(|| output_dir.join(format!("{stem}.pdf")));
        scheduler.schedule(
            TypstPrinter {
                output,
                open: opts.open,
            },
            document,
        )
    };
    let saved = handle.wait().await?;

    println!("Printed {} for {}", mode, describe_selection(&state));
    println!("  Records: {}", view.sorted.len());
    println!("  Pages:   {}", pages);
    println!("  Total:   {}", format_money(view.total, &config.statement.currency_symbol));
    println!("  Saved:   {}", saved.display());

    Ok(())
}

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use account_normalizer::normalize::ColumnFormatting;
use account_normalizer::pipeline::{self, OutputPaths};
use account_normalizer::{Normalizer, Result, ToolError};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(&cli.log_level)?;
    match cli.command {
        Command::Normalize(args) => execute_normalize(args),
    }
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| ToolError::Logging(err.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn execute_normalize(args: NormalizeArgs) -> Result<()> {
    let input = match &args.input {
        Some(path) => path.clone(),
        None => prompt_for_input()?,
    };
    if !input.exists() {
        return Err(ToolError::MissingInput(input));
    }

    let outputs = args.resolve_outputs(&input);
    outputs.ensure_writable(args.force)?;

    let formatting = match &args.format_config {
        Some(path) => load_formatting(path)?,
        None => ColumnFormatting::default(),
    };
    let normalizer = Normalizer::new(formatting);

    let summary = pipeline::normalize_workbook(&input, &outputs, &normalizer)?;
    if let Some(path) = &args.summary {
        pipeline::write_summary(path, &summary)?;
    }

    println!(
        "Normalization done: {} accounts, {} managers, {} relations.",
        summary.accounts, summary.managers, summary.relations
    );
    for path in outputs.iter() {
        println!("  {}", path.display());
    }
    Ok(())
}

fn prompt_for_input() -> Result<PathBuf> {
    print!("Enter (xls|xlsx) file path: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}

fn load_formatting(path: &Path) -> Result<ColumnFormatting> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Split a wide account sheet into account, manager, and relation tables."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize an account workbook.
    Normalize(NormalizeArgs),
}

#[derive(clap::Args)]
struct NormalizeArgs {
    /// Input workbook. Prompted for on stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Account table output path.
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Manager table output path.
    #[arg(long)]
    managers: Option<PathBuf>,

    /// Account-manager relation table output path.
    #[arg(long)]
    relations: Option<PathBuf>,

    /// JSON document overriding the per-column formatting policies.
    #[arg(long)]
    format_config: Option<PathBuf>,

    /// Write a JSON summary of the run to this path.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Overwrite existing output files.
    #[arg(long)]
    force: bool,
}

impl NormalizeArgs {
    fn resolve_outputs(&self, input: &Path) -> OutputPaths {
        let derived = OutputPaths::derive(input);
        OutputPaths {
            accounts: self.accounts.clone().unwrap_or(derived.accounts),
            managers: self.managers.clone().unwrap_or(derived.managers),
            relations: self.relations.clone().unwrap_or(derived.relations),
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, instrument};

use crate::error::{Result, ToolError};
use crate::io::{Table, XlsxTable};
use crate::model::NormalizationSummary;
use crate::normalize::Normalizer;

/// Suffix of the account table file name.
pub const ACCOUNTS_SUFFIX: &str = "-accounts";
/// Suffix of the manager table file name.
pub const MANAGERS_SUFFIX: &str = "-managers";
/// Suffix of the relation table file name.
pub const RELATIONS_SUFFIX: &str = "-account-manager-relations";

const OUTPUT_EXTENSION: &str = "xlsx";

/// Destinations of the three normalized tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub accounts: PathBuf,
    pub managers: PathBuf,
    pub relations: PathBuf,
}

impl OutputPaths {
    /// Places the outputs next to `input`, inserting the table suffix before
    /// the extension: `book.xlsx` becomes `book-accounts.xlsx`.
    pub fn derive(input: &Path) -> Self {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let with_suffix = |suffix: &str| {
            input.with_file_name(format!("{stem}{suffix}.{OUTPUT_EXTENSION}"))
        };

        Self {
            accounts: with_suffix(ACCOUNTS_SUFFIX),
            managers: with_suffix(MANAGERS_SUFFIX),
            relations: with_suffix(RELATIONS_SUFFIX),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.accounts, &self.managers, &self.relations]
            .into_iter()
            .map(PathBuf::as_path)
    }

    /// Fails when an output already exists, unless `overwrite` is set.
    pub fn ensure_writable(&self, overwrite: bool) -> Result<()> {
        if overwrite {
            return Ok(());
        }
        match self.iter().find(|path| path.exists()) {
            Some(path) => Err(ToolError::OutputExists(path.to_path_buf())),
            None => Ok(()),
        }
    }
}

/// Normalizes the workbook at `input` (any format calamine reads) into the
/// three `.xlsx` output workbooks.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn normalize_workbook(
    input: &Path,
    outputs: &OutputPaths,
    normalizer: &Normalizer,
) -> Result<NormalizationSummary> {
    if !input.exists() {
        return Err(ToolError::MissingInput(input.to_path_buf()));
    }

    let started = Instant::now();
    let mut initial = XlsxTable::open(input)?;
    info!(elapsed_ms = elapsed_ms(started), "input loaded");

    let mut accounts = XlsxTable::create(&outputs.accounts)?;
    let mut managers = XlsxTable::create(&outputs.managers)?;
    let mut relations = XlsxTable::create(&outputs.relations)?;

    let started = Instant::now();
    let summary = normalizer.normalize(&mut initial, &mut accounts, &mut managers, &mut relations)?;
    info!(elapsed_ms = elapsed_ms(started), "tables built");

    let started = Instant::now();
    initial.save_and_close()?;
    accounts.save_and_close()?;
    managers.save_and_close()?;
    relations.save_and_close()?;
    info!(
        elapsed_ms = elapsed_ms(started),
        accounts = %outputs.accounts.display(),
        managers = %outputs.managers.display(),
        relations = %outputs.relations.display(),
        "tables saved"
    );

    Ok(summary)
}

/// Writes the run summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &NormalizationSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

//! Spreadsheet export
//!
//! Two modes reach the sink: the rows on the current page, or the whole
//! (possibly edited) collection. The sink writes `<dir>/<filename>.xlsx`
//! with a single `Dados` sheet: a header row of field names followed by one
//! row per record. An empty list yields an empty sheet.

use crate::model::{Record, COLUMNS};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fmt;
use std::path::PathBuf;

/// Name of the single worksheet
pub const SHEET_NAME: &str = "Dados";

/// Largest magnitude an f64 cell holds without rounding (2^53)
const MAX_EXACT_ID: u64 = 1 << 53;

/// What to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    CurrentPage,
    AllRecords,
}

impl ExportScope {
    /// File name without extension
    pub fn filename(&self) -> &'static str {
        match self {
            Self::CurrentPage => "pagina_atual",
            Self::AllRecords => "todos_os_itens",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CurrentPage => "Current page",
            Self::AllRecords => "All records",
        }
    }

    pub const ALL: [ExportScope; 2] = [ExportScope::CurrentPage, ExportScope::AllRecords];
}

/// Export failures
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Xlsx(XlsxError),
    /// More rows than a worksheet can hold
    TooManyRows(usize),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Xlsx(e) => write!(f, "Spreadsheet error: {}", e),
            Self::TooManyRows(n) => write!(f, "Too many rows for one sheet: {}", n),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Xlsx(e) => Some(e),
            Self::TooManyRows(_) => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<XlsxError> for ExportError {
    fn from(e: XlsxError) -> Self {
        Self::Xlsx(e)
    }
}

/// Receives records and a file name, produces a file
pub trait ExportSink {
    /// Write `records` under `filename` and return where they went
    fn export(&self, records: &[&Record], filename: &str) -> Result<PathBuf, ExportError>;
}

/// Writes `.xlsx` workbooks into a directory
pub struct XlsxExporter {
    dir: PathBuf,
}

impl XlsxExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for XlsxExporter {
    fn export(&self, records: &[&Record], filename: &str) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.xlsx", filename));

        let mut workbook = build_workbook(records)?;
        workbook.save(&path)?;

        tracing::info!("Exported {} records to {}", records.len(), path.display());
        Ok(path)
    }
}

fn build_workbook(records: &[&Record]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    if records.is_empty() {
        return Ok(workbook);
    }
    // Header row + one row per record must fit in u32 row numbers
    let last_row =
        u32::try_from(records.len()).map_err(|_| ExportError::TooManyRows(records.len()))?;

    let header = Format::new().set_bold();
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (row, record) in (1..=last_row).zip(records) {
        // Ids past the f64 mantissa are written as text so they stay exact
        if record.id.unsigned_abs() <= MAX_EXACT_ID {
            sheet.write_number(row, 0, record.id as f64)?;
        } else {
            sheet.write_string(row, 0, record.id.to_string())?;
        }
        sheet.write_string(row, 1, record.title.as_str())?;
        sheet.write_string(row, 2, record.body.as_str())?;
    }

    Ok(workbook)
}

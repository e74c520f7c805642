//! CSV and XLSX export of a scrape result
//!
//! Both formats write a header row (`platform`, `type`, then the declared
//! fields) followed by a single data row.

use crate::models::ScrapeResult;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Xlsx];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Xlsx => write!(f, "Excel (xlsx)"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet encoding failed: {0}")]
    Xlsx(#[from] XlsxError),
}

/// File name for an export, e.g. `youtube_data.csv`
pub fn default_file_name(result: &ScrapeResult, format: ExportFormat) -> String {
    format!("{}_data.{}", result.platform().slug(), format.extension())
}

pub fn to_csv(result: &ScrapeResult) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(result.headers())?;
    writer.write_record(result.row())?;
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

pub fn to_xlsx(result: &ScrapeResult) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(result)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(result: &ScrapeResult) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(result.platform().name())?;

    for (col, header) in result.headers().into_iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, header, &header_format)?;
    }
    for (col, value) in result.row().into_iter().enumerate() {
        sheet.write_string(1, col as u16, value)?;
    }
    sheet.autofit();

    Ok(workbook)
}

pub fn encode(result: &ScrapeResult, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => to_csv(result),
        ExportFormat::Xlsx => to_xlsx(result),
    }
}

/// Write the result into `dir` under its default file name
pub fn write_to_dir(
    result: &ScrapeResult,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(default_file_name(result, format));

    let bytes = encode(result, format)?;
    std::fs::write(&path, bytes)?;

    log::info!("Exported {} to {}", format, path.display());
    Ok(path)
}

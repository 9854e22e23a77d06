use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::SourceError;
use super::model::{AnodeDataset, DatasetSource, Record};
use super::table::format_number;

pub const TITLE_COLUMN: &str = "Title";
pub const CAPACITY_COLUMN: &str = "Specific Capacity";
pub const CYCLE_LIFE_COLUMN: &str = "Cycle Life";
pub const DOI_COLUMN: &str = "DOI";

/// Label value used in the sheets for rows nobody has identified yet.
const PLACEHOLDER_LABEL: &str = "Unknown";

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

// ---------------------------------------------------------------------------
// Raw table: the common shape every format is read into
// ---------------------------------------------------------------------------

/// Header names plus rows of optional cell text, before any cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Whether `path` is a workbook that has named sheets.
pub fn is_spreadsheet(path: &Path) -> bool {
    SPREADSHEET_EXTENSIONS.contains(&extension(path).as_str())
}

/// Sheet names of a workbook; empty for single-table formats.
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    if !is_spreadsheet(path) {
        return Ok(Vec::new());
    }
    let workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    Ok(workbook.sheet_names())
}

/// Load and enrich a literature dataset.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – the named `sheet`, first row is the header
/// * `.csv`     – header row + records
/// * `.json`    – `[{ "Title": ..., "Specific Capacity": ..., ... }, ...]`
/// * `.parquet` – one column per field, any scalar type
pub fn load_file(path: &Path, sheet: &str) -> Result<AnodeDataset> {
    let ext = extension(path);

    let (table, sheet) = match ext.as_str() {
        e if SPREADSHEET_EXTENSIONS.contains(&e) => {
            (read_spreadsheet(path, sheet)?, Some(sheet.to_string()))
        }
        "csv" => (read_csv(path)?, None),
        "json" => (read_json(path)?, None),
        "parquet" | "pq" => (read_parquet(path)?, None),
        other => return Err(SourceError::UnsupportedExtension(other.to_string()).into()),
    };

    let records = records_from_table(&table)
        .with_context(|| format!("reading records from {}", path.display()))?;

    let dataset = AnodeDataset::from_records(
        records,
        DatasetSource {
            path: path.to_path_buf(),
            sheet,
        },
    );
    log::info!(
        "Loaded {} records ({} materials) from {}",
        dataset.len(),
        dataset.labels.len(),
        path.display()
    );
    Ok(dataset)
}

/// Turn a raw table into records: trim headers, locate columns, drop
/// rows without a usable label.
pub fn records_from_table(table: &RawTable) -> Result<Vec<Record>> {
    let headers: Vec<&str> = table.headers.iter().map(|h| h.trim()).collect();
    if headers.is_empty() {
        return Err(SourceError::NoHeader.into());
    }

    let title_idx = headers
        .iter()
        .position(|h| *h == TITLE_COLUMN)
        .ok_or(SourceError::MissingColumn(TITLE_COLUMN))?;

    let optional_column = |name: &str| {
        let idx = headers.iter().position(|h| *h == name);
        if idx.is_none() {
            log::warn!("column '{name}' not found; treating every value as missing");
        }
        idx
    };
    let capacity_idx = optional_column(CAPACITY_COLUMN);
    let cycle_idx = optional_column(CYCLE_LIFE_COLUMN);
    let doi_idx = optional_column(DOI_COLUMN);

    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;

    for (row_no, row) in table.rows.iter().enumerate() {
        let label = cell_at(row, Some(title_idx)).unwrap_or_default();
        let label = label.trim();
        if label.is_empty() || label == PLACEHOLDER_LABEL {
            log::debug!("row {row_no}: no usable title, skipped");
            skipped += 1;
            continue;
        }

        records.push(Record {
            label: label.to_string(),
            specific_capacity: cell_at(row, capacity_idx),
            cycle_life: cell_at(row, cycle_idx),
            doi: cell_at(row, doi_idx),
        });
    }

    if skipped > 0 {
        log::info!("Skipped {skipped} rows with a blank or placeholder title");
    }
    Ok(records)
}

fn cell_at(row: &[Option<String>], idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i).cloned().flatten())
}

// ---------------------------------------------------------------------------
// Spreadsheet reader
// ---------------------------------------------------------------------------

fn read_spreadsheet(path: &Path, sheet: &str) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;

    let available = workbook.sheet_names();
    if !available.iter().any(|s| s == sheet) {
        return Err(SourceError::UnknownSheet {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            available,
        }
        .into());
    }

    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("reading sheet '{sheet}'"))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(SourceError::NoHeader)?
        .iter()
        .map(|c| cell_text(c).unwrap_or_default())
        .collect();

    let rows = rows
        .map(|r| r.iter().map(cell_text).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(
            record
                .iter()
                .map(|v| (!v.is_empty()).then(|| v.to_string()))
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn read_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).and_then(json_text))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => n.as_f64().map(format_number),
        },
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Every column is rendered to text through Arrow's display formatting;
/// nulls stay missing.
fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        None
                    } else {
                        array_value_to_string(col, row).ok()
                    }
                })
                .collect();
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}

use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    Record, SurveyTable, GROUP_COLUMN, REQUIRED_COLUMNS, SUBGROUP_COLUMN, TIME_PERIOD_COLUMN,
    VALUE_COLUMN,
};
use crate::error::LoadError;

/// Cell contents treated as missing in delimited text (after trimming).
const MISSING_MARKERS: [&str; 5] = ["", "NA", "N/A", "NaN", "null"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row naming at least the four survey columns
/// * `.json`         – `[{ "Group": ..., "Subgroup": ..., ... }, ...]`
/// * `.parquet`      – string columns plus a numeric `Value` column
pub fn load_file(path: &Path) -> Result<SurveyTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    log::debug!("Loading {} as .{ext}", path.display());

    match ext.as_str() {
        "csv" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Columns are located by exact header name; any other columns are ignored.
fn load_delimited(path: &Path, delimiter: u8) -> Result<SurveyTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(open(path)?);
    let headers = reader.headers()?.clone();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let group_idx = position(GROUP_COLUMN)?;
    let subgroup_idx = position(SUBGROUP_COLUMN)?;
    let time_idx = position(TIME_PERIOD_COLUMN)?;
    let value_idx = position(VALUE_COLUMN)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        records.push(Record {
            group: text_cell(row.get(group_idx)),
            subgroup: text_cell(row.get(subgroup_idx)),
            time_period: text_cell(row.get(time_idx)),
            value: numeric_cell(row.get(value_idx), i + 1)?,
        });
    }

    Ok(SurveyTable::from_records(records))
}

fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

fn text_cell(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !is_missing(s)).map(str::to_string)
}

fn numeric_cell(raw: Option<&str>, row: usize) -> Result<Option<f64>, LoadError> {
    let Some(raw) = raw.filter(|s| !is_missing(s)) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f64>()
        .map(|v| Some(v).filter(|v| !v.is_nan()))
        .map_err(|_| LoadError::InvalidValue {
            row,
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Group": "By State", "Subgroup": "Texas", "Time Period Label": "Phase 1", "Value": 15.0 },
///   ...
/// ]
/// ```
///
/// `null` marks a missing cell. The first object must carry every required
/// key, so `[]` is rejected; later objects missing a key read it as `null`.
fn load_json(path: &Path) -> Result<SurveyTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<Map<String, JsonValue>> = serde_json::from_str(&text)?;

    // An empty array carries no columns at all.
    let first = rows.first();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|c| !first.is_some_and(|obj| obj.contains_key(**c)))
    {
        return Err(LoadError::MissingColumn(missing.to_string()));
    }

    let records = rows
        .into_iter()
        .map(|obj| serde_json::from_value::<Record>(JsonValue::Object(obj)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SurveyTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Expected schema:
/// - `Group`, `Subgroup`, `Time Period Label`: Utf8 or LargeUtf8
/// - `Value`: Float64, Float32, Int64 or Int32
///
/// Nulls (and NaN values) are missing cells.
fn load_parquet(path: &Path) -> Result<SurveyTable, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    check_schema(builder.schema())?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let groups = string_column(&batch, GROUP_COLUMN)?;
        let subgroups = string_column(&batch, SUBGROUP_COLUMN)?;
        let periods = string_column(&batch, TIME_PERIOD_COLUMN)?;
        let values = value_column(&batch)?;

        records.extend(
            groups
                .into_iter()
                .zip(subgroups)
                .zip(periods)
                .zip(values)
                .map(|(((group, subgroup), time_period), value)| Record {
                    group,
                    subgroup,
                    time_period,
                    value,
                }),
        );
    }

    Ok(SurveyTable::from_records(records))
}

fn check_schema(schema: &Schema) -> Result<(), LoadError> {
    for name in REQUIRED_COLUMNS {
        schema
            .index_of(name)
            .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
    }
    Ok(())
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

fn string_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<String>>, LoadError> {
    let col = column(batch, name)?;
    let values: Vec<Option<String>> = match col.data_type() {
        DataType::Utf8 => col
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::LargeUtf8 => col
            .as_string::<i64>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        // A column with no values at all is written as Null by pyarrow.
        DataType::Null => vec![None; col.len()],
        other => {
            return Err(LoadError::ColumnType {
                column: name.to_string(),
                found: format!("{other:?}"),
            })
        }
    };
    Ok(values)
}

fn value_column(batch: &RecordBatch) -> Result<Vec<Option<f64>>, LoadError> {
    let col = column(batch, VALUE_COLUMN)?;
    let values: Vec<Option<f64>> = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().iter().collect(),
        DataType::Float32 => col
            .as_primitive::<Float32Type>()
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        DataType::Int64 => col
            .as_primitive::<Int64Type>()
            .iter()
            .map(|v| v.map(|i| i as f64))
            .collect(),
        DataType::Int32 => col
            .as_primitive::<Int32Type>()
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        DataType::Null => vec![None; col.len()],
        other => {
            return Err(LoadError::ColumnType {
                column: VALUE_COLUMN.to_string(),
                found: format!("{other:?}"),
            })
        }
    };
    Ok(values
        .into_iter()
        .map(|v| v.filter(|f| !f.is_nan()))
        .collect())
}

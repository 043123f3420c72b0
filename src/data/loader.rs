use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, Record, Smoker};

/// Columns a file must provide. `sex` may be present but is optional.
pub const REQUIRED_COLUMNS: [&str; 6] = ["age", "bmi", "children", "smoker", "region", "charges"];

/// Schema-level failures, distinct from I/O and container-format errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: invalid smoker value '{value}' (expected yes/no)")]
    InvalidSmoker { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an insurance dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the record columns (primary format)
/// * `.json`    – `[{ "age": 19, "bmi": 27.9, ...}, ...]`
/// * `.parquet` – flat scalar columns with the same names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

/// Best-effort numeric parse: unparseable or empty becomes missing.
/// Idempotent over its own output rendered back to text.
pub fn coerce_f64(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok()
}

/// Best-effort integer parse for the children column.
pub fn coerce_i64(s: &str) -> Option<i64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<i64>().ok()
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV from any reader.  Header row required; a missing required
/// column is a fatal schema error.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut idx: BTreeMap<&'static str, usize> = BTreeMap::new();
    for col in REQUIRED_COLUMNS {
        let pos = headers
            .iter()
            .position(|h| h == col)
            .ok_or(SchemaError::MissingColumn(col))?;
        idx.insert(col, pos);
    }
    let sex_idx = headers.iter().position(|h| h == "sex");

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |col: &str| row.get(idx[col]).unwrap_or("");

        let smoker_raw = cell("smoker");
        let smoker = Smoker::parse(smoker_raw).ok_or_else(|| SchemaError::InvalidSmoker {
            row: row_no,
            value: smoker_raw.to_string(),
        })?;

        records.push(Record {
            age: coerce_f64(cell("age")),
            sex: sex_idx.and_then(|i| row.get(i)).and_then(non_empty),
            bmi: coerce_f64(cell("bmi")),
            children: coerce_i64(cell("children")),
            smoker,
            region: cell("region").trim().to_string(),
            charges: coerce_f64(cell("charges")),
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "age": 19, "sex": "female", "bmi": 27.9, "children": 0,
///     "smoker": "yes", "region": "southwest", "charges": 16884.92 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_records(&text)
}

pub fn parse_json_records(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let smoker_raw = obj
            .get("smoker")
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing 'smoker'"))?;
        let smoker = Smoker::parse(smoker_raw).ok_or_else(|| SchemaError::InvalidSmoker {
            row: i,
            value: smoker_raw.to_string(),
        })?;

        let region = obj
            .get("region")
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing 'region'"))?
            .trim()
            .to_string();

        records.push(Record {
            age: json_f64(obj.get("age")),
            sex: obj
                .get("sex")
                .and_then(|v| v.as_str())
                .and_then(non_empty),
            bmi: json_f64(obj.get("bmi")),
            children: obj.get("children").and_then(|v| v.as_i64()),
            smoker,
            region,
            charges: json_f64(obj.get("charges")),
        });
    }

    Ok(Dataset::from_records(records))
}

/// Numbers, and strings that parse as numbers, both coerce; everything else
/// is missing.
fn json_f64(val: Option<&JsonValue>) -> Option<f64> {
    match val? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => coerce_f64(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns.
///
/// Numeric columns may arrive as Int32/Int64/Float32/Float64 or as strings
/// that parse as numbers.  Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_no = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut idx: BTreeMap<&'static str, usize> = BTreeMap::new();
        for col in REQUIRED_COLUMNS {
            let pos = schema
                .index_of(col)
                .map_err(|_| SchemaError::MissingColumn(col))?;
            idx.insert(col, pos);
        }
        let sex_idx = schema.index_of("sex").ok();

        for row in 0..batch.num_rows() {
            let col = |name: &str| batch.column(idx[name]);

            let smoker_raw = scalar_string(col("smoker"), row).unwrap_or_default();
            let smoker =
                Smoker::parse(&smoker_raw).ok_or_else(|| SchemaError::InvalidSmoker {
                    row: row_no,
                    value: smoker_raw.clone(),
                })?;

            records.push(Record {
                age: scalar_f64(col("age"), row),
                sex: sex_idx
                    .and_then(|i| scalar_string(batch.column(i), row))
                    .and_then(|s| non_empty(&s)),
                bmi: scalar_f64(col("bmi"), row),
                children: scalar_i64(col("children"), row),
                smoker,
                region: scalar_string(col("region"), row).unwrap_or_default(),
                charges: scalar_f64(col("charges"), row),
            });
            row_no += 1;
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Arrow helpers --

/// Read one cell as `f64`, coercing across the numeric Arrow types.
fn scalar_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .and_then(|a| coerce_f64(a.value(row))),
        _ => None,
    }
}

fn scalar_i64(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row)),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as i64),
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .and_then(|a| coerce_i64(a.value(row))),
        _ => None,
    }
}

fn scalar_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|a| if a.value(row) { "yes" } else { "no" }.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
age,sex,bmi,children,smoker,region,charges
19,female,27.9,0,yes,southwest,16884.924
18,male,33.77,1,no,southeast,1725.5523
28,male,33.0,3,no,southeast,4449.462
";

    #[test]
    fn csv_loads_all_rows() {
        let ds = read_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].age, Some(19.0));
        assert_eq!(ds.records[0].smoker, Smoker::Yes);
        assert_eq!(ds.records[2].children, Some(3));
        assert_eq!(ds.regions, vec!["southwest", "southeast"]);
    }

    #[test]
    fn non_numeric_cells_become_missing() {
        let csv = "\
age,bmi,children,smoker,region,charges
abc,27.9,,no,southwest,n/a
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        let rec = &ds.records[0];
        assert_eq!(rec.age, None);
        assert_eq!(rec.bmi, Some(27.9));
        assert_eq!(rec.children, None);
        assert_eq!(rec.charges, None);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "age,bmi,children,smoker,region\n19,27.9,0,yes,southwest\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("charges"), "{err}");
    }

    #[test]
    fn invalid_smoker_is_fatal() {
        let csv = "\
age,bmi,children,smoker,region,charges
19,27.9,0,sometimes,southwest,100.0
";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("sometimes"), "{err}");
    }

    #[test]
    fn coercion_is_idempotent() {
        // Re-coercing an already-numeric value is a no-op.
        let once = coerce_f64("27.9").unwrap();
        let twice = coerce_f64(&once.to_string()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(coerce_f64("not a number"), None);
    }

    #[test]
    fn json_records_load() {
        let text = r#"[
            {"age": 19, "sex": "female", "bmi": 27.9, "children": 0,
             "smoker": "yes", "region": "southwest", "charges": 16884.92},
            {"age": "bad", "bmi": null, "children": 1,
             "smoker": "no", "region": "southeast", "charges": "1725.55"}
        ]"#;
        let ds = parse_json_records(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].charges, Some(16884.92));
        assert_eq!(ds.records[1].age, None);
        assert_eq!(ds.records[1].bmi, None);
        assert_eq!(ds.records[1].charges, Some(1725.55));
    }
}

use contracts::dashboards::d402_hourly_sales::{Dataset, DatasetSource, SalesRow};
use once_cell::sync::Lazy;

use super::error::{DashboardError, DashboardResult};
use super::session::DashboardSession;

pub const COL_TIME: &str = "time";
pub const COL_SALES_A: &str = "sales_A";
pub const COL_SALES_B: &str = "sales_B";
pub const COL_CUSTOMERS: &str = "customers";
pub const COL_TARGET_SALES: &str = "target_sales";

const REQUIRED_COLUMNS: [&str; 5] = [
    COL_TIME,
    COL_SALES_A,
    COL_SALES_B,
    COL_CUSTOMERS,
    COL_TARGET_SALES,
];

/// Seed table offered for manual editing: 10時..19時 with sample values.
static TEMPLATE: Lazy<Vec<SalesRow>> = Lazy::new(|| {
    let hours = 10..=19;
    let sales_a = [
        800.0, 950.0, 1600.0, 1800.0, 1500.0, 1400.0, 1300.0, 1700.0, 2000.0, 1900.0,
    ];
    let sales_b = [
        400.0, 600.0, 900.0, 1100.0, 800.0, 700.0, 600.0, 800.0, 1000.0, 950.0,
    ];
    let customers = [15, 18, 25, 30, 28, 26, 24, 29, 32, 31];

    hours
        .zip(sales_a)
        .zip(sales_b)
        .zip(customers)
        .map(|(((hour, a), b), c)| SalesRow::new(format!("{hour}時"), a, b, c, 1500.0))
        .collect()
});

/// Fresh copy of the seed template.
pub fn template() -> Vec<SalesRow> {
    TEMPLATE.clone()
}

/// Parse comma-separated text with a header row into sales rows.
///
/// Columns are looked up by name (ASCII case-insensitive), extra columns are
/// ignored. Every numeric cell must parse; nothing is coerced silently.
pub fn parse_csv(bytes: &[u8]) -> DashboardResult<Vec<SalesRow>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DashboardError::parse(format!("file is not valid UTF-8: {e}")))?;
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DashboardError::parse("header row is missing"));
    }

    let mut positions = [0usize; 5];
    for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                DashboardError::parse(format!("missing required column '{name}'"))
            })?;
    }
    let [time_idx, sales_a_idx, sales_b_idx, customers_idx, target_idx] = positions;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        rows.push(SalesRow {
            time: field(time_idx).to_string(),
            sales_a: parse_number(field(sales_a_idx), COL_SALES_A, line)?,
            sales_b: parse_number(field(sales_b_idx), COL_SALES_B, line)?,
            customers: parse_count(field(customers_idx), COL_CUSTOMERS, line)?,
            target_sales: parse_number(field(target_idx), COL_TARGET_SALES, line)?,
        });
    }

    Ok(rows)
}

fn parse_number(raw: &str, column: &str, line: u64) -> DashboardResult<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DashboardError::parse(format!(
            "line {line}: column '{column}' is not a number: '{raw}'"
        ))),
    }
}

/// Integers written as "15" or "15.0" are accepted, fractional counts are not.
fn parse_count(raw: &str, column: &str, line: u64) -> DashboardResult<i64> {
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(DashboardError::parse(format!(
            "line {line}: column '{column}' is not an integer: '{raw}'"
        ))),
    }
}

/// Replace the session dataset with an uploaded CSV file.
/// On any parse failure the session is left untouched.
pub fn set_from_upload(
    session: &DashboardSession,
    file_name: Option<String>,
    bytes: &[u8],
) -> DashboardResult<Dataset> {
    let rows = parse_csv(bytes).map_err(|e| {
        tracing::warn!(
            "D402 Source: rejected upload {:?} ({} bytes): {}",
            file_name,
            bytes.len(),
            e
        );
        e
    })?;

    let dataset = Dataset::new(DatasetSource::Upload { file_name }, rows);
    tracing::info!(
        "D402 Source: parsed upload into {} rows",
        dataset.row_count()
    );
    session.replace(dataset.clone())?;
    Ok(dataset)
}

/// Replace the session dataset with the user-edited template rows.
pub fn set_from_template(
    session: &DashboardSession,
    rows: Vec<SalesRow>,
) -> DashboardResult<Dataset> {
    let dataset = Dataset::new(DatasetSource::Template, rows);
    session.replace(dataset.clone())?;
    Ok(dataset)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::indicators::IndicatorValue;

// ---------------------------------------------------------------------------
// Input data
// ---------------------------------------------------------------------------

/// One time slot of the hourly sales table.
///
/// Field names on the wire match the CSV header: `time`, `sales_A`,
/// `sales_B`, `customers`, `target_sales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRow {
    /// Slot label, e.g. "12時"
    pub time: String,
    #[serde(rename = "sales_A")]
    pub sales_a: f64,
    #[serde(rename = "sales_B")]
    pub sales_b: f64,
    pub customers: i64,
    pub target_sales: f64,
}

impl SalesRow {
    pub fn new(
        time: impl Into<String>,
        sales_a: f64,
        sales_b: f64,
        customers: i64,
        target_sales: f64,
    ) -> Self {
        Self {
            time: time.into(),
            sales_a,
            sales_b,
            customers,
            target_sales,
        }
    }
}

/// Where the current dataset came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSource {
    Upload { file_name: Option<String> },
    Template,
}

/// Full dataset held by the dashboard session. Always replaced as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: Uuid,
    pub source: DatasetSource,
    pub rows: Vec<SalesRow>,
}

impl Dataset {
    pub fn new(source: DatasetSource, rows: Vec<SalesRow>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Body of POST /api/d402/template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRequest {
    pub rows: Vec<SalesRow>,
}

/// Snapshot of the session gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadState {
    pub dataset_id: Option<Uuid>,
    pub source: Option<DatasetSource>,
    pub row_count: usize,
    /// True only after explicit confirmation of the current dataset
    pub loaded: bool,
    pub updated_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl LoadState {
    pub fn empty() -> Self {
        Self {
            dataset_id: None,
            source: None,
            row_count: 0,
            loaded: false,
            updated_at: None,
            confirmed_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived data
// ---------------------------------------------------------------------------

/// Input row plus derived per-slot fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    #[serde(flatten)]
    pub row: SalesRow,
    /// sales_A + sales_B
    pub total_sales: f64,
    /// total_sales / target_sales * 100, zero when the target is zero
    pub achievement_rate: f64,
}

/// Aggregates over the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub grand_total_sales: f64,
    pub grand_total_customers: i64,
    pub average_unit_price: f64,
    pub grand_total_target: f64,
    /// Ratio (1.0 == 100%), zero when the target sum is zero
    pub overall_achievement: f64,
}

/// Peak/worst slot callouts with one canned recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    pub peak_time: String,
    pub worst_time: String,
    /// Name of the rule that matched `peak_time`
    pub bucket: String,
    pub peak_sentence: String,
    pub worst_sentence: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    StackedBar,
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
    /// Per-point text labels, same length as `values`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// Chart dataset; `categories` is the shared x axis (time labels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Response of GET /api/d402/analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub dataset_id: Uuid,
    pub summary: SalesSummary,
    pub indicators: Vec<IndicatorValue>,
    pub rows: Vec<EnrichedRow>,
    pub charts: Vec<ChartData>,
    /// None for an empty dataset
    pub commentary: Option<Commentary>,
}

// ---------------------------------------------------------------------------
// Staffing projection
// ---------------------------------------------------------------------------

/// Body of POST /api/d402/staffing. Missing fields fall back to defaults
/// (wall clock now, configured closing time and staff count).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffingRequest {
    /// "HH:MM" or "HH:MM:SS"
    #[serde(default)]
    pub current_time: Option<String>,
    #[serde(default)]
    pub closing_time: Option<String>,
    #[serde(default)]
    pub staff_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingProjection {
    pub current_time: String,
    pub closing_time: String,
    pub staff_count: u32,
    pub remaining_minutes: f64,
    pub remaining_hours: f64,
    pub remaining_target: f64,
    pub required_per_hour: f64,
    pub required_per_staff: f64,
    pub required_per_hour_display: String,
    pub required_per_staff_display: String,
}

/// Error body returned by every d402 endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// "parse_error", "not_loaded", "configuration_error", "internal"
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_row_uses_csv_column_names() {
        let row = SalesRow::new("12時", 1600.0, 900.0, 25, 1500.0);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["sales_A"], 1600.0);
        assert_eq!(json["sales_B"], 900.0);
        assert!(json.get("sales_a").is_none());
    }

    #[test]
    fn test_enriched_row_is_flat() {
        let enriched = EnrichedRow {
            row: SalesRow::new("10時", 800.0, 400.0, 15, 1500.0),
            total_sales: 1200.0,
            achievement_rate: 80.0,
        };
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["time"], "10時");
        assert_eq!(json["total_sales"], 1200.0);
        assert!(json.get("row").is_none());
    }

    #[test]
    fn test_dataset_source_tagging() {
        let json = serde_json::to_string(&DatasetSource::Template).unwrap();
        assert_eq!(json, r#"{"kind":"template"}"#);

        let parsed: DatasetSource =
            serde_json::from_str(r#"{"kind":"upload","file_name":"sales.csv"}"#).unwrap();
        assert_eq!(
            parsed,
            DatasetSource::Upload {
                file_name: Some("sales.csv".into())
            }
        );
    }

    #[test]
    fn test_staffing_request_fields_are_optional() {
        let req: StaffingRequest = serde_json::from_str("{}").unwrap();
        assert!(req.current_time.is_none());
        assert!(req.closing_time.is_none());
        assert!(req.staff_count.is_none());
    }
}

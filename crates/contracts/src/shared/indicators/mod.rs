use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Indicator identity & display metadata
// ---------------------------------------------------------------------------

/// Unique indicator identifier, used as key in registry and API responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub String);

impl IndicatorId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How to format the numeric value for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    /// Value is a ratio (1.0 == 100%)
    Percent { decimals: u8 },
    Integer { unit: Option<String> },
}

/// Static metadata describing one indicator (label, format, icon, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorMeta {
    pub id: IndicatorId,
    pub label: String,
    pub short_label: Option<String>,
    pub icon: String,
    pub format: ValueFormat,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Indicator sets
// ---------------------------------------------------------------------------

/// Unique set identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorSetId(pub String);

impl IndicatorSetId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Metadata for a group of indicators rendered together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSetMeta {
    pub id: IndicatorSetId,
    pub label: String,
    pub indicators: Vec<IndicatorId>,
    /// Number of columns in the card grid (2, 3, 4).
    pub columns: u8,
}

// ---------------------------------------------------------------------------
// Computed values
// ---------------------------------------------------------------------------

/// A single computed indicator result returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub id: IndicatorId,
    pub label: String,
    /// Primary numeric value (`None` when it could not be computed).
    pub value: Option<f64>,
    /// `value` rendered according to the indicator's `ValueFormat`.
    pub display: String,
    /// Optional secondary text displayed below the value.
    pub subtitle: Option<String>,
}

/// Full catalogue returned by the metadata endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorCatalogResponse {
    pub indicators: Vec<IndicatorMeta>,
    pub sets: Vec<IndicatorSetMeta>,
}

pub mod compute;
pub mod metadata;
pub mod registry;

use contracts::shared::indicators::ValueFormat;

use crate::shared::format;

/// Render a computed value according to its display format.
pub fn format_value(value_format: &ValueFormat, value: f64) -> String {
    match value_format {
        ValueFormat::Money { currency } => format::format_money(value, currency),
        ValueFormat::Percent { decimals } => format::format_percent(value, *decimals as usize),
        ValueFormat::Integer { unit } => {
            format::format_count(value.round() as i64, unit.as_deref().unwrap_or(""))
        }
    }
}

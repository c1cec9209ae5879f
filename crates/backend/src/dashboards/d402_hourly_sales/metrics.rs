use contracts::dashboards::d402_hourly_sales::{EnrichedRow, SalesRow, SalesSummary};

use super::error::{DashboardError, DashboardResult};

/// Enriched rows and the aggregate summary of one dataset snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub rows: Vec<EnrichedRow>,
    pub summary: SalesSummary,
}

/// `numerator / denominator`, or 0 when the denominator is zero.
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn enrich_row(row: &SalesRow) -> EnrichedRow {
    let total_sales = row.sales_a + row.sales_b;
    EnrichedRow {
        row: row.clone(),
        total_sales,
        achievement_rate: ratio_or_zero(total_sales * 100.0, row.target_sales),
    }
}

/// Fails only when the customer total does not fit in an `i64`.
pub fn summarize(rows: &[EnrichedRow]) -> DashboardResult<SalesSummary> {
    let grand_total_sales: f64 = rows.iter().map(|r| r.total_sales).sum();
    let grand_total_customers = rows
        .iter()
        .try_fold(0i64, |acc, r| acc.checked_add(r.row.customers))
        .ok_or_else(|| DashboardError::parse("customer total is out of range"))?;
    let grand_total_target: f64 = rows.iter().map(|r| r.row.target_sales).sum();

    Ok(SalesSummary {
        grand_total_sales,
        grand_total_customers,
        average_unit_price: ratio_or_zero(grand_total_sales, grand_total_customers as f64),
        grand_total_target,
        overall_achievement: ratio_or_zero(grand_total_sales, grand_total_target),
    })
}

/// Pure derivation over the dataset rows; row order is kept as given.
pub fn derive(rows: &[SalesRow]) -> DashboardResult<DerivedMetrics> {
    let rows: Vec<EnrichedRow> = rows.iter().map(enrich_row).collect();
    let summary = summarize(&rows)?;
    Ok(DerivedMetrics { rows, summary })
}

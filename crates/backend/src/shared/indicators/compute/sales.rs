use contracts::dashboards::d402_hourly_sales::SalesSummary;

// ---------------------------------------------------------------------------
// Public compute functions
// ---------------------------------------------------------------------------

pub fn compute_total_sales(summary: &SalesSummary) -> f64 {
    summary.grand_total_sales
}

pub fn compute_total_customers(summary: &SalesSummary) -> f64 {
    summary.grand_total_customers as f64
}

pub fn compute_avg_unit_price(summary: &SalesSummary) -> f64 {
    summary.average_unit_price
}

/// Ratio of sales to target, 1.0 == 100%
pub fn compute_target_achievement(summary: &SalesSummary) -> f64 {
    summary.overall_achievement
}

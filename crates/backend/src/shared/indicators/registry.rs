use contracts::dashboards::d402_hourly_sales::SalesSummary;
use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::sales;
use super::format_value;
use super::metadata::{self, ids};

type ComputeFn = fn(&SalesSummary) -> f64;

/// Central registry: maps `IndicatorId` to its compute function and metadata.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
    catalog: IndicatorCatalogResponse,
}

impl IndicatorRegistry {
    pub fn new(currency: &str) -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::total_sales().0, sales::compute_total_sales);
        fns.insert(ids::total_customers().0, sales::compute_total_customers);
        fns.insert(ids::avg_unit_price().0, sales::compute_avg_unit_price);
        fns.insert(
            ids::target_achievement().0,
            sales::compute_target_achievement,
        );

        Self {
            fns,
            catalog: metadata::build_catalog(currency),
        }
    }

    pub fn catalog(&self) -> &IndicatorCatalogResponse {
        &self.catalog
    }

    /// Compute a batch of indicators over one summary, in the requested order.
    pub fn compute(&self, ids: &[IndicatorId], summary: &SalesSummary) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            let Some(compute_fn) = self.fns.get(&id.0) else {
                tracing::warn!("indicator {} not found in registry", id.0);
                continue;
            };
            let Some(meta) = self.catalog.indicators.iter().find(|m| &m.id == id) else {
                tracing::warn!("indicator {} has no metadata", id.0);
                continue;
            };

            let value = compute_fn(summary);
            if value.is_finite() {
                results.push(IndicatorValue {
                    id: id.clone(),
                    label: meta.label.clone(),
                    value: Some(value),
                    display: format_value(&meta.format, value),
                    subtitle: None,
                });
            } else {
                tracing::warn!("indicator {} produced a non-finite value", id.0);
                results.push(IndicatorValue {
                    id: id.clone(),
                    label: meta.label.clone(),
                    value: None,
                    display: "-".to_string(),
                    subtitle: Some("value unavailable".to_string()),
                });
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> SalesSummary {
        SalesSummary {
            grand_total_sales: 22800.0,
            grand_total_customers: 258,
            average_unit_price: 22800.0 / 258.0,
            grand_total_target: 15000.0,
            overall_achievement: 1.52,
        }
    }

    #[test]
    fn test_compute_summary_set() {
        let registry = IndicatorRegistry::new("¥");
        let values = registry.compute(&metadata::summary_set(), &summary());

        let displays: Vec<&str> = values.iter().map(|v| v.display.as_str()).collect();
        assert_eq!(displays, vec!["¥22,800", "258人", "¥88", "152.0%"]);
        assert_eq!(values[0].label, "本日の売上");
    }

    #[test]
    fn test_unknown_indicator_is_skipped() {
        let registry = IndicatorRegistry::new("¥");
        let values = registry.compute(
            &[IndicatorId::new("nope"), ids::total_sales()],
            &summary(),
        );
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].id, ids::total_sales());
    }

    #[test]
    fn test_non_finite_value_is_reported_as_unavailable() {
        let registry = IndicatorRegistry::new("¥");
        let mut broken = summary();
        broken.average_unit_price = f64::NAN;
        let values = registry.compute(&[ids::avg_unit_price()], &broken);
        assert_eq!(values[0].value, None);
        assert_eq!(values[0].display, "-");
    }
}

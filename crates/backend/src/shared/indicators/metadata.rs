use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn total_sales() -> IndicatorId {
        IndicatorId::new("total_sales")
    }
    pub fn total_customers() -> IndicatorId {
        IndicatorId::new("total_customers")
    }
    pub fn avg_unit_price() -> IndicatorId {
        IndicatorId::new("avg_unit_price")
    }
    pub fn target_achievement() -> IndicatorId {
        IndicatorId::new("target_achievement")
    }
}

/// Indicators of the summary row, in display order.
pub fn summary_set() -> Vec<IndicatorId> {
    vec![
        ids::total_sales(),
        ids::total_customers(),
        ids::avg_unit_price(),
        ids::target_achievement(),
    ]
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog(currency: &str) -> IndicatorCatalogResponse {
    let indicators = vec![
        IndicatorMeta {
            id: ids::total_sales(),
            label: "本日の売上".into(),
            short_label: None,
            icon: "yen-sign".into(),
            format: ValueFormat::Money {
                currency: currency.into(),
            },
            description: Some("sales_A + sales_B over all time slots".into()),
        },
        IndicatorMeta {
            id: ids::total_customers(),
            label: "客数".into(),
            short_label: None,
            icon: "users".into(),
            format: ValueFormat::Integer {
                unit: Some("人".into()),
            },
            description: Some("Sum of customers over all time slots".into()),
        },
        IndicatorMeta {
            id: ids::avg_unit_price(),
            label: "客単価".into(),
            short_label: None,
            icon: "receipt".into(),
            format: ValueFormat::Money {
                currency: currency.into(),
            },
            description: Some("Total sales / total customers".into()),
        },
        IndicatorMeta {
            id: ids::target_achievement(),
            label: "目標達成率".into(),
            short_label: Some("達成率".into()),
            icon: "target".into(),
            format: ValueFormat::Percent { decimals: 1 },
            description: Some("Total sales / total target".into()),
        },
    ];

    let sets = vec![IndicatorSetMeta {
        id: IndicatorSetId::new("sales_summary"),
        label: "サマリー".into(),
        indicators: summary_set(),
        columns: 4,
    }];

    IndicatorCatalogResponse { indicators, sets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_summary_set() {
        let catalog = build_catalog("¥");
        assert_eq!(catalog.sets.len(), 1);
        for id in &catalog.sets[0].indicators {
            assert!(catalog.indicators.iter().any(|m| &m.id == id));
        }
        assert_eq!(catalog.sets[0].columns, 4);
    }

    #[test]
    fn test_catalog_uses_configured_currency() {
        let catalog = build_catalog("$");
        let meta = catalog
            .indicators
            .iter()
            .find(|m| m.id == ids::avg_unit_price())
            .unwrap();
        assert_eq!(
            meta.format,
            ValueFormat::Money {
                currency: "$".into()
            }
        );
    }
}

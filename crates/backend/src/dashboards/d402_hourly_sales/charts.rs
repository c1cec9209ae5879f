use contracts::dashboards::d402_hourly_sales::{ChartData, ChartKind, ChartSeries, EnrichedRow};

pub const SALES_CHART_ID: &str = "sales_stacked";
pub const CUSTOMERS_CHART_ID: &str = "customers";
pub const ACHIEVEMENT_CHART_ID: &str = "achievement_rate";

fn categories(rows: &[EnrichedRow]) -> Vec<String> {
    rows.iter().map(|r| r.row.time.clone()).collect()
}

fn series(name: &str, values: Vec<f64>) -> ChartSeries {
    ChartSeries {
        name: name.to_string(),
        values,
        labels: None,
    }
}

/// Stacked bars of sales_A / sales_B per slot
pub fn sales_chart(rows: &[EnrichedRow]) -> ChartData {
    ChartData {
        id: SALES_CHART_ID.to_string(),
        title: "🧾 売上（積み上げ）".to_string(),
        kind: ChartKind::StackedBar,
        categories: categories(rows),
        series: vec![
            series("sales_A", rows.iter().map(|r| r.row.sales_a).collect()),
            series("sales_B", rows.iter().map(|r| r.row.sales_b).collect()),
        ],
    }
}

pub fn customers_chart(rows: &[EnrichedRow]) -> ChartData {
    ChartData {
        id: CUSTOMERS_CHART_ID.to_string(),
        title: "👥 客数".to_string(),
        kind: ChartKind::Bar,
        categories: categories(rows),
        series: vec![series(
            "customers",
            rows.iter().map(|r| r.row.customers as f64).collect(),
        )],
    }
}

/// Achievement line with a whole-percent label on every point
pub fn achievement_chart(rows: &[EnrichedRow]) -> ChartData {
    let values: Vec<f64> = rows.iter().map(|r| r.achievement_rate).collect();
    let labels = values.iter().map(|v| format!("{v:.0}%")).collect();

    ChartData {
        id: ACHIEVEMENT_CHART_ID.to_string(),
        title: "🎯 予算達成率".to_string(),
        kind: ChartKind::Line,
        categories: categories(rows),
        series: vec![ChartSeries {
            name: "achievement_rate".to_string(),
            values,
            labels: Some(labels),
        }],
    }
}

pub fn build_all(rows: &[EnrichedRow]) -> Vec<ChartData> {
    vec![
        sales_chart(rows),
        customers_chart(rows),
        achievement_chart(rows),
    ]
}

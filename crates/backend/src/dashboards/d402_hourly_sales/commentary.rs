use contracts::dashboards::d402_hourly_sales::{Commentary, EnrichedRow};

use crate::shared::config::CommentaryConfig;

pub const MIDDAY_MESSAGE: &str =
    "🍱 昼ピーク帯に強い売上傾向があります。昼前後の商品補充・スタッフ配置の強化が有効かもしれません。";
pub const EVENING_MESSAGE: &str =
    "🌇 夕方に売上が集中しています。仕事帰りの層を意識した販促が効果的かもしれません。";
pub const SPREAD_OUT_MESSAGE: &str =
    "🧐 売上が偏っていないので、時間帯ごとのプロモーションの工夫が必要かもしれません。";

pub const FALLBACK_RULE_NAME: &str = "spread_out";

/// One entry of the recommendation table: a set of slot labels and its message.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryRule {
    pub name: String,
    pub labels: Vec<String>,
    pub message: String,
}

impl CommentaryRule {
    fn new(name: &str, labels: &[&str], message: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            message: message.to_string(),
        }
    }

    fn matches(&self, time_label: &str) -> bool {
        self.labels.iter().any(|l| l == time_label)
    }
}

/// Ordered rules evaluated first-match-wins, plus a catch-all message.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryRules {
    rules: Vec<CommentaryRule>,
    fallback_message: String,
}

impl Default for CommentaryRules {
    fn default() -> Self {
        Self {
            rules: vec![
                CommentaryRule::new("midday_peak", &["12時", "13時", "14時"], MIDDAY_MESSAGE),
                CommentaryRule::new("evening_peak", &["17時", "18時", "19時"], EVENING_MESSAGE),
            ],
            fallback_message: SPREAD_OUT_MESSAGE.to_string(),
        }
    }
}

impl CommentaryRules {
    /// Built-in table, with whatever the config overrides.
    pub fn from_config(config: &CommentaryConfig) -> Self {
        let mut rules = Self::default();
        if let Some(configured) = &config.rules {
            rules.rules = configured
                .iter()
                .map(|r| CommentaryRule {
                    name: r.name.clone(),
                    labels: r.labels.clone(),
                    message: r.message.clone(),
                })
                .collect();
        }
        if let Some(message) = &config.fallback_message {
            rules.fallback_message = message.clone();
        }
        rules
    }

    /// Returns (rule name, message) for a peak slot label.
    pub fn classify(&self, peak_time: &str) -> (&str, &str) {
        self.rules
            .iter()
            .find(|rule| rule.matches(peak_time))
            .map(|rule| (rule.name.as_str(), rule.message.as_str()))
            .unwrap_or((FALLBACK_RULE_NAME, self.fallback_message.as_str()))
    }
}

/// Row with the highest total sales; the earliest row wins ties.
pub fn peak_row(rows: &[EnrichedRow]) -> Option<&EnrichedRow> {
    rows.iter().fold(None, |best: Option<&EnrichedRow>, row| match best {
        Some(b) if row.total_sales <= b.total_sales => Some(b),
        _ => Some(row),
    })
}

/// Row with the lowest achievement rate; the earliest row wins ties.
pub fn worst_row(rows: &[EnrichedRow]) -> Option<&EnrichedRow> {
    rows.iter().fold(None, |worst: Option<&EnrichedRow>, row| match worst {
        Some(w) if row.achievement_rate >= w.achievement_rate => Some(w),
        _ => Some(row),
    })
}

pub fn generate(rows: &[EnrichedRow], rules: &CommentaryRules) -> Option<Commentary> {
    let peak = peak_row(rows)?;
    let worst = worst_row(rows)?;
    let (bucket, recommendation) = rules.classify(&peak.row.time);

    Some(Commentary {
        peak_time: peak.row.time.clone(),
        worst_time: worst.row.time.clone(),
        bucket: bucket.to_string(),
        peak_sentence: format!("🕒 一番売れた時間帯：{}", peak.row.time),
        worst_sentence: format!("⚠️ 予算達成率が低かった時間帯：{}", worst.row.time),
        recommendation: recommendation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d402_hourly_sales::metrics::derive;
    use crate::dashboards::d402_hourly_sales::source::template;
    use crate::shared::config::CommentaryRuleConfig;
    use contracts::dashboards::d402_hourly_sales::SalesRow;

    fn rows(data: &[(&str, f64, f64)]) -> Vec<EnrichedRow> {
        let rows: Vec<SalesRow> = data
            .iter()
            .map(|(t, sales, target)| SalesRow::new(*t, *sales, 0.0, 1, *target))
            .collect();
        derive(&rows).unwrap().rows
    }

    #[test]
    fn test_classification_buckets() {
        let rules = CommentaryRules::default();
        assert_eq!(rules.classify("13時"), ("midday_peak", MIDDAY_MESSAGE));
        assert_eq!(rules.classify("18時"), ("evening_peak", EVENING_MESSAGE));
        assert_eq!(rules.classify("10時"), ("spread_out", SPREAD_OUT_MESSAGE));
        assert_eq!(rules.classify("closing"), ("spread_out", SPREAD_OUT_MESSAGE));
    }

    #[test]
    fn test_peak_ties_pick_earliest_row() {
        let data = rows(&[("10時", 500.0, 1000.0), ("13時", 900.0, 1000.0), ("18時", 900.0, 1000.0)]);
        assert_eq!(peak_row(&data).unwrap().row.time, "13時");
    }

    #[test]
    fn test_worst_ties_pick_earliest_row() {
        let data = rows(&[("10時", 900.0, 1000.0), ("11時", 500.0, 1000.0), ("12時", 500.0, 1000.0)]);
        assert_eq!(worst_row(&data).unwrap().row.time, "11時");
    }

    #[test]
    fn test_zero_target_rows_count_as_zero_achievement() {
        let data = rows(&[("10時", 100.0, 100.0), ("11時", 900.0, 0.0)]);
        assert_eq!(worst_row(&data).unwrap().row.time, "11時");
    }

    #[test]
    fn test_generate_for_template() {
        let derived = derive(&template()).unwrap();
        let commentary = generate(&derived.rows, &CommentaryRules::default()).unwrap();
        assert_eq!(commentary.peak_time, "18時");
        assert_eq!(commentary.worst_time, "10時");
        assert_eq!(commentary.bucket, "evening_peak");
        assert_eq!(commentary.recommendation, EVENING_MESSAGE);
        assert_eq!(commentary.peak_sentence, "🕒 一番売れた時間帯：18時");
    }

    #[test]
    fn test_generate_empty_dataset() {
        assert!(generate(&[], &CommentaryRules::default()).is_none());
    }

    #[test]
    fn test_config_overrides_rules() {
        let config = CommentaryConfig {
            rules: Some(vec![CommentaryRuleConfig {
                name: "morning_peak".into(),
                labels: vec!["10時".into()],
                message: "morning".into(),
            }]),
            fallback_message: Some("flat".into()),
        };
        let rules = CommentaryRules::from_config(&config);
        assert_eq!(rules.classify("10時"), ("morning_peak", "morning"));
        assert_eq!(rules.classify("13時"), ("spread_out", "flat"));
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let rules = CommentaryRules::from_config(&CommentaryConfig::default());
        assert_eq!(rules, CommentaryRules::default());
    }
}

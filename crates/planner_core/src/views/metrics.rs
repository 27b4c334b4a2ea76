//! Metric projections for the monthly and yearly plan panels.

use crate::model::constants::{metric, Metric, METRICS, WEEKS_PER_MONTH};
use crate::model::document::PlannerDocument;
use crate::model::month::MonthKey;
use crate::model::settings::Targets;
use crate::model::task::Category;
use std::collections::{BTreeMap, HashSet};

/// Metrics referenced by a task or with a positive value in any month.
pub fn active_metrics(document: &PlannerDocument) -> Vec<&'static Metric> {
    let mut used: HashSet<&str> = document
        .tasks
        .iter()
        .filter_map(|task| task.metric_key.as_deref())
        .collect();
    for values in document.monthly.values() {
        used.extend(
            values
                .iter()
                .filter(|(_, value)| **value > 0)
                .map(|(key, _)| key.as_str()),
        );
    }
    METRICS
        .iter()
        .filter(|metric| used.contains(metric.key))
        .collect()
}

/// Metrics belonging to one category.
pub fn metrics_for_category(category: Category) -> Vec<&'static Metric> {
    METRICS
        .iter()
        .filter(|metric| metric.category == category)
        .collect()
}

/// Recorded counters of one month; empty when none exist.
pub fn month_values(document: &PlannerDocument, month: MonthKey) -> BTreeMap<String, u32> {
    document
        .monthly
        .get(&month.to_string())
        .cloned()
        .unwrap_or_default()
}

/// Value of one metric in one month; 0 when absent.
pub fn month_value(document: &PlannerDocument, month: MonthKey, metric_key: &str) -> u32 {
    document
        .monthly
        .get(&month.to_string())
        .and_then(|values| values.get(metric_key))
        .copied()
        .unwrap_or(0)
}

/// Sum of a metric over the twelve months of `year`.
pub fn yearly_total(document: &PlannerDocument, metric_key: &str, year: i32) -> u64 {
    MonthKey::months_of_year(year)
        .map(|month| u64::from(month_value(document, month, metric_key)))
        .sum()
}

/// Targets after applying the user's override field by field.
///
/// Unknown metrics resolve to zero targets.
pub fn effective_targets(document: &PlannerDocument, metric_key: &str) -> Targets {
    let Some(definition) = metric(metric_key) else {
        return Targets {
            week_target: 0,
            year_target: 0,
        };
    };
    let custom = document
        .settings
        .metric_targets
        .get(metric_key)
        .copied()
        .unwrap_or_default();
    Targets {
        week_target: custom.week_target.unwrap_or(definition.week_target),
        year_target: custom.year_target.unwrap_or(definition.year_target),
    }
}

/// Monthly goal derived from the weekly target.
pub fn monthly_target(targets: Targets) -> u32 {
    (f64::from(targets.week_target) * WEEKS_PER_MONTH).round() as u32
}

/// Progress towards `target` as a percentage capped at 100.
pub fn target_percent(value: u64, target: u32) -> u32 {
    if target == 0 {
        return 0;
    }
    let pct = (value as f64 / f64::from(target) * 100.0).round();
    pct.min(100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::{
        active_metrics, effective_targets, metrics_for_category, monthly_target, target_percent,
        yearly_total,
    };
    use crate::model::document::PlannerDocument;
    use crate::model::settings::{TargetOverride, Targets};
    use crate::model::task::Category;
    use std::collections::BTreeMap;

    fn empty_document() -> PlannerDocument {
        let mut document = PlannerDocument::new(0);
        document.tasks.clear();
        document
    }

    #[test]
    fn active_metrics_come_from_tasks_and_positive_history() {
        let mut document = empty_document();
        assert!(active_metrics(&document).is_empty());

        document.monthly.insert(
            "2025-03".to_string(),
            BTreeMap::from([("fitness".to_string(), 2), ("leetcode".to_string(), 0)]),
        );
        let keys: Vec<&str> = active_metrics(&document)
            .into_iter()
            .map(|metric| metric.key)
            .collect();
        assert_eq!(keys, vec!["fitness"]);
    }

    #[test]
    fn yearly_total_ignores_other_years() {
        let mut document = empty_document();
        document.monthly.insert(
            "2026-01".to_string(),
            BTreeMap::from([("leetcode".to_string(), 4)]),
        );
        document.monthly.insert(
            "2026-12".to_string(),
            BTreeMap::from([("leetcode".to_string(), 6)]),
        );
        document.monthly.insert(
            "2025-12".to_string(),
            BTreeMap::from([("leetcode".to_string(), 100)]),
        );
        assert_eq!(yearly_total(&document, "leetcode", 2026), 10);
        assert_eq!(yearly_total(&document, "fitness", 2026), 0);
    }

    #[test]
    fn partial_override_falls_back_per_field() {
        let mut document = empty_document();
        document.settings.metric_targets.insert(
            "leetcode".to_string(),
            TargetOverride {
                week_target: Some(10),
                year_target: None,
            },
        );
        assert_eq!(
            effective_targets(&document, "leetcode"),
            Targets {
                week_target: 10,
                year_target: 150
            }
        );
        assert_eq!(
            effective_targets(&document, "unknown"),
            Targets {
                week_target: 0,
                year_target: 0
            }
        );
    }

    #[test]
    fn monthly_target_and_percent_are_rounded_and_capped() {
        let targets = Targets {
            week_target: 3,
            year_target: 144,
        };
        assert_eq!(monthly_target(targets), 13);
        assert_eq!(target_percent(6, 13), 46);
        assert_eq!(target_percent(40, 13), 100);
        assert_eq!(target_percent(5, 0), 0);
    }

    #[test]
    fn toeic_has_three_metrics() {
        assert_eq!(metrics_for_category(Category::Toeic).len(), 3);
    }
}

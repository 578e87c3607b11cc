// Rule-based advisories over the latest reading of each monitored series
use super::telemetry::Series;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub message: String,
    pub severity: Severity,
}

impl Advisory {
    fn warning(message: String) -> Self {
        Self {
            message,
            severity: Severity::Warning,
        }
    }

    fn info(message: String) -> Self {
        Self {
            message,
            severity: Severity::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Below,
    Above,
}

impl Condition {
    fn breached(&self, value: f64, threshold: f64) -> bool {
        match self {
            Condition::Below => value < threshold,
            Condition::Above => value > threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdvisoryRule {
    /// Id of the configured series this rule watches
    pub series: String,
    pub label: String,
    pub condition: Condition,
    pub threshold: f64,
    /// Recommendation appended after the observed value
    pub message: String,
}

impl AdvisoryRule {
    pub fn humidity_low(threshold: f64) -> Self {
        Self {
            series: "humidity".to_string(),
            label: "humidity".to_string(),
            condition: Condition::Below,
            threshold,
            message: "Soil and air are drying out, consider watering the plant.".to_string(),
        }
    }

    pub fn uv_high(threshold: f64) -> Self {
        Self {
            series: "uv".to_string(),
            label: "UV index".to_string(),
            condition: Condition::Above,
            threshold,
            message: "Strong sunlight, move the plant to partial shade.".to_string(),
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::humidity_low(40.0), Self::uv_high(6.0)]
    }

    fn check(&self, series: &Series) -> Option<Advisory> {
        let Some(last) = series.last() else {
            return Some(Advisory::info(format!("No recent data for {}.", self.label)));
        };

        self.condition
            .breached(last.value, self.threshold)
            .then(|| {
                Advisory::warning(format!(
                    "{} is {} ({} threshold {}). {}",
                    capitalize(&self.label),
                    format_value(last.value),
                    match self.condition {
                        Condition::Below => "below",
                        Condition::Above => "above",
                    },
                    format_value(self.threshold),
                    self.message
                ))
            })
    }
}

/// Evaluate every rule against the latest point of the series it watches.
///
/// Rules whose series is not among `series` are treated as having no data.
/// The result follows rule order and depends on nothing but the inputs.
pub fn evaluate(series: &[(&str, &Series)], rules: &[AdvisoryRule]) -> Vec<Advisory> {
    let empty = Series::empty();
    rules
        .iter()
        .filter_map(|rule| {
            let watched = series
                .iter()
                .find(|(id, _)| *id == rule.series)
                .map(|(_, s)| *s)
                .unwrap_or(&empty);
            rule.check(watched)
        })
        .collect()
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalizer::normalize;
    use crate::domain::telemetry::RawRow;

    fn series(values: &[&str]) -> Series {
        normalize(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let time = format!("2024-05-01T10:{:02}:00Z", i);
                    RawRow::new(Some(&time), Some(v))
                })
                .collect(),
        )
    }

    #[test]
    fn test_humidity_below_threshold_warns() {
        let humidity = series(&["60", "50", "35"]);
        let advisories = evaluate(&[("humidity", &humidity)], &[AdvisoryRule::humidity_low(40.0)]);

        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].severity, Severity::Warning);
        assert!(advisories[0].message.contains("35"));
    }

    #[test]
    fn test_humidity_above_threshold_is_quiet() {
        let humidity = series(&["30", "55"]);
        let advisories = evaluate(&[("humidity", &humidity)], &[AdvisoryRule::humidity_low(40.0)]);
        assert!(advisories.is_empty());
    }

    #[test]
    fn test_only_latest_point_counts() {
        let uv = series(&["9", "9", "3"]);
        assert!(evaluate(&[("uv", &uv)], &[AdvisoryRule::uv_high(6.0)]).is_empty());

        let uv = series(&["1", "7.4"]);
        let advisories = evaluate(&[("uv", &uv)], &[AdvisoryRule::uv_high(6.0)]);
        assert_eq!(advisories[0].severity, Severity::Warning);
        assert!(advisories[0].message.contains("7.4"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let uv = series(&["6"]);
        assert!(evaluate(&[("uv", &uv)], &[AdvisoryRule::uv_high(6.0)]).is_empty());
    }

    #[test]
    fn test_empty_series_reports_no_data() {
        let uv = Series::empty();
        let advisories = evaluate(&[("uv", &uv)], &[AdvisoryRule::uv_high(6.0)]);

        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].severity, Severity::Info);
        assert!(advisories[0].message.contains("No recent data for UV index"));
    }

    #[test]
    fn test_missing_series_reports_no_data() {
        let advisories = evaluate(&[], &AdvisoryRule::defaults());
        assert_eq!(advisories.len(), 2);
        assert!(advisories.iter().all(|a| a.severity == Severity::Info));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let humidity = series(&["20"]);
        let uv = series(&["8"]);
        let input = [("humidity", &humidity), ("uv", &uv)];
        let rules = AdvisoryRule::defaults();

        let first = evaluate(&input, &rules);
        let second = evaluate(&input, &rules);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}

// Series normalization - raw store rows into canonical UTC series
use super::telemetry::{PivotedRow, RawRow, Series, TimeSeriesPoint};
use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Convert raw rows into an ascending series, dropping incomplete rows.
///
/// Rows without a timestamp or value, with an unparseable value, or with a
/// non-finite value are skipped. Duplicate timestamps keep the first row.
pub fn normalize(rows: Vec<RawRow>) -> Series {
    let points = rows
        .into_iter()
        .filter_map(|row| {
            let time = parse_time(row.time.as_deref()?)?;
            let value = parse_value(row.value.as_deref()?)?;
            Some(TimeSeriesPoint::new(time, value))
        })
        .collect();

    into_series(points)
}

/// Split pivoted three-field rows into one series per axis
pub fn normalize_pivoted(rows: Vec<PivotedRow>) -> [Series; 3] {
    let mut axes: [Vec<RawRow>; 3] = Default::default();
    for row in rows {
        let [x, y, z] = row.values;
        for (axis, value) in axes.iter_mut().zip([x, y, z]) {
            axis.push(RawRow {
                time: row.time.clone(),
                value,
            });
        }
    }

    axes.map(normalize)
}

fn into_series(mut points: Vec<TimeSeriesPoint>) -> Series {
    // Store output is already time-sorted; a stable sort keeps it that way
    points.sort_by_key(|p| p.time);
    points.dedup_by_key(|p| p.time);
    Series::from_sorted(points)
}

/// Parse a timestamp, tagging naive values as UTC
pub fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// Derived signals computed from several axis series
use super::telemetry::{DerivedSeries, Series, TimeSeriesPoint};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DerivedFormula {
    #[default]
    Magnitude,
}

impl DerivedFormula {
    pub fn apply(&self, ax: &Series, ay: &Series, az: &Series) -> DerivedSeries {
        match self {
            DerivedFormula::Magnitude => magnitude(ax, ay, az),
        }
    }
}

/// Euclidean norm of three axes, inner-joined on exact timestamp.
///
/// A timestamp missing from any axis produces no output point.
pub fn magnitude(ax: &Series, ay: &Series, az: &Series) -> DerivedSeries {
    let ys: HashMap<_, f64> = ay.points().iter().map(|p| (p.time, p.value)).collect();
    let zs: HashMap<_, f64> = az.points().iter().map(|p| (p.time, p.value)).collect();

    let points = ax
        .points()
        .iter()
        .filter_map(|x| {
            let y = ys.get(&x.time)?;
            let z = zs.get(&x.time)?;
            let norm = x.value.hypot(*y).hypot(*z);
            Some(TimeSeriesPoint::new(x.time, norm))
        })
        .collect();

    Series::from_sorted(points)
}

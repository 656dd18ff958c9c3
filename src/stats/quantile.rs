use std::str::FromStr;

use crate::error::StatsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    Higher,
    Lower,
    Midpoint,
    Nearest,
}

const ALLOWED_INTERPOLATIONS: &str = "'linear','higher','midpoint','nearest', or 'lower'";

impl FromStr for Interpolation {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Interpolation::Linear),
            "higher" => Ok(Interpolation::Higher),
            "lower" => Ok(Interpolation::Lower),
            "midpoint" => Ok(Interpolation::Midpoint),
            "nearest" => Ok(Interpolation::Nearest),
            other => Err(StatsError::InvalidInterpolation {
                given: other.to_string(),
                allowed: ALLOWED_INTERPOLATIONS.to_string(),
            }),
        }
    }
}

impl Interpolation {
    fn between(self, lo: f64, hi: f64, frac: f64) -> f64 {
        match self {
            Interpolation::Linear => lo + frac * (hi - lo),
            Interpolation::Higher => hi,
            Interpolation::Lower => lo,
            Interpolation::Midpoint => (lo + hi) / 2.0,
            Interpolation::Nearest => {
                if frac < 0.5 {
                    lo
                } else {
                    hi
                }
            }
        }
    }
}

/// Whole-number repeat count for a raw weight. Fractions are truncated; null
/// and non-positive weights give zero.
pub fn weight_count(weight: Option<f64>) -> u64 {
    match weight {
        Some(w) if w.is_finite() && w >= 1.0 => w.trunc() as u64,
        _ => 0,
    }
}

/// Non-null values with a positive whole weight, sorted ascending. The sort is
/// stable so equal values keep their input order.
pub fn weighted_series(values: &[Option<f64>], weights: &[Option<f64>]) -> Vec<(f64, u64)> {
    let mut series = values
        .iter()
        .zip(weights)
        .filter_map(|(v, w)| {
            let v = (*v).filter(|v| !v.is_nan())?;
            let count = weight_count(*w);
            (count > 0).then_some((v, count))
        })
        .collect::<Vec<_>>();
    series.sort_by(|a, b| a.0.total_cmp(&b.0));
    series
}

/// Weighted quantile with closest-rank linear interpolation (C = 1).
///
/// Weighting a value by `w` is equivalent to repeating it `w` times and taking
/// the ordinary quantile of the expanded series. `series` must come from
/// [`weighted_series`]. Returns NaN for an empty series.
pub fn weighted_quantile(series: &[(f64, u64)], q: f64, interpolation: Interpolation) -> f64 {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return f64::NAN;
    };
    if q <= 0.0 {
        return first.0;
    }
    if q >= 1.0 {
        return last.0;
    }

    let total: u64 = series.iter().map(|&(_, w)| w).sum();
    let rank = q * (total - 1) as f64 + 1.0;
    let rank_int = (rank.trunc() as u64).max(1);
    let rank_frac = rank % rank_int as f64;

    let mut steps = 0u64;
    for (idx, &(value, weight)) in series.iter().enumerate() {
        steps += weight;
        if steps < rank_int {
            continue;
        }
        // The rank lands on the last unit of this value; the next value bounds it.
        if steps == rank_int && idx + 1 < series.len() {
            return interpolation.between(value, series[idx + 1].0, rank_frac);
        }
        return value;
    }
    last.0
}

/// Ordinary quantile with linear interpolation between closest ranks over the
/// non-null values. NaN when no value is present.
pub fn quantile(values: &[Option<f64>], q: f64) -> f64 {
    let mut sorted = values
        .iter()
        .filter_map(|v| (*v).filter(|v| !v.is_nan()))
        .collect::<Vec<_>>();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, q)
}

pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

pub fn min(values: &[Option<f64>]) -> f64 {
    values
        .iter()
        .filter_map(|v| (*v).filter(|v| !v.is_nan()))
        .reduce(f64::min)
        .unwrap_or(f64::NAN)
}

pub fn max(values: &[Option<f64>]) -> f64 {
    values
        .iter()
        .filter_map(|v| (*v).filter(|v| !v.is_nan()))
        .reduce(f64::max)
        .unwrap_or(f64::NAN)
}

pub fn mean(values: &[Option<f64>]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values.iter().filter_map(|v| (*v).filter(|v| !v.is_nan())) {
        sum += v;
        n += 1;
    }
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

pub fn median(values: &[Option<f64>]) -> f64 {
    quantile(values, 0.5)
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/quantile.rs"]
mod tests;

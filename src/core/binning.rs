use serde::{Deserialize, Serialize};

use crate::error::{MosaicError, MosaicResult};

/// Largest bin count a histogram may use.
pub const MAX_BINS: usize = 4096;

/// How histogram bin edges are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinSpec {
    /// Fixed number of equal-width bins over the data range.
    Count(usize),
    /// Bin width `2 * IQR / n^(1/3)`.
    FreedmanDiaconis,
}

impl Default for BinSpec {
    fn default() -> Self {
        Self::Count(30)
    }
}

/// Equal-width binning of a sample.
///
/// Every bin is half-open `[left, right)` except the last, which also
/// contains the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    assignments: Vec<usize>,
    counts: Vec<usize>,
}

impl Histogram {
    pub fn from_values(values: &[f64], spec: BinSpec) -> MosaicResult<Self> {
        if values.is_empty() {
            return Err(MosaicError::InvalidData(
                "cannot bin an empty sample".to_owned(),
            ));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(MosaicError::InvalidData(
                "histogram values must be finite".to_owned(),
            ));
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let n_bins = match spec {
            BinSpec::Count(0) => {
                return Err(MosaicError::InvalidData(
                    "bin count must be > 0".to_owned(),
                ));
            }
            BinSpec::Count(n) => n,
            BinSpec::FreedmanDiaconis => freedman_diaconis_bins(values, min, max)?,
        };
        if n_bins > MAX_BINS {
            return Err(MosaicError::InvalidData(format!(
                "{n_bins} bins exceeds the limit of {MAX_BINS}"
            )));
        }

        let width = (max - min) / n_bins as f64;
        let edges: Vec<f64> = (0..=n_bins)
            .map(|i| if i == n_bins { max } else { min + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; n_bins];
        let assignments: Vec<usize> = values
            .iter()
            .map(|&value| {
                let raw = ((value - min) / width).floor();
                let bin = if raw < 0.0 { 0 } else { (raw as usize).min(n_bins - 1) };
                counts[bin] += 1;
                bin
            })
            .collect();

        Ok(Self {
            edges,
            assignments,
            counts,
        })
    }

    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Bin index of each input value, in input order.
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Input indices falling into `bin`, in input order.
    #[must_use]
    pub fn members(&self, bin: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(index, &assigned)| (assigned == bin).then_some(index))
            .collect()
    }
}

fn freedman_diaconis_bins(values: &[f64], min: f64, max: f64) -> MosaicResult<usize> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);
    let width = 2.0 * iqr / (sorted.len() as f64).cbrt();
    if width <= 0.0 {
        return Ok(1);
    }

    // compare before the cast, which saturates
    let bins = ((max - min) / width).ceil();
    if bins > MAX_BINS as f64 {
        return Err(MosaicError::InvalidData(format!(
            "Freedman-Diaconis rule asks for {bins} bins, limit is {MAX_BINS}"
        )));
    }
    Ok((bins as usize).max(1))
}

/// Linear-interpolated percentile over a sorted sample.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::{BinSpec, Histogram, MAX_BINS};
    use crate::error::MosaicError;

    #[test]
    fn maximum_lands_in_last_bin() {
        let hist = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], BinSpec::Count(2))
            .expect("histogram");
        assert_eq!(hist.counts(), &[2, 3]);
        assert_eq!(hist.assignments(), &[0, 0, 1, 1, 1]);
        assert_eq!(hist.max_count(), 3);
    }

    #[test]
    fn constant_sample_uses_unit_range() {
        let hist = Histogram::from_values(&[5.0, 5.0], BinSpec::Count(4)).expect("histogram");
        assert_eq!(hist.edges().first().copied(), Some(4.5));
        assert_eq!(hist.edges().last().copied(), Some(5.5));
        assert_eq!(hist.counts().iter().sum::<usize>(), 2);
    }

    #[test]
    fn freedman_diaconis_collapses_zero_iqr() {
        let hist = Histogram::from_values(&[1.0, 1.0, 1.0, 1.0, 9.0], BinSpec::FreedmanDiaconis)
            .expect("histogram");
        assert_eq!(hist.n_bins(), 1);
    }

    #[test]
    fn zero_bins_is_rejected() {
        assert!(Histogram::from_values(&[1.0], BinSpec::Count(0)).is_err());
    }

    #[test]
    fn outlier_cannot_explode_the_bin_count() {
        let values: Vec<f64> = (0..100).map(f64::from).chain([1e15]).collect();
        let err = Histogram::from_values(&values, BinSpec::FreedmanDiaconis)
            .expect_err("too many bins");
        assert!(matches!(err, MosaicError::InvalidData(_)));
    }

    #[test]
    fn explicit_bin_count_is_bounded() {
        assert!(Histogram::from_values(&[0.0, 1.0], BinSpec::Count(MAX_BINS)).is_ok());
        assert!(Histogram::from_values(&[0.0, 1.0], BinSpec::Count(MAX_BINS + 1)).is_err());
    }
}

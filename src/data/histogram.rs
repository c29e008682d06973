use super::model::GameStart;

/// Fixed binning for the FPTS histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for HistogramSpec {
    fn default() -> Self {
        Self {
            min: -5.0,
            max: 15.0,
            step: 1.0,
        }
    }
}

impl HistogramSpec {
    pub fn bin_count(&self) -> usize {
        ((self.max - self.min) / self.step).ceil().max(0.0) as usize
    }

    /// Bin index for `value`. Bins are half-open `[lo, lo + step)` except the
    /// last, which also takes `max` itself.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.min || value > self.max {
            return None;
        }
        let idx = ((value - self.min) / self.step).floor() as usize;
        Some(idx.min(self.bin_count().saturating_sub(1)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// Binned FPTS distribution plus the mean marker position.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub spec: HistogramSpec,
    pub bins: Vec<Bin>,
    /// Values that fell outside the display extent.
    pub outside: usize,
    /// Mean over every finite value, including those outside the extent.
    pub mean: Option<f64>,
}

impl Histogram {
    pub fn from_values<I>(values: I, spec: HistogramSpec) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut bins: Vec<Bin> = (0..spec.bin_count())
            .map(|i| {
                let lower = spec.min + i as f64 * spec.step;
                Bin {
                    lower,
                    upper: (lower + spec.step).min(spec.max),
                    count: 0,
                }
            })
            .collect();

        let mut outside = 0;
        let mut sum = 0.0;
        let mut n = 0usize;

        for v in values {
            if v.is_finite() {
                sum += v;
                n += 1;
            }
            match spec.bin_of(v) {
                Some(i) => bins[i].count += 1,
                None => outside += 1,
            }
        }

        Histogram {
            spec,
            bins,
            outside,
            mean: (n > 0).then(|| sum / n as f64),
        }
    }

    pub fn from_starts(rows: &[&GameStart], spec: HistogramSpec) -> Self {
        Self::from_values(rows.iter().map(|gs| gs.fantasy_points), spec)
    }

    /// Number of values drawn in the visible bins.
    pub fn binned(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_none()
    }
}

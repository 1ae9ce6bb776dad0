//! Statistical summaries of training runs.
//!
//! The trainer reports batches of episode results; this crate condenses a
//! batch of scores (or move counts, or peak ranks) into the usual headline
//! numbers.
//!
//! # Examples
//!
//! ```
//! use mergris_stats::DescriptiveStats;
//!
//! let scores = [12.0, 40.0, 24.0, 8.0, 16.0];
//! let stats = DescriptiveStats::new(scores).unwrap();
//! assert_eq!(stats.min, 8.0);
//! assert_eq!(stats.max, 40.0);
//! assert_eq!(stats.mean, 20.0);
//! ```

/// Descriptive statistics over one batch of episode results.
#[derive(Debug, Clone)]
pub struct DescriptiveStats {
    /// Number of samples in the batch.
    pub count: usize,
    /// The smallest sample.
    pub min: f32,
    /// The largest sample.
    pub max: f32,
    /// The arithmetic mean.
    pub mean: f32,
    /// The median sample.
    pub median: f32,
    /// The population standard deviation.
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Computes statistics from unsorted samples.
    ///
    /// The samples are collected and sorted internally.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the batch contains at least one sample
    /// * `None` - if the batch is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use mergris_stats::DescriptiveStats;
    /// let stats = DescriptiveStats::new([3.0, 1.0, 2.0]).unwrap();
    /// assert_eq!(stats.median, 2.0);
    /// assert!(DescriptiveStats::new([]).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut samples = samples.into_iter().collect::<Vec<_>>();
        samples.sort_by(f32::total_cmp);
        Self::from_sorted(&samples)
    }

    /// Computes statistics from pre-sorted samples, skipping the sort.
    ///
    /// # Panics
    ///
    /// Panics if `sorted` is not in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mergris_stats::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(stats.count, 4);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted: &[f32]) -> Option<Self> {
        assert!(
            sorted.is_sorted_by(|a, b| a <= b),
            "samples must be sorted in ascending order"
        );

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let count = sorted.len();
        let n = count as f32;
        let mean = sorted.iter().copied().sum::<f32>() / n;
        let median = sorted[count / 2];
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            std_dev,
        })
    }
}

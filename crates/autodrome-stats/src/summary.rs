/// Summary statistics over one telemetry metric across a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// The smallest observed value.
    pub min: f32,
    /// The largest observed value.
    pub max: f32,
    /// The arithmetic mean of all values.
    pub mean: f32,
    /// The population standard deviation.
    pub std_dev: f32,
}

impl Summary {
    /// Computes summary statistics over an iterator of values.
    ///
    /// Returns `None` for an empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use autodrome_stats::summary::Summary;
    /// let stats = Summary::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        let mut sum = 0.0f32;
        let mut sum_sq = 0.0f32;
        let mut count = 0usize;
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            sum_sq += v * v;
            count += 1;
        }
        if count == 0 {
            return None;
        }

        let n = count as f32;
        let mean = sum / n;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        Some(Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

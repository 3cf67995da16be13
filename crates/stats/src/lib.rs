//! Sample statistics for annual-maxima series.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Counts distinct values, treating values closer than 1e-10 as equal.
pub fn count_distinct(values: &[f64]) -> usize {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    sorted
        .windows(2)
        .filter(|w| (w[1] - w[0]).abs() > 1e-10)
        .count()
        + 1
}

/// First three sample L-moments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LMoments {
    /// l1, the mean.
    pub l1: f64,
    /// l2, half the expected absolute difference of two draws.
    pub l2: f64,
    /// l3, the third L-moment.
    pub l3: f64,
}

impl LMoments {
    /// L-skewness t3 = l3 / l2. `None` when l2 is not positive.
    pub fn t3(&self) -> Option<f64> {
        (self.l2 > 0.0).then(|| self.l3 / self.l2)
    }
}

/// Unbiased sample L-moments from probability-weighted moments.
///
/// Returns `None` for fewer than 3 values or any non-finite value.
pub fn l_moments(data: &[f64]) -> Option<LMoments> {
    let n = data.len();
    if n < 3 || data.iter().any(|x| !x.is_finite()) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let nf = n as f64;
    let mut b0 = 0.0;
    let mut b1 = 0.0;
    let mut b2 = 0.0;
    for (i, &x) in sorted.iter().enumerate() {
        let j = i as f64;
        b0 += x;
        b1 += j / (nf - 1.0) * x;
        b2 += j * (j - 1.0) / ((nf - 1.0) * (nf - 2.0)) * x;
    }
    b0 /= nf;
    b1 /= nf;
    b2 /= nf;

    Some(LMoments {
        l1: b0,
        l2: 2.0 * b1 - b0,
        l3: 6.0 * b2 - 6.0 * b1 + b0,
    })
}

//! GEV parameter type and distribution functions.

use rand::Rng;

use crate::error::GevError;

/// Below this magnitude the shape is treated as zero (Gumbel limit).
const GUMBEL_EPS: f64 = 1e-8;

/// Parameters of a Generalized Extreme Value distribution.
///
/// The shape `c` follows the convention
/// `F(x) = exp(-(1 - c z)^(1/c))` with `z = (x - loc) / scale`:
///
/// | `c` | Tail |
/// |-----|------|
/// | `> 0` | bounded above at `loc + scale / c` (Weibull type) |
/// | `= 0` | Gumbel |
/// | `< 0` | heavy, bounded below at `loc + scale / c` (Fréchet type) |
///
/// All three values are finite and `scale > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GevParams {
    shape: f64,
    loc: f64,
    scale: f64,
}

impl GevParams {
    /// Creates parameters after checking finiteness and `scale > 0`.
    pub fn new(shape: f64, loc: f64, scale: f64) -> Option<Self> {
        if shape.is_finite() && loc.is_finite() && scale.is_finite() && scale > 0.0 {
            Some(Self { shape, loc, scale })
        } else {
            None
        }
    }

    /// Like [`GevParams::new`] but reports the rejected triple.
    ///
    /// # Errors
    ///
    /// Returns [`GevError::InvalidParams`] if any value is non-finite or the
    /// scale is not positive.
    pub fn try_new(shape: f64, loc: f64, scale: f64) -> Result<Self, GevError> {
        Self::new(shape, loc, scale).ok_or(GevError::InvalidParams { shape, loc, scale })
    }

    /// Shape parameter (c).
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Location parameter.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn is_gumbel(&self) -> bool {
        self.shape.abs() < GUMBEL_EPS
    }

    /// Cumulative distribution function.
    pub fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.loc) / self.scale;
        if self.is_gumbel() {
            return (-(-z).exp()).exp();
        }
        let t = 1.0 - self.shape * z;
        if t <= 0.0 {
            // outside the support: above the upper bound (c > 0) or below
            // the lower bound (c < 0)
            return if self.shape > 0.0 { 1.0 } else { 0.0 };
        }
        (-t.powf(1.0 / self.shape)).exp()
    }

    /// Inverse CDF (quantile function).
    ///
    /// Returns NaN for `p` outside `[0, 1]`. The end points map to the
    /// support bounds, which may be infinite.
    pub fn quantile(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        let y = -p.ln();
        if self.is_gumbel() {
            self.loc - self.scale * y.ln()
        } else {
            self.loc + self.scale * (1.0 - y.powf(self.shape)) / self.shape
        }
    }

    /// Log probability density. `-inf` outside the support.
    pub fn log_pdf(&self, x: f64) -> f64 {
        let z = (x - self.loc) / self.scale;
        if self.is_gumbel() {
            return -self.scale.ln() - z - (-z).exp();
        }
        let t = 1.0 - self.shape * z;
        if t <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let ln_t = t.ln();
        -self.scale.ln() + (1.0 / self.shape - 1.0) * ln_t - (ln_t / self.shape).exp()
    }

    /// Log-likelihood of a sample.
    pub fn log_likelihood(&self, data: &[f64]) -> f64 {
        data.iter().map(|&x| self.log_pdf(x)).sum()
    }

    /// Draws one value by inverse-transform sampling.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.random();
        self.quantile(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    #[test]
    fn new_valid() {
        let p = GevParams::new(0.1, 50.0, 15.0).unwrap();
        assert_relative_eq!(p.shape(), 0.1);
        assert_relative_eq!(p.loc(), 50.0);
        assert_relative_eq!(p.scale(), 15.0);
    }

    #[test]
    fn new_invalid() {
        assert!(GevParams::new(0.1, 50.0, 0.0).is_none());
        assert!(GevParams::new(0.1, 50.0, -1.0).is_none());
        assert!(GevParams::new(f64::NAN, 50.0, 1.0).is_none());
        assert!(GevParams::new(0.1, f64::INFINITY, 1.0).is_none());
    }

    #[test]
    fn try_new_reports_triple() {
        let err = GevParams::try_new(0.0, 1.0, -2.0).unwrap_err();
        assert!(matches!(err, GevError::InvalidParams { scale, .. } if scale == -2.0));
    }

    #[test]
    fn gumbel_known_quantile() {
        // Gumbel median = loc - scale * ln(ln 2)
        let p = GevParams::new(0.0, 10.0, 2.0).unwrap();
        let expected = 10.0 - 2.0 * (2.0_f64.ln()).ln();
        assert_relative_eq!(p.quantile(0.5), expected, epsilon = 1e-12);
    }

    #[test]
    fn quantile_cdf_round_trip() {
        for &c in &[-0.3, -0.05, 0.0, 0.05, 0.3] {
            let p = GevParams::new(c, 60.0, 20.0).unwrap();
            for &prob in &[0.01, 0.1, 0.5, 0.9, 0.99, 0.999] {
                let x = p.quantile(prob);
                assert_relative_eq!(p.cdf(x), prob, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn quantile_monotone_in_probability() {
        for &c in &[-0.2, 0.0, 0.2] {
            let p = GevParams::new(c, 60.0, 20.0).unwrap();
            let mut prev = f64::NEG_INFINITY;
            for i in 1..100 {
                let q = p.quantile(i as f64 / 100.0);
                assert!(q > prev, "c={c}: quantile not increasing at {i}");
                prev = q;
            }
        }
    }

    #[test]
    fn quantile_out_of_range_is_nan() {
        let p = GevParams::new(0.1, 0.0, 1.0).unwrap();
        assert!(p.quantile(-0.1).is_nan());
        assert!(p.quantile(1.1).is_nan());
    }

    #[test]
    fn upper_bound_for_positive_shape() {
        let p = GevParams::new(0.5, 0.0, 1.0).unwrap();
        assert_relative_eq!(p.quantile(1.0), 2.0, epsilon = 1e-12);
        assert_eq!(p.cdf(3.0), 1.0);
        assert_eq!(p.log_pdf(3.0), f64::NEG_INFINITY);
    }

    #[test]
    fn lower_bound_for_negative_shape() {
        let p = GevParams::new(-0.5, 0.0, 1.0).unwrap();
        assert_eq!(p.cdf(-3.0), 0.0);
        assert_eq!(p.log_pdf(-3.0), f64::NEG_INFINITY);
    }

    #[test]
    fn pdf_integrates_to_one() {
        let p = GevParams::new(-0.1, 50.0, 10.0).unwrap();
        let (a, b, n) = (0.0, 600.0, 60_000);
        let h = (b - a) / n as f64;
        let total: f64 = (0..n)
            .map(|i| p.log_pdf(a + (i as f64 + 0.5) * h).exp() * h)
            .sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn gumbel_limit_is_continuous() {
        let g = GevParams::new(0.0, 30.0, 8.0).unwrap();
        let near = GevParams::new(1e-6, 30.0, 8.0).unwrap();
        for &x in &[10.0, 30.0, 60.0] {
            assert_relative_eq!(g.log_pdf(x), near.log_pdf(x), epsilon = 1e-4);
            assert_relative_eq!(g.cdf(x), near.cdf(x), epsilon = 1e-4);
        }
    }

    #[test]
    fn samples_follow_distribution() {
        let p = GevParams::new(0.0, 50.0, 10.0).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let n = 20_000;
        let below_median = (0..n)
            .filter(|_| p.sample(&mut rng) <= p.quantile(0.5))
            .count();
        let frac = below_median as f64 / n as f64;
        assert!((frac - 0.5).abs() < 0.02, "fraction below median = {frac}");
    }

    #[test]
    fn gev_params_is_copy_clone_send_sync() {
        fn assert_impl<T: Copy + Clone + Send + Sync>() {}
        assert_impl::<GevParams>();
    }
}

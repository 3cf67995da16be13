use pluvio_gev::{FitConfig, GevError, GevParams, fit_gev};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Gumbel};

fn gev_sample(params: GevParams, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| params.sample(&mut rng)).collect()
}

#[test]
fn fit_is_deterministic() {
    let data = [
        45.2, 61.0, 38.7, 72.4, 55.1, 49.9, 88.3, 52.6, 41.0, 66.8, 59.3, 47.5,
    ];
    let config = FitConfig::new();
    let a = fit_gev(&data, &config).unwrap();
    let b = fit_gev(&data, &config).unwrap();
    assert!((a.params().shape() - b.params().shape()).abs() < 1e-6);
    assert!((a.params().loc() - b.params().loc()).abs() < 1e-6);
    assert!((a.params().scale() - b.params().scale()).abs() < 1e-6);
    assert_eq!(a.samples(), b.samples());
}

#[test]
fn recovers_gumbel_parameters() {
    let mut rng = StdRng::seed_from_u64(2024);
    let gumbel = Gumbel::new(70.0, 18.0).unwrap();
    let data: Vec<f64> = (0..3000).map(|_| gumbel.sample(&mut rng)).collect();

    let fit = fit_gev(&data, &FitConfig::new()).unwrap();
    let p = fit.params();
    assert!(p.shape().abs() < 0.05, "shape = {}", p.shape());
    assert!((p.loc() - 70.0).abs() < 1.5, "loc = {}", p.loc());
    assert!((p.scale() - 18.0).abs() < 1.5, "scale = {}", p.scale());
}

#[test]
fn recovers_heavy_tail() {
    let truth = GevParams::new(-0.2, 50.0, 12.0).unwrap();
    let data = gev_sample(truth, 3000, 11);

    let fit = fit_gev(&data, &FitConfig::new()).unwrap();
    let p = fit.params();
    assert!((p.shape() + 0.2).abs() < 0.06, "shape = {}", p.shape());
    assert!((p.loc() - 50.0).abs() < 1.5, "loc = {}", p.loc());
    assert!((p.scale() - 12.0).abs() < 1.5, "scale = {}", p.scale());
}

#[test]
fn design_depth_increases_with_return_period() {
    let truth = GevParams::new(0.05, 80.0, 25.0).unwrap();
    let data = gev_sample(truth, 40, 5);
    let fit = fit_gev(&data, &FitConfig::new()).unwrap();

    let depths: Vec<f64> = [2.0, 10.0, 100.0, 1000.0]
        .iter()
        .map(|t| fit.params().quantile(1.0 - 1.0 / t))
        .collect();
    assert!(depths.windows(2).all(|w| w[1] > w[0]), "{depths:?}");
}

#[test]
fn constant_maxima_rejected() {
    let err = fit_gev(&[35.0; 15], &FitConfig::new()).unwrap_err();
    assert_eq!(err, GevError::ConstantData { distinct: 1 });
}

#[test]
fn seed_changes_samples_not_params() {
    let data = gev_sample(GevParams::new(0.0, 60.0, 10.0).unwrap(), 30, 9);
    let a = fit_gev(&data, &FitConfig::new().with_seed(1)).unwrap();
    let b = fit_gev(&data, &FitConfig::new().with_seed(2)).unwrap();
    assert_eq!(a.params(), b.params());
    assert_ne!(a.samples(), b.samples());
}

#[test]
fn exhausted_iterations_surface_as_not_converged() {
    let data = [31.0, 44.5, 29.8, 52.1, 38.0, 90.4, 35.6, 41.2];
    let err = fit_gev(&data, &FitConfig::new().with_max_iters(2)).unwrap_err();
    assert!(matches!(err, GevError::NotConverged { .. }), "{err:?}");
}

//! Shared utilities for kernel integration tests

#![allow(dead_code)]

use entmax_basis::BasisFunctions;
use entmax_core::{linspace_batch, trapz};
use entmax_kernels::{EntmaxKernel, KernelFamily};
use nalgebra::{DMatrix, DVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Grid size of the brute-force reference integrals
pub const REFERENCE_SAMPLES: usize = 1000;

pub const MU_GRID: [f64; 3] = [-2.0, 0.0, 3.0];
pub const SIGMA_SQ_GRID: [f64; 3] = [0.5, 1.0, 4.0];

/// Route library logs to the test harness; set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn vector(values: &[f64]) -> DVector<f64> {
    DVector::from_vec(values.to_vec())
}

/// Every `(mu, sigma_sq)` pair of the test grid, flattened into one batch
pub fn parameter_grid() -> (DVector<f64>, DVector<f64>) {
    let mut mu = Vec::new();
    let mut sigma_sq = Vec::new();
    for &m in &MU_GRID {
        for &s in &SIGMA_SQ_GRID {
            mu.push(m);
            sigma_sq.push(s);
        }
    }
    (DVector::from_vec(mu), DVector::from_vec(sigma_sq))
}

/// Seeded random batch of `(mu, sigma_sq)`
pub fn random_parameters(seed: u64, batch: usize) -> (DVector<f64>, DVector<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mu = DVector::from_fn(batch, |_, _| rng.gen_range(-3.0..3.0));
    let sigma_sq = DVector::from_fn(batch, |_, _| rng.gen_range(0.3..4.0));
    (mu, sigma_sq)
}

/// The four families parameterized by `sigma_sq`
pub fn sigma_families() -> Vec<KernelFamily> {
    vec![
        KernelFamily::Gaussian,
        KernelFamily::Sparsemax,
        KernelFamily::Biweight,
        KernelFamily::Triweight,
    ]
}

pub fn kernel(family: KernelFamily, mu: &DVector<f64>, sigma_sq: &DVector<f64>) -> EntmaxKernel {
    EntmaxKernel::new(family)
        .unwrap()
        .with_parameters(mu, Some(sigma_sq), None)
        .unwrap()
}

/// Integration window: the support, or `μ ± 12σ` for the Gaussian
pub fn window(kernel: &EntmaxKernel) -> (DVector<f64>, DVector<f64>) {
    let params = kernel.parameters().unwrap();
    if kernel.family() == KernelFamily::Gaussian {
        let half = params.sigma_sq().unwrap().map(|s| 12.0 * s.sqrt());
        (params.mu() - &half, params.mu() + &half)
    } else {
        params.support()
    }
}

/// Brute-force `∫ p(t) t^power ψ(t) dt` on `REFERENCE_SAMPLES` points.
pub fn reference_expectation<B: BasisFunctions>(
    kernel: &EntmaxKernel,
    power: i32,
    psi: &B,
) -> DMatrix<f64> {
    let (lo, hi) = window(kernel);
    let grid = linspace_batch(&lo, &hi, REFERENCE_SAMPLES).unwrap();
    let density = kernel.pdf(&grid).unwrap();
    let mut result = DMatrix::zeros(grid.ncols(), psi.len());
    for b in 0..grid.ncols() {
        let points: Vec<f64> = grid.column(b).iter().copied().collect();
        let values = psi.evaluate(&points);
        for j in 0..psi.len() {
            let integrand: Vec<f64> = (0..points.len())
                .map(|i| density[(i, b)] * points[i].powi(power) * values[(i, j)])
                .collect();
            result[(b, j)] = trapz(integrand.iter(), points.iter());
        }
    }
    result
}

/// Brute-force `∫ p(t) t^power dt`
pub fn reference_moment(kernel: &EntmaxKernel, power: i32) -> DVector<f64> {
    let (lo, hi) = window(kernel);
    let grid = linspace_batch(&lo, &hi, REFERENCE_SAMPLES).unwrap();
    let density = kernel.pdf(&grid).unwrap();
    DVector::from_fn(grid.ncols(), |b, _| {
        let integrand: Vec<f64> = (0..grid.nrows())
            .map(|i| density[(i, b)] * grid[(i, b)].powi(power))
            .collect();
        trapz(integrand.iter(), grid.column(b).iter())
    })
}

/// Assert every entry of two equally shaped matrices agrees.
pub fn assert_matrices_close(actual: &DMatrix<f64>, expected: &DMatrix<f64>, tolerance: f64, context: &str) {
    assert_eq!(actual.shape(), expected.shape(), "{context}: shape mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let scale = e.abs().max(1.0);
        assert!(
            (a - e).abs() <= tolerance * scale,
            "{context}: entry {i} is {a}, expected {e}"
        );
    }
}

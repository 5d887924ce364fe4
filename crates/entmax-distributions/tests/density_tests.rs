//! Numeric checks of mass, mean and variance for every distribution

use approx::assert_relative_eq;
use entmax_core::{linspace_batch, trapz_columns};
use entmax_distributions::{EntmaxDensity, EntmaxGaussian1D, Gaussian1D, Uniform1D};
use nalgebra::{DMatrix, DVector};
use proptest::prelude::*;

const SAMPLES: usize = 4000;

/// Mass, mean and variance of a density by trapezoid integration over `[lo, hi]`.
fn numeric_moments(dist: &dyn EntmaxDensity, lo: &DVector<f64>, hi: &DVector<f64>) -> (DVector<f64>, DVector<f64>, DVector<f64>) {
    let grid = linspace_batch(lo, hi, SAMPLES).unwrap();
    let density = dist.pdf(&grid).unwrap();
    let mass = trapz_columns(&density, &grid).unwrap();
    let first = trapz_columns(&density.component_mul(&grid), &grid).unwrap();
    let second = trapz_columns(&density.component_mul(&grid.map(|t| t * t)), &grid).unwrap();
    let variance = DVector::from_fn(mass.len(), |b, _| second[b] - first[b] * first[b]);
    (mass, first, variance)
}

fn support_bounds(dist: &dyn EntmaxDensity) -> (DVector<f64>, DVector<f64>) {
    let mu = dist.mu().unwrap().clone();
    let half = dist.support_size().unwrap() / 2.0;
    (&mu - &half, &mu + &half)
}

#[test]
fn test_named_families_have_unit_mass() {
    let mu = DVector::from_vec(vec![-2.0, 0.0, 3.0]);
    let sigma_sq = DVector::from_vec(vec![0.5, 1.0, 4.0]);

    let families: Vec<Box<dyn EntmaxDensity>> = vec![
        Box::new(EntmaxGaussian1D::sparsemax()),
        Box::new(EntmaxGaussian1D::biweight()),
        Box::new(EntmaxGaussian1D::triweight()),
    ];
    for mut dist in families {
        dist.set_parameters(&mu, Some(&sigma_sq), None).unwrap();
        let (lo, hi) = support_bounds(dist.as_ref());
        let (mass, mean, variance) = numeric_moments(dist.as_ref(), &lo, &hi);
        let exact_variance = dist.variance().unwrap();
        for b in 0..3 {
            assert_relative_eq!(mass[b], 1.0, epsilon = 1e-4);
            assert_relative_eq!(mean[b], mu[b], epsilon = 1e-4);
            assert_relative_eq!(variance[b], exact_variance[b], epsilon = 1e-3);
        }
    }
}

#[test]
fn test_gaussian_mass_on_wide_window() {
    let mut dist = Gaussian1D::new();
    let mu = DVector::from_vec(vec![1.0]);
    dist.set_parameters(&mu, Some(&DVector::from_vec(vec![0.5])), None)
        .unwrap();
    let (mass, mean, variance) = numeric_moments(
        &dist,
        &DVector::from_vec(vec![-9.0]),
        &DVector::from_vec(vec![11.0]),
    );
    assert_relative_eq!(mass[0], 1.0, epsilon = 1e-8);
    assert_relative_eq!(mean[0], 1.0, epsilon = 1e-8);
    assert_relative_eq!(variance[0], 0.5, epsilon = 1e-6);
}

#[test]
fn test_uniform_mass() {
    let mut dist = Uniform1D::new();
    let mu = DVector::from_vec(vec![0.0]);
    dist.set_parameters(&mu, None, Some(&DVector::from_vec(vec![2.0])))
        .unwrap();
    let grid = DMatrix::from_fn(101, 1, |i, _| -1.0 + 2.0 * i as f64 / 100.0);
    let mass = trapz_columns(&dist.pdf(&grid).unwrap(), &grid).unwrap();
    assert_relative_eq!(mass[0], 1.0, epsilon = 1e-12);
}

proptest! {
    #[test]
    fn prop_entmax_unit_mass(
        alpha in 1.2f64..2.5,
        mu in -3.0f64..3.0,
        sigma_sq in 0.3f64..5.0,
    ) {
        let mut dist = EntmaxGaussian1D::new(alpha).unwrap();
        dist.set_parameters(
            &DVector::from_vec(vec![mu]),
            Some(&DVector::from_vec(vec![sigma_sq])),
            None,
        ).unwrap();
        let (lo, hi) = support_bounds(&dist);
        let (mass, _, _) = numeric_moments(&dist, &lo, &hi);
        prop_assert!((mass[0] - 1.0).abs() < 1e-3, "mass {} for alpha {}", mass[0], alpha);
    }
}

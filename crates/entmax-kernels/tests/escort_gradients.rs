//! Escort construction and attention gradients

mod common;

use approx::assert_relative_eq;
use common::*;
use entmax_basis::{GaussianBasis, PowerBasis};
use entmax_core::Error;
use entmax_kernels::{EntmaxKernel, Escort, KernelFamily};

#[test]
fn test_escort_recursion_terminates() {
    init_tracing();
    let mu = vector(&[0.0, 1.0]);
    let sigma_sq = vector(&[1.0, 0.5]);

    for family in [KernelFamily::Sparsemax, KernelFamily::Biweight, KernelFamily::Triweight] {
        let kernel = kernel(family, &mu, &sigma_sq);
        let escort = kernel.escort().expect("escort is built by with_parameters");
        assert_eq!(Some(escort.family()), match family.escort_rule().unwrap() {
            entmax_kernels::EscortRule::Family(expected) => Some(expected),
            _ => None,
        });
        assert!(escort.escort().is_none(), "{family}: escort of escort");
        assert_relative_eq!(escort.mean().unwrap(), mu.clone());
        assert_relative_eq!(
            escort.support_size().unwrap(),
            kernel.support_size().unwrap(),
            epsilon = 1e-10
        );
    }

    let uniform = EntmaxKernel::uniform()
        .with_parameters(&mu, None, Some(&sigma_sq))
        .unwrap();
    assert!(uniform.escort().is_none());
}

#[test]
fn test_gaussian_escort_is_self() {
    let kernel = kernel(KernelFamily::Gaussian, &vector(&[0.5]), &vector(&[2.0]));
    let escort = kernel.escort().unwrap();
    assert!(std::ptr::eq(escort, &kernel));
    assert!(std::ptr::eq(escort.escort().unwrap(), &kernel));
    assert!(matches!(kernel.build_escort().unwrap(), Escort::SelfDual));
}

#[test]
fn test_generic_escort_chain() {
    let kernel = kernel(KernelFamily::entmax(1.25).unwrap(), &vector(&[0.0]), &vector(&[1.0]));
    let escort = kernel.escort().unwrap();
    match escort.family() {
        KernelFamily::Entmax(alpha) => assert_relative_eq!(alpha, 1.0 / 0.75, epsilon = 1e-12),
        other => panic!("unexpected escort family {other}"),
    }
    assert!(escort.escort().is_none());

    // alpha = 2 is the uniform limit
    let kernel = kernel_for_alpha(2.0);
    assert_eq!(kernel.escort().unwrap().family(), KernelFamily::Uniform);
}

fn kernel_for_alpha(alpha: f64) -> EntmaxKernel {
    kernel(KernelFamily::entmax(alpha).unwrap(), &vector(&[0.0]), &vector(&[1.0]))
}

#[test]
fn test_alpha_above_two_has_no_escort() {
    let mut kernel = EntmaxKernel::entmax(2.5).unwrap();
    let mu = vector(&[0.0]);
    let sigma_sq = vector(&[1.0]);
    assert!(matches!(
        kernel.set_parameters(&mu, Some(&sigma_sq), None, true),
        Err(Error::DegenerateParameter(_))
    ));

    // Attention itself does not need the escort
    kernel.set_parameters(&mu, Some(&sigma_sq), None, false).unwrap();
    let mass = kernel.attention(&PowerBasis::constant()).unwrap()[(0, 0)];
    assert!((mass - 1.0).abs() < 1e-3);
    assert!(matches!(
        kernel.attention_gradient(&PowerBasis::constant()),
        Err(Error::DegenerateParameter(_))
    ));
}

#[test]
fn test_gradient_shape() {
    let mu = vector(&[-1.0, 0.0, 0.5, 2.0]);
    let sigma_sq = vector(&[0.5, 1.0, 2.0, 4.0]);
    let psi = GaussianBasis::evenly_spaced(3, -2.0, 2.0, 0.5).unwrap();

    for family in sigma_families() {
        let (g1, g2) = kernel(family, &mu, &sigma_sq).attention_gradient(&psi).unwrap();
        assert_eq!(g1.shape(), (4, 3), "{family}");
        assert_eq!(g2.shape(), (4, 3), "{family}");
    }
}

/// With `ψ(t) = t` the attention is the mean `μ = -θ1/(2θ2)`, so the
/// gradient is `(σ², 2μσ²)` for every family.
#[test]
fn test_gradient_of_identity_basis() {
    let (mu, sigma_sq) = parameter_grid();
    let identity = PowerBasis::new(vec![1]).unwrap();

    let mut families = sigma_families();
    families.push(KernelFamily::entmax(1.5).unwrap());
    for family in families {
        let (g1, g2) = kernel(family, &mu, &sigma_sq).attention_gradient(&identity).unwrap();
        for b in 0..mu.len() {
            let expected_g2 = 2.0 * mu[b] * sigma_sq[b];
            assert_relative_eq!(g1[(b, 0)], sigma_sq[b], epsilon = 1e-3, max_relative = 1e-3);
            assert_relative_eq!(g2[(b, 0)], expected_g2, epsilon = 1e-3, max_relative = 1e-3);
        }
    }
}

#[test]
fn test_closed_form_gradient_matches_numeric_path() {
    let (mu, sigma_sq) = random_parameters(11, 4);
    let psi = GaussianBasis::evenly_spaced(3, -2.0, 2.0, 0.7).unwrap();

    for (named, alpha) in [
        (KernelFamily::Sparsemax, 2.0),
        (KernelFamily::Biweight, 1.5),
        (KernelFamily::Triweight, 4.0 / 3.0),
    ] {
        let (c1, c2) = kernel(named, &mu, &sigma_sq).attention_gradient(&psi).unwrap();
        let (n1, n2) = kernel(KernelFamily::entmax(alpha).unwrap(), &mu, &sigma_sq)
            .attention_gradient(&psi)
            .unwrap();
        assert_matrices_close(&n1, &c1, 1e-3, &format!("{named} g1"));
        assert_matrices_close(&n2, &c2, 1e-3, &format!("{named} g2"));
    }
}

#[test]
fn test_gradient_matches_finite_differences() {
    // Attention as a function of the natural parameters (θ1, θ2)
    let psi = GaussianBasis::evenly_spaced(2, -1.0, 1.0, 0.6).unwrap();
    let attention = |family: KernelFamily, theta1: f64, theta2: f64| {
        let sigma_sq = -1.0 / (2.0 * theta2);
        let mu = theta1 * sigma_sq;
        kernel(family, &vector(&[mu]), &vector(&[sigma_sq]))
            .attention(&psi)
            .unwrap()
    };

    let (mu, sigma_sq) = (0.4, 0.8);
    let (theta1, theta2) = (mu / sigma_sq, -1.0 / (2.0 * sigma_sq));
    let h = 1e-5;
    for family in sigma_families() {
        let (g1, g2) = kernel(family, &vector(&[mu]), &vector(&[sigma_sq]))
            .attention_gradient(&psi)
            .unwrap();
        let d1 = (attention(family, theta1 + h, theta2) - attention(family, theta1 - h, theta2)) / (2.0 * h);
        let d2 = (attention(family, theta1, theta2 + h) - attention(family, theta1, theta2 - h)) / (2.0 * h);
        assert_matrices_close(&g1, &d1, 1e-5, &format!("{family} d/dθ1"));
        assert_matrices_close(&g2, &d2, 1e-5, &format!("{family} d/dθ2"));
    }
}

#[test]
fn test_gradient_normalizers() {
    let sigma_sq = vector(&[1.0]);
    let sparse = kernel(KernelFamily::Sparsemax, &vector(&[0.0]), &sigma_sq);
    assert_relative_eq!(
        sparse.escort_normalizer().unwrap(),
        sparse.support_size().unwrap(),
        epsilon = 1e-12
    );

    // ‖p‖_β^β is the mass of the unnormalized escort density
    for family in [KernelFamily::Biweight, KernelFamily::Triweight] {
        let kernel = kernel(family, &vector(&[0.0]), &sigma_sq);
        let numeric = entmax_kernels::numeric::escort_normalizer(
            kernel.parameters().unwrap(),
            family.alpha(),
            family.escort_alpha().unwrap(),
            kernel.config(),
        )
        .unwrap();
        assert_relative_eq!(kernel.escort_normalizer().unwrap(), numeric, max_relative = 1e-5);
    }

    let uniform = EntmaxKernel::uniform()
        .with_parameters(&vector(&[0.0]), None, Some(&vector(&[1.0])))
        .unwrap();
    assert!(matches!(
        uniform.escort_normalizer(),
        Err(Error::UnsupportedOperation { .. })
    ));
}

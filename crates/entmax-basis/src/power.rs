//! Monomial basis functions `ψ_j(t) = t^{p_j}`

use crate::traits::{check_moment_args, BasisFunctions};
use entmax_core::{math::normal, Error, Result};
use nalgebra::{DMatrix, DVector};

/// Monomials with fixed exponents.
///
/// `PowerBasis::constant()` is the basis `ψ ≡ 1` whose interval integral is
/// `v - u`; it is how unit mass of a kernel is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerBasis {
    powers: Vec<usize>,
}

impl PowerBasis {
    /// Create a basis from a list of exponents
    pub fn new(powers: Vec<usize>) -> Result<Self> {
        if powers.is_empty() {
            return Err(Error::InvalidParameter(
                "PowerBasis needs at least one exponent".to_string(),
            ));
        }
        Ok(Self { powers })
    }

    /// `ψ(t) = 1`
    pub fn constant() -> Self {
        Self { powers: vec![0] }
    }

    /// `ψ(t) = t²`
    pub fn identity_squared() -> Self {
        Self { powers: vec![2] }
    }

    /// `ψ_j(t) = t^j` for `j = 0..=degree`
    pub fn polynomial(degree: usize) -> Self {
        Self {
            powers: (0..=degree).collect(),
        }
    }

    /// The exponents, in column order
    pub fn powers(&self) -> &[usize] {
        &self.powers
    }
}

impl BasisFunctions for PowerBasis {
    fn len(&self) -> usize {
        self.powers.len()
    }

    fn name(&self) -> &'static str {
        "power"
    }

    fn evaluate(&self, points: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(points.len(), self.powers.len(), |i, j| {
            points[i].powi(self.powers[j] as i32)
        })
    }

    fn integrate_t_pow_times_psi(
        &self,
        power: usize,
        u: &DVector<f64>,
        v: &DVector<f64>,
    ) -> Result<DMatrix<f64>> {
        check_moment_args(self.name(), power, u, v)?;
        Ok(DMatrix::from_fn(u.len(), self.powers.len(), |b, j| {
            let m = (power + self.powers[j] + 1) as i32;
            (v[b].powi(m) - u[b].powi(m)) / m as f64
        }))
    }

    fn integrate_t_pow_times_psi_gaussian(
        &self,
        power: usize,
        mu: &DVector<f64>,
        sigma_sq: &DVector<f64>,
    ) -> Result<DMatrix<f64>> {
        check_moment_args(self.name(), power, mu, sigma_sq)?;
        let max_power = power + self.powers.iter().copied().max().unwrap_or(0);
        let mut out = DMatrix::zeros(mu.len(), self.powers.len());
        for b in 0..mu.len() {
            let moments = normal::raw_moments(max_power, mu[b], sigma_sq[b]);
            for (j, &p) in self.powers.iter().enumerate() {
                out[(b, j)] = moments[power + p];
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_integral_is_width() {
        let basis = PowerBasis::constant();
        let u = DVector::from_vec(vec![-1.0, 2.0]);
        let v = DVector::from_vec(vec![1.0, 5.0]);
        let integral = basis.integrate_psi(&u, &v).unwrap();
        assert_eq!(integral.shape(), (2, 1));
        assert_relative_eq!(integral[(0, 0)], 2.0);
        assert_relative_eq!(integral[(1, 0)], 3.0);
    }

    #[test]
    fn test_moment_shifts_exponent() {
        let basis = PowerBasis::polynomial(2);
        let u = DVector::from_vec(vec![0.0]);
        let v = DVector::from_vec(vec![2.0]);
        // ∫_0^2 t^3 * t^j dt
        let integral = basis.integrate_t3_times_psi(&u, &v).unwrap();
        assert_relative_eq!(integral[(0, 0)], 4.0);
        assert_relative_eq!(integral[(0, 1)], 32.0 / 5.0);
        assert_relative_eq!(integral[(0, 2)], 64.0 / 6.0);
    }

    #[test]
    fn test_gaussian_weighted_moments() {
        let basis = PowerBasis::new(vec![0, 1, 2]).unwrap();
        let mu = DVector::from_vec(vec![1.5]);
        let sigma_sq = DVector::from_vec(vec![0.25]);

        let e = basis.integrate_psi_gaussian(&mu, &sigma_sq).unwrap();
        assert_relative_eq!(e[(0, 0)], 1.0);
        assert_relative_eq!(e[(0, 1)], 1.5);
        assert_relative_eq!(e[(0, 2)], 0.25 + 2.25);

        let et = basis.integrate_t_times_psi_gaussian(&mu, &sigma_sq).unwrap();
        assert_relative_eq!(et[(0, 0)], 1.5);
        assert_relative_eq!(et[(0, 1)], 2.5);
    }

    #[test]
    fn test_evaluate_shape() {
        let basis = PowerBasis::polynomial(3);
        let values = basis.evaluate(&[2.0, -1.0]);
        assert_eq!(values.shape(), (2, 4));
        assert_relative_eq!(values[(0, 3)], 8.0);
        assert_relative_eq!(values[(1, 3)], -1.0);
    }

    #[test]
    fn test_power_beyond_menu_is_unsupported() {
        let basis = PowerBasis::constant();
        let u = DVector::from_vec(vec![0.0]);
        let v = DVector::from_vec(vec![1.0]);
        let err = basis.integrate_t_pow_times_psi(7, &u, &v).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_rejects_empty_and_mismatched() {
        assert!(PowerBasis::new(vec![]).is_err());

        let basis = PowerBasis::constant();
        let u = DVector::from_vec(vec![0.0, 1.0]);
        let v = DVector::from_vec(vec![1.0]);
        assert!(basis.integrate_psi(&u, &v).is_err());
    }
}

//! Batched evenly spaced grids and trapezoidal integration
//!
//! Grids are laid out as `steps x B` matrices: column `b` holds the sample
//! points for batch element `b`. Every batch column is processed
//! independently and results keep the batch order.

use crate::{Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evenly spaced points between batched endpoints, both included.
///
/// Returns a `steps x B` matrix whose row `i`, column `b` is
/// `(1 - s) * start[b] + s * end[b]` with `s = i / (steps - 1)`.
pub fn linspace_batch(start: &DVector<f64>, end: &DVector<f64>, steps: usize) -> Result<DMatrix<f64>> {
    if start.len() != end.len() {
        return Err(Error::size_mismatch(start.len(), end.len(), "linspace_batch endpoints"));
    }
    if steps < 2 {
        return Err(Error::InvalidParameter(format!(
            "linspace_batch needs at least 2 steps, got {steps}"
        )));
    }

    let last = (steps - 1) as f64;
    Ok(DMatrix::from_fn(steps, start.len(), |i, b| {
        let s = i as f64 / last;
        (1.0 - s) * start[b] + s * end[b]
    }))
}

/// Trapezoid rule over paired samples `(x_i, y_i)`.
pub fn trapz<'a, Y, X>(y: Y, x: X) -> f64
where
    Y: IntoIterator<Item = &'a f64>,
    X: IntoIterator<Item = &'a f64>,
{
    let mut total = 0.0;
    let mut prev: Option<(f64, f64)> = None;
    for (&yi, &xi) in y.into_iter().zip(x) {
        if let Some((yp, xp)) = prev {
            total += 0.5 * (xi - xp) * (yi + yp);
        }
        prev = Some((yi, xi));
    }
    total
}

/// Column-wise trapezoid rule: integrates `values[:, b]` against `grid[:, b]`.
pub fn trapz_columns(values: &DMatrix<f64>, grid: &DMatrix<f64>) -> Result<DVector<f64>> {
    if values.shape() != grid.shape() {
        return Err(Error::InvalidInput(format!(
            "trapz_columns shape mismatch: values {:?}, grid {:?}",
            values.shape(),
            grid.shape()
        )));
    }

    let totals = map_batch(values.ncols(), |b| {
        Ok(trapz(values.column(b).iter(), grid.column(b).iter()))
    })?;
    let totals = DVector::from_vec(totals);
    ensure_finite(totals.iter(), "trapezoidal integral")?;
    Ok(totals)
}

/// Run `f` for every batch index and collect the results in batch order.
///
/// With the `parallel` feature the batch elements are spread over the rayon
/// pool; results are identical either way.
pub fn map_batch<T, F>(batch: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Send + Sync,
{
    trace!(batch, "map_batch");
    #[cfg(feature = "parallel")]
    {
        (0..batch).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..batch).map(f).collect()
    }
}

/// Fail with `NumericInstability` if any value is NaN or infinite.
pub fn ensure_finite<'a, I>(values: I, context: &str) -> Result<()>
where
    I: IntoIterator<Item = &'a f64>,
{
    if values.into_iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite(context));
    }
    Ok(())
}

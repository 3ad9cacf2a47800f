//! Time correlation functions of scalar series.
//!
//! `C(t) = <dx(tau) dy(tau + t)>_tau` with `dx = x - <x>`, computed through
//! the Wiener-Khinchin relation on series zero-padded to twice their length.

use lmp_core::error::{LmpError, LmpResult};
use lmp_core::stats::mean;

use crate::fft::PaddedFft;

pub(crate) fn check_pair(x: &[f64], y: &[f64]) -> LmpResult<()> {
    if x.len() < 2 {
        return Err(LmpError::InsufficientData(format!(
            "correlation needs at least 2 samples, got {}",
            x.len()
        )));
    }
    if y.len() != x.len() {
        return Err(LmpError::Mismatch(format!(
            "correlated series have lengths {} and {}",
            x.len(),
            y.len()
        )));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(LmpError::Invalid("series contains non-finite values".into()));
    }
    Ok(())
}

/// FFT estimate of `C(t)` for `t = 0..n`.
///
/// Lag `t` holds `sum_{tau < n - t} dx(tau) dy(tau + t) / n`, so `C(0)` is the
/// population (co)variance. `y = None` gives the autocorrelation of `x`.
pub fn time_correlation(x: &[f64], y: Option<&[f64]>) -> LmpResult<Vec<f64>> {
    let y_series = y.unwrap_or(x);
    check_pair(x, y_series)?;
    let n = x.len();
    let fft = PaddedFft::new(2 * n);
    let fx = fft.forward(x, mean(x)?);
    let fy = match y {
        Some(y) => fft.forward(y, mean(y)?),
        None => fx.clone(),
    };
    let inv_n = 1.0 / n as f64;
    let fxy = fx
        .iter()
        .zip(&fy)
        .map(|(a, b)| a.conj() * b * inv_n)
        .collect();
    Ok(fft.inverse_real(fxy, n))
}

/// Rescales the FFT estimate so lag `t` is averaged over its `n - t` origins.
pub fn lag_normalize(correlation: &[f64]) -> Vec<f64> {
    let n = correlation.len() as f64;
    correlation
        .iter()
        .enumerate()
        .map(|(t, c)| c * n / (n - t as f64))
        .collect()
}

/// Direct `O(n^2)` lag average, `mean_{tau < n - t} dx(tau) dy(tau + t)`.
pub fn direct_correlation(x: &[f64], y: Option<&[f64]>) -> LmpResult<Vec<f64>> {
    let y = y.unwrap_or(x);
    check_pair(x, y)?;
    let n = x.len();
    let mx = mean(x)?;
    let my = mean(y)?;
    let out = (0..n)
        .map(|t| {
            let count = n - t;
            let sum: f64 = (0..count).map(|tau| (x[tau] - mx) * (y[tau + t] - my)).sum();
            sum / count as f64
        })
        .collect();
    Ok(out)
}

/// `C(t) / C(0)` of the autocorrelation.
pub fn normalized_autocorrelation(x: &[f64]) -> LmpResult<Vec<f64>> {
    let c = time_correlation(x, None)?;
    let c0 = c[0];
    if c0 <= 0.0 {
        return Err(LmpError::Invalid(
            "cannot normalise the correlation of a constant series".into(),
        ));
    }
    Ok(c.iter().map(|v| v / c0).collect())
}

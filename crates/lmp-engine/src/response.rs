//! Frequency-dependent response from equilibrium fluctuations.
//!
//! `mu(omega) = A * integral_0^inf dC/dt exp(-i omega t) dt`, evaluated as the
//! zero-padded FFT of the discrete gradient of the correlation function.

use rustfft::num_complex::Complex;

use lmp_core::error::{LmpError, LmpResult};

use crate::correlation::time_correlation;
use crate::fft::PaddedFft;

#[derive(Debug, Clone)]
pub struct Response {
    /// Angular frequencies `2 pi k / (dt n)`.
    pub omega: Vec<f64>,
    pub mu: Vec<Complex<f64>>,
}

/// Discrete derivative with unit spacing: central differences inside,
/// one-sided differences at both ends.
pub fn gradient(f: &[f64]) -> LmpResult<Vec<f64>> {
    let n = f.len();
    if n < 2 {
        return Err(LmpError::InsufficientData(format!(
            "gradient needs at least 2 samples, got {n}"
        )));
    }
    let mut out = vec![0.0f64; n];
    out[0] = f[1] - f[0];
    out[n - 1] = f[n - 1] - f[n - 2];
    for i in 1..n - 1 {
        out[i] = 0.5 * (f[i + 1] - f[i - 1]);
    }
    Ok(out)
}

/// Prefactor `-1 / (k_B T^2)` turning energy fluctuations into a heat capacity.
pub fn heat_capacity_prefactor(temperature: f64, boltzmann: f64) -> LmpResult<f64> {
    if !(temperature > 0.0) || !(boltzmann > 0.0) {
        return Err(LmpError::Invalid(format!(
            "temperature and k_B must be positive (T={temperature}, k_B={boltzmann})"
        )));
    }
    Ok(-1.0 / (boltzmann * temperature * temperature))
}

/// Response of `y` to a field conjugate to `x` (`y = None` uses `x`).
///
/// `dt` is the sampling interval of the series and only sets the frequency
/// axis. The caller supplies the physical `prefactor`.
pub fn frequency_dependent_response(
    x: &[f64],
    y: Option<&[f64]>,
    dt: f64,
    prefactor: f64,
) -> LmpResult<Response> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(LmpError::Invalid(format!(
            "sample interval must be positive, got {dt}"
        )));
    }
    let c = time_correlation(x, y)?;
    let dc = gradient(&c)?;
    let n = x.len();
    let fft = PaddedFft::new(2 * n);
    let spectrum = fft.forward(&dc, 0.0);
    let mu = spectrum.into_iter().take(n).map(|v| v * prefactor).collect();
    let omega = (0..n)
        .map(|k| 2.0 * std::f64::consts::PI * k as f64 / (dt * n as f64))
        .collect();
    Ok(Response { omega, mu })
}

use lmp_core::error::{LmpError, LmpResult};

const PLANCK: f64 = 6.626_070_15e-34;
/// Speed of light in cm/s.
const LIGHT_SPEED_CM: f64 = 2.998e10;
const BOLTZMANN: f64 = 1.380_649e-23;

/// Characteristic vibrational temperature `h c nu / k_B` of a wavenumber in
/// 1/cm.
pub fn wavenumber_to_kelvin(wavenumber: f64) -> f64 {
    PLANCK * LIGHT_SPEED_CM * wavenumber / BOLTZMANN
}

/// Entropy-like contribution `x / (e^x - 1) - ln(1 - e^-x)` of one harmonic
/// mode with `x = theta / T`.
pub fn mode_contribution(theta: f64, temperature: f64) -> LmpResult<f64> {
    if !(temperature > 0.0) {
        return Err(LmpError::Invalid(format!(
            "temperature must be positive, got {temperature}"
        )));
    }
    if !(theta > 0.0) {
        return Err(LmpError::Invalid(format!(
            "vibrational temperature must be positive, got {theta}"
        )));
    }
    let x = theta / temperature;
    Ok(x / x.exp_m1() - (-(-x).exp()).ln_1p())
}

/// Sum of [`mode_contribution`] over wavenumbers given in 1/cm.
pub fn vibrational_partition_sum(wavenumbers: &[f64], temperature: f64) -> LmpResult<f64> {
    let mut sum = 0.0;
    for &nu in wavenumbers {
        sum += mode_contribution(wavenumber_to_kelvin(nu), temperature)?;
    }
    Ok(sum)
}

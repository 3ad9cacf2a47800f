use lmp_core::error::{LmpError, LmpResult};
use lmp_core::stats::mean;

/// Einstein-relation estimate `D = <MSD> / <t> / (2 d)` over the first half
/// of the series.
///
/// Both averages run over indices `0..len / 2`. The estimate is only
/// meaningful when that window is already in the linear, diffusive regime.
pub fn diffusion_coefficient(msd: &[f64], time: &[f64], dimensions: usize) -> LmpResult<f64> {
    if msd.len() != time.len() {
        return Err(LmpError::Mismatch(format!(
            "{} msd values for {} times",
            msd.len(),
            time.len()
        )));
    }
    if msd.len() < 2 {
        return Err(LmpError::InsufficientData(format!(
            "diffusion estimate needs at least 2 samples, got {}",
            msd.len()
        )));
    }
    if dimensions == 0 {
        return Err(LmpError::Invalid("dimensionality must be at least 1".into()));
    }
    let half = msd.len() / 2;
    let mean_time = mean(&time[..half])?;
    if mean_time == 0.0 || !mean_time.is_finite() {
        return Err(LmpError::Invalid(format!(
            "mean elapsed time over the first {half} samples is {mean_time}"
        )));
    }
    let mean_msd = mean(&msd[..half])?;
    Ok(mean_msd / mean_time / (2 * dimensions) as f64)
}

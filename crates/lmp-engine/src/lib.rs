pub mod averaging;
pub mod correlation;
pub mod diffusion;
mod fft;
pub mod fluctuation;
pub mod msd;
pub mod partition;
pub mod peaks;
pub mod response;

pub use rustfft::num_complex::Complex;

pub use averaging::{block_average, boxcar, log_average};
pub use correlation::{
    direct_correlation, lag_normalize, normalized_autocorrelation, time_correlation,
};
pub use diffusion::diffusion_coefficient;
pub use fluctuation::{fluctuation_properties, ThermoSummary, UnitSystem};
pub use msd::{frame_times, mean_squared_displacement, remove_drift, windowed_msd};
pub use partition::{mode_contribution, vibrational_partition_sum, wavenumber_to_kelvin};
pub use peaks::find_peaks;
pub use response::{
    frequency_dependent_response, gradient, heat_capacity_prefactor, Response,
};

#[cfg(test)]
mod tests;

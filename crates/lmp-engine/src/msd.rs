use lmp_core::centers::center_of_geometry;
use lmp_core::error::{LmpError, LmpResult};
use lmp_core::frame::Trajectory;
use lmp_core::geom::Vec3;

use crate::fft::lagged_product_sums;

/// Positions relative to each frame's geometric center.
pub fn remove_drift(traj: &Trajectory) -> Vec<Vec<Vec3>> {
    traj.frames
        .iter()
        .map(|frame| {
            let center = center_of_geometry(&frame.positions);
            frame.positions.iter().map(|&p| p - center).collect()
        })
        .collect()
}

fn check_traj(traj: &Trajectory) -> LmpResult<()> {
    if traj.is_empty() || traj.n_atoms == 0 {
        return Err(LmpError::InsufficientData(
            "trajectory has no frames or no atoms".into(),
        ));
    }
    Ok(())
}

/// Drift-corrected displacement from `reference_frame`, averaged over atoms
/// and over the three dimensions, for every frame.
pub fn mean_squared_displacement(traj: &Trajectory, reference_frame: usize) -> LmpResult<Vec<f64>> {
    check_traj(traj)?;
    if reference_frame >= traj.n_frames() {
        return Err(LmpError::Invalid(format!(
            "reference frame {reference_frame} outside trajectory of {} frames",
            traj.n_frames()
        )));
    }
    let frames = remove_drift(traj);
    let reference = &frames[reference_frame];
    let norm = 1.0 / (3.0 * traj.n_atoms as f64);
    let msd = frames
        .iter()
        .map(|positions| {
            let sum: f64 = reference
                .iter()
                .zip(positions)
                .map(|(&r, &p)| (r - p).norm2())
                .sum();
            sum * norm
        })
        .collect();
    Ok(msd)
}

/// Squared displacement of one coordinate averaged over all time origins,
/// `[0, msd(1), .., msd(n - 1)]`.
fn windowed_series(series: &[f64]) -> Vec<f64> {
    let n = series.len();
    let mut r2 = vec![0.0f64; n + 1];
    for i in 0..n {
        r2[i + 1] = r2[i] + series[i] * series[i];
    }
    let ac = lagged_product_sums(series, series);
    let mut msd = vec![0.0f64; n];
    for lag in 1..n {
        let count = (n - lag) as f64;
        let sum1 = r2[n - lag];
        let sum2 = r2[n] - r2[lag];
        msd[lag] = (sum1 + sum2 - 2.0 * ac[lag]) / count;
    }
    msd
}

/// Drift-corrected MSD as a function of lag, averaged over every time origin,
/// every atom and the three dimensions. Index `m` holds lag `m` frames.
pub fn windowed_msd(traj: &Trajectory) -> LmpResult<Vec<f64>> {
    check_traj(traj)?;
    let n_frames = traj.n_frames();
    if n_frames < 2 {
        return Err(LmpError::InsufficientData(
            "windowed msd needs at least 2 frames".into(),
        ));
    }
    let frames = remove_drift(traj);
    let mut acc = vec![0.0f64; n_frames];
    let mut coord = vec![0.0f64; n_frames];
    for atom in 0..traj.n_atoms {
        for dim in 0..3 {
            for (t, positions) in frames.iter().enumerate() {
                coord[t] = positions[atom].to_array()[dim];
            }
            for (a, v) in acc.iter_mut().zip(windowed_series(&coord)) {
                *a += v;
            }
        }
    }
    let norm = 1.0 / (3.0 * traj.n_atoms as f64);
    Ok(acc.into_iter().map(|v| v * norm).collect())
}

/// Elapsed time of each frame for a constant dump interval.
pub fn frame_times(n_frames: usize, interval: f64) -> Vec<f64> {
    (0..n_frames).map(|i| i as f64 * interval).collect()
}

//! Operations behind the subcommands, on already parsed inputs.

use lmp_core::stats::{describe, variance};
use lmp_core::{LabelledTable, ThermoTable, Trajectory};
use lmp_engine::{
    diffusion_coefficient, find_peaks, fluctuation_properties, frame_times,
    frequency_dependent_response, log_average, mean_squared_displacement,
    normalized_autocorrelation, time_correlation, windowed_msd, Response, ThermoSummary,
    UnitSystem,
};
use lmp_io::Spectrum;

use crate::error::{AnalyseError, AnalyseResult};

/// Statistic rows of [`summary_table`], in order.
pub const SUMMARY_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// One column per thermo column, one labelled row per entry of [`SUMMARY_ROWS`].
pub fn summary_table(table: &ThermoTable) -> AnalyseResult<LabelledTable> {
    let summary = describe(table)?;
    let columns = summary.iter().map(|s| s.name.clone()).collect();
    let rows = vec![
        summary.iter().map(|s| s.count as f64).collect(),
        summary.iter().map(|s| s.mean).collect(),
        summary.iter().map(|s| s.std).collect(),
        summary.iter().map(|s| s.min).collect(),
        summary.iter().map(|s| s.q25).collect(),
        summary.iter().map(|s| s.median).collect(),
        summary.iter().map(|s| s.q75).collect(),
        summary.iter().map(|s| s.max).collect(),
    ];
    let labels = SUMMARY_ROWS.iter().map(|s| s.to_string()).collect();
    Ok(LabelledTable::new(
        "",
        labels,
        ThermoTable::from_rows(columns, rows)?,
    )?)
}

/// Time between consecutive rows, from the `Time` column when present.
pub fn sample_interval(table: &ThermoTable) -> AnalyseResult<f64> {
    if table.column_index("Time").is_none() {
        return Ok(1.0);
    }
    let time = table.column("Time")?;
    match time.as_slice() {
        [t0, t1, ..] if t1 > t0 => Ok(t1 - t0),
        [_, _, ..] => Err(AnalyseError::Invalid(
            "Time column does not increase between the first two rows".into(),
        )),
        _ => Ok(1.0),
    }
}

#[derive(Clone, Debug)]
pub struct CorrelationRequest {
    pub column: String,
    /// Cross-correlate with this column instead of the autocorrelation.
    pub with: Option<String>,
    /// Divide by the zero-lag value (`sqrt(Var x Var y)` for cross terms).
    pub normalize: bool,
    pub points_per_decade: Option<f64>,
}

impl CorrelationRequest {
    pub fn auto(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            with: None,
            normalize: false,
            points_per_decade: None,
        }
    }
}

/// Lag times and correlation values for a thermo column pair.
pub fn correlation_series(
    table: &ThermoTable,
    request: &CorrelationRequest,
) -> AnalyseResult<(Vec<f64>, Vec<f64>)> {
    let x = table.column(&request.column)?;
    let c = match (&request.with, request.normalize) {
        (None, true) => normalized_autocorrelation(&x)?,
        (None, false) => time_correlation(&x, None)?,
        (Some(other), normalize) => {
            let y = table.column(other)?;
            let mut c = time_correlation(&x, Some(&y))?;
            if normalize {
                let scale = (variance(&x)? * variance(&y)?).sqrt();
                if scale == 0.0 {
                    return Err(AnalyseError::Invalid(format!(
                        "cannot normalise: '{}' or '{other}' is constant",
                        request.column
                    )));
                }
                c.iter_mut().for_each(|v| *v /= scale);
            }
            c
        }
    };
    let dt = sample_interval(table)?;
    let lag: Vec<f64> = (0..c.len()).map(|t| t as f64 * dt).collect();
    match request.points_per_decade {
        Some(ppd) => Ok((log_average(&lag, ppd, None)?, log_average(&c, ppd, None)?)),
        None => Ok((lag, c)),
    }
}

/// Frequency response of a thermo column to its conjugate field.
pub fn response_series(
    table: &ThermoTable,
    column: &str,
    dt: Option<f64>,
    prefactor: f64,
) -> AnalyseResult<Response> {
    let x = table.column(column)?;
    let dt = match dt {
        Some(dt) => dt,
        None => sample_interval(table)?,
    };
    Ok(frequency_dependent_response(&x, None, dt, prefactor)?)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MsdMode {
    /// Displacement of every frame from one reference frame.
    Reference(usize),
    /// Average over all time origins at each lag.
    Windowed,
}

#[derive(Clone, Debug)]
pub struct MsdResult {
    pub time: Vec<f64>,
    pub msd: Vec<f64>,
    pub diffusion: f64,
}

pub fn msd_series(traj: &Trajectory, interval: f64, mode: MsdMode) -> AnalyseResult<MsdResult> {
    if !(interval > 0.0) || !interval.is_finite() {
        return Err(AnalyseError::Invalid(format!(
            "frame interval must be positive, got {interval}"
        )));
    }
    let msd = match mode {
        MsdMode::Reference(frame) => mean_squared_displacement(traj, frame)?,
        MsdMode::Windowed => windowed_msd(traj)?,
    };
    let time = frame_times(msd.len(), interval);
    let diffusion = diffusion_coefficient(&msd, &time, 3)?;
    log::info!(
        "msd over {} frames of {} atoms, D = {diffusion:e}",
        traj.n_frames(),
        traj.n_atoms
    );
    Ok(MsdResult {
        time,
        msd,
        diffusion,
    })
}

pub fn fluctuation_summary(table: &ThermoTable, n_molecules: usize) -> AnalyseResult<ThermoSummary> {
    let summary = fluctuation_properties(table, n_molecules, &UnitSystem::real())?;
    log::info!(
        "T = {:.1} K, c_p = {:.2} J/mol/K, kappa_T = {:.3e} 1/Pa, alpha_p = {:.3e} 1/K",
        summary.temperature,
        summary.c_p,
        summary.kappa_t,
        summary.alpha_p
    );
    log::info!("bulk modulus {:.2} GPa", summary.bulk_modulus() / 1e9);
    Ok(summary)
}

/// Positions and heights of spectral peaks.
pub fn spectrum_peaks(
    spectrum: &Spectrum,
    height: Option<f64>,
    distance: usize,
) -> (Vec<f64>, Vec<f64>) {
    find_peaks(&spectrum.y, height, distance)
        .into_iter()
        .map(|i| (spectrum.x[i], spectrum.y[i]))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ThermoTable {
        ThermoTable::from_rows(
            vec!["Time".into(), "Step".into(), "PotEng".into(), "Press".into()],
            (0..64)
                .map(|i| {
                    let t = i as f64;
                    vec![0.5 * (t + 1.0), 10.0 * t, (0.7 * t).sin(), (0.3 * t).cos()]
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn summary_has_statistic_rows() {
        let s = summary_table(&table()).unwrap();
        assert_eq!(s.labels(), SUMMARY_ROWS);
        assert_eq!(s.table().columns()[0], "Time");
        assert_eq!(s.get("count", "Time"), Some(64.0));
        assert_eq!(s.get("min", "Step"), Some(0.0));
        assert_eq!(s.get("50%", "Step"), Some(315.0));
        assert_eq!(s.get("max", "Step"), Some(630.0));
    }

    #[test]
    fn lag_axis_uses_time_column() {
        let (lag, c) = correlation_series(&table(), &CorrelationRequest::auto("PotEng")).unwrap();
        assert_eq!(lag.len(), 64);
        assert_eq!(c.len(), 64);
        assert_eq!(lag[1], 0.5);
    }

    #[test]
    fn normalized_cross_correlation_is_bounded() {
        let request = CorrelationRequest {
            column: "PotEng".into(),
            with: Some("Press".into()),
            normalize: true,
            points_per_decade: Some(10.0),
        };
        let (lag, c) = correlation_series(&table(), &request).unwrap();
        assert_eq!(lag.len(), c.len());
        assert!(c.len() < 64);
        assert!(c.iter().all(|v| v.abs() <= 1.0 + 1e-9));
    }

    #[test]
    fn unknown_column_is_reported() {
        assert!(correlation_series(&table(), &CorrelationRequest::auto("Density")).is_err());
    }

    #[test]
    fn peaks_map_to_abscissae() {
        let spectrum = Spectrum {
            x: vec![400.0, 401.0, 402.0, 403.0, 404.0],
            y: vec![0.0, 0.2, 0.0, 0.9, 0.1],
        };
        let (x, y) = spectrum_peaks(&spectrum, Some(0.1), 1);
        assert_eq!(x, vec![401.0, 403.0]);
        assert_eq!(y, vec![0.2, 0.9]);
    }
}

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use lmp_io::{read_dump, read_thermo_log, write_columns_csv, write_labelled_csv, write_table_csv};

use crate::analysis::{correlation_series, msd_series, summary_table, CorrelationRequest, MsdMode};
use crate::config::AnalysisConfig;
use crate::error::{AnalyseError, AnalyseResult};

pub const THERMO_CSV: &str = "thermo.csv";
pub const THERMO_STATS_CSV: &str = "thermo_stats.csv";
pub const CORRELATION_CSV: &str = "time_correlation.csv";
pub const MSD_CSV: &str = "mean_squared_displacement.csv";
pub const INFO_TXT: &str = "info.txt";

#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub thermo_rows: usize,
    pub correlation_points: usize,
    pub msd_frames: usize,
    pub diffusion: Option<f64>,
    pub outputs: Vec<PathBuf>,
}

/// Runs the log and dump stages that the config enables, writing every
/// result under `output_dir`.
pub fn run(cfg: &AnalysisConfig) -> AnalyseResult<PipelineReport> {
    cfg.validate()?;
    fs::create_dir_all(&cfg.output_dir)?;
    let mut report = PipelineReport::default();

    if let Some(log_path) = &cfg.log {
        log::info!("thermo stage: {}", log_path.display());
        let table = read_thermo_log(log_path, &cfg.thermo_options())?;
        report.thermo_rows = table.n_rows();

        let path = cfg.output_dir.join(THERMO_CSV);
        write_table_csv(&path, &table)?;
        report.outputs.push(path);

        let path = cfg.output_dir.join(THERMO_STATS_CSV);
        write_labelled_csv(&path, &summary_table(&table)?)?;
        report.outputs.push(path);

        let request = CorrelationRequest {
            column: cfg.correlation_column.clone(),
            with: None,
            normalize: true,
            points_per_decade: Some(cfg.points_per_decade),
        };
        let (lag, c) = correlation_series(&table, &request)?;
        report.correlation_points = c.len();
        let path = cfg.output_dir.join(CORRELATION_CSV);
        write_columns_csv(&path, &["Time", "C"], &[&lag[..], &c[..]])?;
        report.outputs.push(path);
    }

    if let Some(dump_path) = &cfg.dump {
        log::info!("dump stage: {}", dump_path.display());
        let traj = read_dump(dump_path, cfg.dump_options())?;
        let mode = if cfg.windowed_msd {
            MsdMode::Windowed
        } else {
            MsdMode::Reference(cfg.reference_frame)
        };
        let Some(interval) = cfg.dump_interval else {
            return Err(AnalyseError::Config("dump_interval is required with a dump".into()));
        };
        let result = msd_series(&traj, interval, mode)?;
        report.msd_frames = result.msd.len();
        report.diffusion = Some(result.diffusion);

        let path = cfg.output_dir.join(MSD_CSV);
        write_columns_csv(&path, &["Time", "MSD"], &[&result.time[..], &result.msd[..]])?;
        report.outputs.push(path);

        let path = cfg.output_dir.join(INFO_TXT);
        let mut info = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(info, "D = {}", result.diffusion)?;
        report.outputs.push(path);
    }

    log::info!("wrote {} files to {}", report.outputs.len(), cfg.output_dir.display());
    Ok(report)
}

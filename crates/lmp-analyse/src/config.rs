use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lmp_io::{DumpOptions, ThermoOptions, TimeAxis, ZExtent};

use crate::error::{AnalyseError, AnalyseResult};

/// Inputs and knobs of the log/dump analysis pipeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// LAMMPS log with the thermo block.
    #[serde(default)]
    pub log: Option<PathBuf>,
    /// Scaled-coordinate trajectory dump.
    #[serde(default)]
    pub dump: Option<PathBuf>,
    #[serde(default)]
    pub time_step: Option<f64>,
    #[serde(default)]
    pub time_from_step: bool,
    #[serde(default)]
    pub first_frame: usize,
    #[serde(default = "default_stride")]
    pub stride_frame: usize,
    #[serde(default)]
    pub last_frame: Option<usize>,
    #[serde(default)]
    pub run: usize,
    #[serde(default = "default_column")]
    pub correlation_column: String,
    #[serde(default = "default_points_per_decade")]
    pub points_per_decade: f64,
    /// Elapsed time between consecutive dump frames.
    #[serde(default)]
    pub dump_interval: Option<f64>,
    #[serde(default)]
    pub reference_frame: usize,
    #[serde(default)]
    pub windowed_msd: bool,
    #[serde(default)]
    pub legacy_z_extent: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_stride() -> usize {
    1
}

fn default_column() -> String {
    "PotEng".to_string()
}

fn default_points_per_decade() -> f64 {
    24.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            log: None,
            dump: None,
            time_step: None,
            time_from_step: false,
            first_frame: 0,
            stride_frame: default_stride(),
            last_frame: None,
            run: 0,
            correlation_column: default_column(),
            points_per_decade: default_points_per_decade(),
            dump_interval: None,
            reference_frame: 0,
            windowed_msd: false,
            legacy_z_extent: false,
            output_dir: default_output_dir(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> AnalyseResult<()> {
        if self.log.is_none() && self.dump.is_none() {
            return Err(AnalyseError::Config(
                "at least one of log and dump must be given".into(),
            ));
        }
        if self.stride_frame == 0 {
            return Err(AnalyseError::Config("stride_frame must be at least 1".into()));
        }
        if let Some(dt) = self.time_step {
            if !(dt > 0.0) || !dt.is_finite() {
                return Err(AnalyseError::Config(format!(
                    "time_step must be positive, got {dt}"
                )));
            }
        }
        if let Some(last) = self.last_frame {
            if last > 0 && last < self.first_frame {
                return Err(AnalyseError::Config(format!(
                    "last_frame {last} leaves no rows after first_frame {}",
                    self.first_frame
                )));
            }
        }
        if !(self.points_per_decade > 0.0) {
            return Err(AnalyseError::Config(
                "points_per_decade must be positive".into(),
            ));
        }
        if self.correlation_column.trim().is_empty() {
            return Err(AnalyseError::Config("correlation_column is empty".into()));
        }
        if self.dump.is_some() {
            match self.dump_interval {
                Some(dt) if dt > 0.0 && dt.is_finite() => {}
                Some(dt) => {
                    return Err(AnalyseError::Config(format!(
                        "dump_interval must be positive, got {dt}"
                    )))
                }
                None => {
                    return Err(AnalyseError::Config(
                        "dump_interval is required with a dump".into(),
                    ))
                }
            }
        }
        Ok(())
    }

    pub fn thermo_options(&self) -> ThermoOptions {
        ThermoOptions {
            time_step: self.time_step,
            time_axis: if self.time_from_step {
                TimeAxis::StepColumn
            } else {
                TimeAxis::RowIndex
            },
            first_frame: self.first_frame,
            stride: self.stride_frame,
            last_frame: self.last_frame,
            run: self.run,
        }
    }

    pub fn dump_options(&self) -> DumpOptions {
        DumpOptions {
            z_extent: if self.legacy_z_extent {
                ZExtent::FromX
            } else {
                ZExtent::PerAxis
            },
        }
    }
}

/// Reads a config as YAML for `.yaml`/`.yml` files and as JSON otherwise.
pub fn load_config(path: &Path) -> AnalyseResult<AnalysisConfig> {
    let content = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let cfg: AnalysisConfig = if ext == "yaml" || ext == "yml" {
        serde_yaml::from_str(&content)
            .map_err(|e| AnalyseError::Parse(format!("yaml parse error: {e}")))?
    } else {
        serde_json::from_str(&content)
            .map_err(|e| AnalyseError::Parse(format!("json parse error: {e}")))?
    };
    log::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use lmp_analyse::analysis::{
    correlation_series, fluctuation_summary, msd_series, response_series, spectrum_peaks,
    summary_table, CorrelationRequest, MsdMode,
};
use lmp_analyse::config::load_config;
use lmp_analyse::error::{AnalyseError, AnalyseResult};
use lmp_analyse::pipeline;
use lmp_engine::{heat_capacity_prefactor, vibrational_partition_sum, ThermoSummary};
use lmp_io::{
    read_dump, read_jcamp, read_thermo_log, read_vibrational_frequencies, write_columns_csv,
    write_labelled_csv, write_table_csv, DumpOptions, ThermoOptions, TimeAxis, ZExtent,
};

#[derive(Parser)]
#[command(name = "lmp-analyse", version, about = "Analysis of LAMMPS thermo logs and dumps")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ThermoArgs {
    log: PathBuf,
    #[arg(long)]
    time_step: Option<f64>,
    /// Derive Time from the Step column instead of the row index.
    #[arg(long)]
    time_from_step: bool,
    #[arg(long, default_value_t = 0)]
    first_frame: usize,
    #[arg(long, default_value_t = 1)]
    stride: usize,
    #[arg(long)]
    last_frame: Option<usize>,
    /// Thermo block of a multi-run log (0-based).
    #[arg(long, default_value_t = 0)]
    run: usize,
}

impl ThermoArgs {
    fn options(&self) -> ThermoOptions {
        ThermoOptions {
            time_step: self.time_step,
            time_axis: if self.time_from_step {
                TimeAxis::StepColumn
            } else {
                TimeAxis::RowIndex
            },
            first_frame: self.first_frame,
            stride: self.stride,
            last_frame: self.last_frame,
            run: self.run,
        }
    }

    fn read(&self) -> AnalyseResult<lmp_core::ThermoTable> {
        Ok(read_thermo_log(&self.log, &self.options())?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Thermo table and per-column statistics.
    Thermo {
        #[command(flatten)]
        thermo: ThermoArgs,
        #[arg(short, long, default_value = "thermo.csv")]
        output: PathBuf,
    },
    /// Mean squared displacement and diffusion coefficient of a dump.
    Msd {
        dump: PathBuf,
        /// Elapsed time between dump frames.
        #[arg(long)]
        interval: f64,
        #[arg(long, default_value_t = 0)]
        reference_frame: usize,
        /// Average over all time origins instead of one reference frame.
        #[arg(long)]
        windowed: bool,
        /// Scale z by the x extent.
        #[arg(long)]
        legacy_z_extent: bool,
        #[arg(short, long, default_value = "mean_squared_displacement.csv")]
        output: PathBuf,
    },
    /// Time correlation of one or two thermo columns.
    Correlate {
        #[command(flatten)]
        thermo: ThermoArgs,
        #[arg(long)]
        column: String,
        #[arg(long = "with")]
        with: Option<String>,
        #[arg(long)]
        normalize: bool,
        /// Average onto logarithmically spaced lags.
        #[arg(long)]
        log_average: Option<f64>,
        #[arg(short, long, default_value = "time_correlation.csv")]
        output: PathBuf,
    },
    /// Frequency-dependent response from a thermo column.
    Response {
        #[command(flatten)]
        thermo: ThermoArgs,
        #[arg(long)]
        column: String,
        /// Sample interval; defaults to the Time column spacing.
        #[arg(long)]
        dt: Option<f64>,
        #[arg(long, conflicts_with = "heat_capacity_at")]
        prefactor: Option<f64>,
        /// Use -1/(k_B T^2) with k_B = 1 at this temperature.
        #[arg(long)]
        heat_capacity_at: Option<f64>,
        #[arg(short, long, default_value = "response.csv")]
        output: PathBuf,
    },
    /// Heat capacity, compressibility and expansion from NPT fluctuations.
    Fluctuation {
        #[command(flatten)]
        thermo: ThermoArgs,
        #[arg(long)]
        molecules: usize,
        #[arg(short, long, default_value = "thermo.csv")]
        output: PathBuf,
    },
    /// Vibrational partition sum from a list of wavenumbers (1/cm).
    Vib {
        file: PathBuf,
        #[arg(long)]
        temperature: f64,
    },
    /// Peaks of a JCAMP-DX spectrum.
    Spectrum {
        file: PathBuf,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long, default_value_t = 50)]
        distance: usize,
        #[arg(short, long, default_value = "peaks.csv")]
        output: PathBuf,
    },
    /// Full log and dump pipeline from a JSON or YAML config.
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<(), String> {
    if let Err(err) = run_cli() {
        log::error!("{err}");
        return Err(err.to_string());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run_cli() -> AnalyseResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Thermo { thermo, output } => {
            let table = thermo.read()?;
            write_table_csv(&output, &table)?;
            let stats = summary_table(&table)?;
            write_labelled_csv(stats_path(&output), &stats)?;
            for summary in lmp_core::stats::describe(&table)? {
                log::info!(
                    "{:>12}  mean {:>14.6e}  std {:>12.4e}  min {:>14.6e}  max {:>14.6e}",
                    summary.name,
                    summary.mean,
                    summary.std,
                    summary.min,
                    summary.max
                );
            }
        }
        Command::Msd {
            dump,
            interval,
            reference_frame,
            windowed,
            legacy_z_extent,
            output,
        } => {
            let options = DumpOptions {
                z_extent: if legacy_z_extent {
                    ZExtent::FromX
                } else {
                    ZExtent::PerAxis
                },
            };
            let traj = read_dump(&dump, options)?;
            let mode = if windowed {
                MsdMode::Windowed
            } else {
                MsdMode::Reference(reference_frame)
            };
            let result = msd_series(&traj, interval, mode)?;
            write_columns_csv(&output, &["Time", "MSD"], &[&result.time[..], &result.msd[..]])?;
            println!("D = {:e}", result.diffusion);
        }
        Command::Correlate {
            thermo,
            column,
            with,
            normalize,
            log_average,
            output,
        } => {
            let table = thermo.read()?;
            let request = CorrelationRequest {
                column,
                with,
                normalize,
                points_per_decade: log_average,
            };
            let (lag, c) = correlation_series(&table, &request)?;
            write_columns_csv(&output, &["Time", "C"], &[&lag[..], &c[..]])?;
        }
        Command::Response {
            thermo,
            column,
            dt,
            prefactor,
            heat_capacity_at,
            output,
        } => {
            let prefactor = match (prefactor, heat_capacity_at) {
                (Some(a), _) => a,
                (None, Some(t)) => heat_capacity_prefactor(t, 1.0)?,
                (None, None) => {
                    return Err(AnalyseError::Invalid(
                        "either --prefactor or --heat-capacity-at is required".into(),
                    ))
                }
            };
            let table = thermo.read()?;
            let response = response_series(&table, &column, dt, prefactor)?;
            let re: Vec<f64> = response.mu.iter().map(|v| v.re).collect();
            let im: Vec<f64> = response.mu.iter().map(|v| v.im).collect();
            write_columns_csv(&output, &["omega", "re", "im"], &[&response.omega[..], &re[..], &im[..]])?;
        }
        Command::Fluctuation {
            thermo,
            molecules,
            output,
        } => {
            let table = thermo.read()?;
            let summary = fluctuation_summary(&table, molecules)?;
            let values = summary.values();
            let columns: Vec<&[f64]> = values.iter().map(std::slice::from_ref).collect();
            write_columns_csv(&output, &ThermoSummary::CSV_HEADER, &columns)?;
        }
        Command::Vib { file, temperature } => {
            let wavenumbers = read_vibrational_frequencies(&file)?;
            let sum = vibrational_partition_sum(&wavenumbers, temperature)?;
            log::info!("{} modes at {temperature} K", wavenumbers.len());
            println!("Total vibrational partition function: {sum}");
        }
        Command::Spectrum {
            file,
            height,
            distance,
            output,
        } => {
            let spectrum = read_jcamp(&file)?;
            let (x, y) = spectrum_peaks(&spectrum, height, distance);
            log::info!("{} peaks in {} points", x.len(), spectrum.y.len());
            write_columns_csv(&output, &["Wavenumber", "Intensity"], &[&x[..], &y[..]])?;
        }
        Command::Run { config } => {
            let cfg = load_config(&config)?;
            let report = pipeline::run(&cfg)?;
            if let Some(d) = report.diffusion {
                println!("D = {d:e}");
            }
        }
    }
    Ok(())
}

/// `thermo.csv` -> `thermo_stats.csv` next to it.
fn stats_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("thermo");
    output.with_file_name(format!("{stem}_stats.csv"))
}

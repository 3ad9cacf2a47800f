use std::fs;

mod common;
use common::{dump_text, log_text, separating_pair, temp_dir, write_in};
use lmp_analyse::pipeline::{self, CORRELATION_CSV, INFO_TXT, MSD_CSV, THERMO_CSV, THERMO_STATS_CSV};
use lmp_analyse::{AnalyseError, AnalysisConfig};
use lmp_io::{read_labelled_csv, read_table_csv};

fn full_config(dir: &tempfile::TempDir) -> AnalysisConfig {
    let side = 10.0;
    AnalysisConfig {
        log: Some(write_in(dir, "log.lammps", &log_text(200))),
        dump: Some(write_in(
            dir,
            "dump.lammpstrj",
            &dump_text(&separating_pair(8, 1.5, side), side),
        )),
        time_step: Some(2e-15),
        dump_interval: Some(0.1),
        points_per_decade: 10.0,
        output_dir: dir.path().join("out"),
        ..AnalysisConfig::default()
    }
}

#[test]
fn pipeline_writes_all_outputs() {
    let dir = temp_dir();
    let cfg = full_config(&dir);
    let report = pipeline::run(&cfg).expect("pipeline");
    assert_eq!(report.thermo_rows, 200);
    assert_eq!(report.msd_frames, 8);
    assert_eq!(report.outputs.len(), 5);
    for name in [THERMO_CSV, THERMO_STATS_CSV, CORRELATION_CSV, MSD_CSV, INFO_TXT] {
        assert!(cfg.output_dir.join(name).exists(), "{name}");
    }

    let thermo = read_table_csv(cfg.output_dir.join(THERMO_CSV)).unwrap();
    assert_eq!(thermo.columns()[0], "Time");
    assert_eq!(thermo.n_columns(), 7);
    let time = thermo.column("Time").unwrap();
    assert!((time[0] - 2e-15).abs() < 1e-27);

    let corr = read_table_csv(cfg.output_dir.join(CORRELATION_CSV)).unwrap();
    assert_eq!(corr.columns(), &["Time", "C"]);
    let c = corr.column("C").unwrap();
    assert!((c[0] - 1.0).abs() < 1e-12);
    assert_eq!(corr.n_rows(), report.correlation_points);
}

#[test]
fn msd_of_separating_pair_crosses_boundary() {
    let dir = temp_dir();
    let cfg = full_config(&dir);
    let report = pipeline::run(&cfg).expect("pipeline");

    // relative speed 1.5 per frame along x only: |v_rel|^2 = 2.25
    let msd = read_table_csv(cfg.output_dir.join(MSD_CSV)).unwrap();
    let values = msd.column("MSD").unwrap();
    let time = msd.column("Time").unwrap();
    for (f, m) in values.iter().enumerate() {
        let expected = 2.25 * (f * f) as f64 / 3.0;
        assert!((m - expected).abs() < 1e-9 * (1.0 + expected), "frame {f}: {m}");
    }
    assert!((time[3] - 0.3).abs() < 1e-12);

    let d = report.diffusion.unwrap();
    let info = fs::read_to_string(cfg.output_dir.join(INFO_TXT)).unwrap();
    assert!(info.starts_with("D = "));
    let logged: f64 = info.trim()["D = ".len()..].parse().unwrap();
    assert_eq!(logged, d);
}

#[test]
fn windowed_msd_agrees_for_ballistic_motion() {
    let dir = temp_dir();
    let reference = pipeline::run(&full_config(&dir)).unwrap();
    let windowed = pipeline::run(&AnalysisConfig {
        windowed_msd: true,
        output_dir: dir.path().join("windowed"),
        ..full_config(&dir)
    })
    .unwrap();
    let (a, b) = (reference.diffusion.unwrap(), windowed.diffusion.unwrap());
    assert!((a - b).abs() < 1e-9 * a.abs(), "{a} vs {b}");
}

#[test]
fn log_only_pipeline() {
    let dir = temp_dir();
    let cfg = AnalysisConfig {
        log: Some(write_in(&dir, "log.lammps", &log_text(50))),
        first_frame: 10,
        stride_frame: 2,
        output_dir: dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    let report = pipeline::run(&cfg).unwrap();
    assert_eq!(report.thermo_rows, 20);
    assert!(report.diffusion.is_none());
    let thermo = read_table_csv(dir.path().join(THERMO_CSV)).unwrap();
    assert_eq!(thermo.columns()[0], "Step");
    assert_eq!(thermo.column("Step").unwrap()[0], 400.0);
    let stats = read_labelled_csv(dir.path().join(THERMO_STATS_CSV)).unwrap();
    assert_eq!(stats.get("count", "Step"), Some(20.0));
}

#[test]
fn stats_rows_are_found_by_name() {
    let dir = temp_dir();
    let cfg = AnalysisConfig {
        log: Some(write_in(&dir, "log.lammps", &log_text(50))),
        output_dir: dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    pipeline::run(&cfg).unwrap();
    let text = fs::read_to_string(dir.path().join(THERMO_STATS_CSV)).unwrap();
    assert!(text.starts_with(",Step,"));
    let stats = read_labelled_csv(dir.path().join(THERMO_STATS_CSV)).unwrap();
    assert_eq!(stats.labels(), ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]);
    let thermo = read_table_csv(dir.path().join(THERMO_CSV)).unwrap();
    let steps = thermo.column("Step").unwrap();
    let mean = steps.iter().sum::<f64>() / steps.len() as f64;
    assert_eq!(stats.get("mean", "Step"), Some(mean));
    assert_eq!(stats.get("max", "Step"), steps.last().copied());
}

#[test]
fn missing_correlation_column_fails() {
    let dir = temp_dir();
    let cfg = AnalysisConfig {
        log: Some(write_in(&dir, "log.lammps", &log_text(20))),
        correlation_column: "Density".into(),
        output_dir: dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    assert!(matches!(pipeline::run(&cfg), Err(AnalyseError::Invalid(_))));
}

#[test]
fn log_without_thermo_header_fails() {
    let dir = temp_dir();
    let cfg = AnalysisConfig {
        log: Some(write_in(&dir, "log.lammps", "LAMMPS (2 Aug 2023)\nunits real\n")),
        output_dir: dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    let err = pipeline::run(&cfg).unwrap_err();
    assert!(matches!(err, AnalyseError::Parse(_)), "{err}");
}

#[test]
fn truncated_dump_fails() {
    let dir = temp_dir();
    let mut text = dump_text(&separating_pair(3, 0.5, 10.0), 10.0);
    let cut = text.trim_end().rfind('\n').unwrap();
    text.truncate(cut + 1);
    let cfg = AnalysisConfig {
        dump: Some(write_in(&dir, "dump.lammpstrj", &text)),
        dump_interval: Some(1.0),
        output_dir: dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    assert!(pipeline::run(&cfg).is_err());
}

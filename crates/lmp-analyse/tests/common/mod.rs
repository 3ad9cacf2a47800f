#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub fn temp_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("lmp_analyse_test_")
        .tempdir()
        .expect("create temp dir")
}

pub fn write_text(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write temp file");
}

pub fn write_in(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    write_text(&path, contents);
    path
}

/// Dump of a cubic box `[0, side)` with unwrapped positions given in absolute
/// coordinates; wrapping goes into the image counts.
pub fn dump_text(frames: &[Vec<[f64; 3]>], side: f64) -> String {
    let mut out = String::new();
    for (f, positions) in frames.iter().enumerate() {
        writeln!(out, "ITEM: TIMESTEP\n{}", f * 1000).unwrap();
        writeln!(out, "ITEM: NUMBER OF ATOMS\n{}", positions.len()).unwrap();
        writeln!(out, "ITEM: BOX BOUNDS pp pp pp").unwrap();
        for _ in 0..3 {
            writeln!(out, "0.0 {side}").unwrap();
        }
        writeln!(out, "ITEM: ATOMS id type xs ys zs ix iy iz").unwrap();
        for (i, p) in positions.iter().enumerate() {
            let image = p.map(|v| (v / side).floor());
            let scaled = [
                p[0] / side - image[0],
                p[1] / side - image[1],
                p[2] / side - image[2],
            ];
            writeln!(
                out,
                "{} 1 {} {} {} {} {} {}",
                i + 1,
                scaled[0],
                scaled[1],
                scaled[2],
                image[0] as i64,
                image[1] as i64,
                image[2] as i64
            )
            .unwrap();
        }
    }
    out
}

/// Two atoms moving apart along x by `speed` per frame, starting at the box
/// centre so some frames cross the boundary.
pub fn separating_pair(n_frames: usize, speed: f64, side: f64) -> Vec<Vec<[f64; 3]>> {
    (0..n_frames)
        .map(|f| {
            let d = speed * f as f64;
            vec![
                [0.5 * side + d, 0.25 * side, 0.5 * side],
                [0.5 * side - d, 0.25 * side, 0.5 * side],
            ]
        })
        .collect()
}

/// LAMMPS log with a preamble, one thermo block and the loop footer.
pub fn log_text(n_rows: usize) -> String {
    let mut out = String::from(
        "LAMMPS (2 Aug 2023)\nunits real\nrun 1000\n\
         Per MPI rank memory allocation (min/avg/max) = 5.2 | 5.2 | 5.2 Mbytes\n\
         Step Temp Press PotEng KinEng Volume\n",
    );
    for i in 0..n_rows {
        let t = i as f64;
        writeln!(
            out,
            "{} {} {} {} {} {}",
            i * 40,
            380.0 + 5.0 * (0.9 * t).sin(),
            1.0 + 50.0 * (0.4 * t).cos(),
            -2500.0 + 10.0 * (0.9 * t).sin() + 3.0 * (2.1 * t).cos(),
            140.0 + 2.0 * (0.9 * t).sin(),
            40000.0 + 80.0 * (0.3 * t).sin()
        )
        .unwrap();
    }
    out.push_str("Loop time of 12.5 on 4 procs for 1000 steps with 2500 atoms\n");
    out
}

use super::*;
use lmp_core::error::LmpResult;
use lmp_core::geom::Vec3;
use lmp_core::pbc::SimBox;
use lmp_io::{RawFrame, TrajReader};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct InMemoryTraj {
    frames: Vec<Vec<Vec3>>,
    box_: SimBox,
    cursor: usize,
}

impl InMemoryTraj {
    fn new(frames: Vec<Vec<Vec3>>) -> Self {
        Self {
            frames,
            box_: SimBox::cube(0.0, 50.0).unwrap(),
            cursor: 0,
        }
    }
}

impl TrajReader for InMemoryTraj {
    fn n_atoms(&self) -> Option<usize> {
        self.frames.first().map(|f| f.len())
    }

    fn read_frame(&mut self) -> LmpResult<Option<RawFrame>> {
        let Some(positions) = self.frames.get(self.cursor) else {
            return Ok(None);
        };
        let frame = RawFrame {
            timestep: Some(self.cursor as u64 * 100),
            box_: self.box_,
            types: vec![1; positions.len()],
            positions: positions.clone(),
        };
        self.cursor += 1;
        Ok(Some(frame))
    }
}

fn random_series(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn random_vec(rng: &mut StdRng, scale: f64) -> Vec3 {
    Vec3::new(
        rng.gen_range(-scale..scale),
        rng.gen_range(-scale..scale),
        rng.gen_range(-scale..scale),
    )
}

/// Atoms moving ballistically, `r_i(f) = r_i(0) + v_i f`.
fn ballistic_frames(start: &[Vec3], velocities: &[Vec3], n_frames: usize) -> Vec<Vec<Vec3>> {
    (0..n_frames)
        .map(|f| {
            start
                .iter()
                .zip(velocities)
                .map(|(&r, &v)| r + v.scale(f as f64))
                .collect()
        })
        .collect()
}

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol * (1.0 + b.abs()), "{a} != {b}");
}

include!("part1.rs");
include!("part2.rs");

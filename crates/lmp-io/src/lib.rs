#![forbid(unsafe_code)]

pub mod csv;
pub mod dump;
pub mod jcamp;
pub mod thermo;
pub mod vib;

use lmp_core::error::{LmpError, LmpResult};
use lmp_core::frame::{Trajectory, TrajectoryBuilder};
use lmp_core::geom::Vec3;
use lmp_core::pbc::SimBox;

pub use csv::{
    read_labelled_csv, read_table_csv, write_columns_csv, write_labelled_csv, write_table_csv,
};
pub use dump::{read_dump, DumpOptions, DumpReader, ZExtent};
pub use jcamp::{read_jcamp, Spectrum};
pub use thermo::{read_thermo_log, ThermoLogReader, ThermoOptions, TimeAxis};
pub use vib::read_vibrational_frequencies;

/// One parsed frame, positions already indexed by 0-based atom id.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub timestep: Option<u64>,
    pub box_: SimBox,
    pub types: Vec<u32>,
    pub positions: Vec<Vec3>,
}

pub trait TrajReader {
    /// Atom count, known once the first frame has been read.
    fn n_atoms(&self) -> Option<usize>;
    fn read_frame(&mut self) -> LmpResult<Option<RawFrame>>;

    fn read_all(&mut self) -> LmpResult<Trajectory> {
        let Some(first) = self.read_frame()? else {
            return TrajectoryBuilder::new(0, 0).finish();
        };
        let n_atoms = first.positions.len();
        let mut builder = TrajectoryBuilder::new(n_atoms, 16);
        builder.set_types(first.types)?;
        builder
            .start_frame(first.box_, first.timestep)
            .copy_from_slice(&first.positions);
        while let Some(frame) = self.read_frame()? {
            if frame.positions.len() != n_atoms {
                return Err(LmpError::Mismatch(format!(
                    "frame {} has {} atoms, expected {n_atoms}",
                    builder.n_frames(),
                    frame.positions.len()
                )));
            }
            builder
                .start_frame(frame.box_, frame.timestep)
                .copy_from_slice(&frame.positions);
        }
        builder.finish()
    }
}

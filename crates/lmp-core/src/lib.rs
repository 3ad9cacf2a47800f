#![forbid(unsafe_code)]

pub mod centers;
pub mod error;
pub mod frame;
pub mod geom;
pub mod pbc;
pub mod stats;
pub mod table;

pub use centers::center_of_geometry;
pub use error::{LmpError, LmpResult};
pub use frame::{Frame, Trajectory, TrajectoryBuilder};
pub use geom::Vec3;
pub use pbc::SimBox;
pub use table::{LabelledTable, ThermoTable};

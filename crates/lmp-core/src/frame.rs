use crate::error::{LmpError, LmpResult};
use crate::geom::Vec3;
use crate::pbc::SimBox;

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestep: Option<u64>,
    pub positions: Vec<Vec3>,
}

/// Frames sharing one atom count and one id-to-index mapping.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub n_atoms: usize,
    pub frames: Vec<Frame>,
    pub types: Vec<u32>,
    pub box_: SimBox,
}

impl Trajectory {
    /// Builds a trajectory from raw positions, all atoms of type 1.
    pub fn from_positions(frames: Vec<Vec<Vec3>>, box_: SimBox) -> LmpResult<Self> {
        let n_atoms = frames.first().map(|f| f.len()).unwrap_or(0);
        let mut builder = TrajectoryBuilder::new(n_atoms, frames.len());
        builder.set_types(vec![1; n_atoms])?;
        for (idx, positions) in frames.into_iter().enumerate() {
            if positions.len() != n_atoms {
                return Err(LmpError::Mismatch(format!(
                    "frame {idx} has {} atoms, expected {n_atoms}",
                    positions.len()
                )));
            }
            builder.start_frame(box_, None).copy_from_slice(&positions);
        }
        builder.finish()
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn positions(&self, frame: usize) -> &[Vec3] {
        &self.frames[frame].positions
    }
}

#[derive(Debug)]
pub struct TrajectoryBuilder {
    n_atoms: usize,
    frames: Vec<Frame>,
    types: Option<Vec<u32>>,
    box_: Option<SimBox>,
    warned_box: bool,
}

impl TrajectoryBuilder {
    pub fn new(n_atoms: usize, max_frames: usize) -> Self {
        Self {
            n_atoms,
            frames: Vec::with_capacity(max_frames),
            types: None,
            box_: None,
            warned_box: false,
        }
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn set_types(&mut self, types: Vec<u32>) -> LmpResult<()> {
        if types.len() != self.n_atoms {
            return Err(LmpError::Mismatch(format!(
                "{} atom types for {} atoms",
                types.len(),
                self.n_atoms
            )));
        }
        self.types = Some(types);
        Ok(())
    }

    /// Appends a zeroed frame and hands out its position buffer.
    pub fn start_frame(&mut self, box_: SimBox, timestep: Option<u64>) -> &mut [Vec3] {
        match self.box_ {
            None => self.box_ = Some(box_),
            Some(first) if first != box_ && !self.warned_box => {
                log::warn!(
                    "box bounds change at frame {} ({:?} -> {:?}); keeping the first box",
                    self.frames.len(),
                    first.bounds,
                    box_.bounds
                );
                self.warned_box = true;
            }
            Some(_) => {}
        }
        self.frames.push(Frame {
            timestep,
            positions: vec![Vec3::ZERO; self.n_atoms],
        });
        let last = self.frames.len() - 1;
        &mut self.frames[last].positions
    }

    pub fn finish(self) -> LmpResult<Trajectory> {
        let box_ = self
            .box_
            .ok_or_else(|| LmpError::InsufficientData("trajectory contains no frames".into()))?;
        let types = self.types.unwrap_or_else(|| vec![0; self.n_atoms]);
        Ok(Trajectory {
            n_atoms: self.n_atoms,
            frames: self.frames,
            types,
            box_,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_frames() {
        let box_ = SimBox::cube(0.0, 10.0).unwrap();
        let mut builder = TrajectoryBuilder::new(2, 2);
        builder.set_types(vec![1, 2]).unwrap();
        builder.start_frame(box_, Some(0))[1] = Vec3::new(1.0, 0.0, 0.0);
        builder.start_frame(box_, Some(100))[0] = Vec3::new(0.0, 2.0, 0.0);
        let traj = builder.finish().unwrap();
        assert_eq!(traj.n_frames(), 2);
        assert_eq!(traj.types, vec![1, 2]);
        assert_eq!(traj.positions(0)[1].x, 1.0);
        assert_eq!(traj.positions(1)[0].y, 2.0);
        assert_eq!(traj.frames[1].timestep, Some(100));
    }

    #[test]
    fn empty_builder_fails() {
        let builder = TrajectoryBuilder::new(3, 0);
        assert!(matches!(
            builder.finish(),
            Err(LmpError::InsufficientData(_))
        ));
    }

    #[test]
    fn from_positions_rejects_ragged_frames() {
        let box_ = SimBox::cube(0.0, 1.0).unwrap();
        let frames = vec![vec![Vec3::ZERO; 2], vec![Vec3::ZERO; 3]];
        assert!(Trajectory::from_positions(frames, box_).is_err());
    }
}

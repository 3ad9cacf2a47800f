use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lmp_core::error::{LmpError, LmpResult};
use lmp_core::frame::Trajectory;
use lmp_core::geom::Vec3;
use lmp_core::pbc::SimBox;

use crate::{RawFrame, TrajReader};

/// Which box extent scales the z coordinate.
///
/// `FromX` reproduces older analysis output that multiplied z by the x
/// extent. It is only equivalent to `PerAxis` for cubic boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZExtent {
    #[default]
    PerAxis,
    FromX,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DumpOptions {
    pub z_extent: ZExtent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    AwaitingFrame,
    ReadingTimestep,
    ReadingAtomCount,
    ReadingBoxBounds { dim: usize },
    ReadingAtoms { remaining: usize },
}

const REQUIRED_COLUMNS: [&str; 8] = ["id", "type", "xs", "ys", "zs", "ix", "iy", "iz"];

/// Positions of the required per-atom fields within an atom record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AtomColumns {
    id: usize,
    type_: usize,
    scaled: [usize; 3],
    image: [usize; 3],
    min_fields: usize,
}

impl AtomColumns {
    fn from_header(names: &[&str]) -> LmpResult<Self> {
        let mut found = [None; 8];
        for (col, name) in names.iter().enumerate() {
            if let Some(slot) = REQUIRED_COLUMNS.iter().position(|r| r == name) {
                if found[slot].is_some() {
                    return Err(LmpError::Parse(format!(
                        "ATOMS header repeats column '{name}'"
                    )));
                }
                found[slot] = Some(col);
            }
        }
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .zip(found.iter())
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(LmpError::Parse(format!(
                "ATOMS header is missing required column(s): {}",
                missing.join(", ")
            )));
        }
        let idx: Vec<usize> = found.iter().flatten().copied().collect();
        let min_fields = idx.iter().copied().max().unwrap_or(0) + 1;
        Ok(Self {
            id: idx[0],
            type_: idx[1],
            scaled: [idx[2], idx[3], idx[4]],
            image: [idx[5], idx[6], idx[7]],
            min_fields,
        })
    }
}

struct PendingFrame {
    timestep: Option<u64>,
    n_atoms: Option<usize>,
    bounds: [[f64; 2]; 3],
    box_: Option<SimBox>,
    columns: Option<AtomColumns>,
    types: Vec<u32>,
    positions: Vec<Vec3>,
    seen: Vec<bool>,
}

impl PendingFrame {
    fn new() -> Self {
        Self {
            timestep: None,
            n_atoms: None,
            bounds: [[0.0; 2]; 3],
            box_: None,
            columns: None,
            types: Vec::new(),
            positions: Vec::new(),
            seen: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.timestep.is_none() && self.n_atoms.is_none()
    }

    fn into_raw(self) -> LmpResult<RawFrame> {
        let box_ = self
            .box_
            .ok_or_else(|| LmpError::Parse("frame finished without box bounds".into()))?;
        Ok(RawFrame {
            timestep: self.timestep,
            box_,
            types: self.types,
            positions: self.positions,
        })
    }
}

/// Frame-by-frame reader for LAMMPS text dumps written with
/// `id type xs ys zs ix iy iz` among the atom columns.
pub struct DumpReader<R: BufRead> {
    reader: R,
    options: DumpOptions,
    state: State,
    line_no: usize,
    n_atoms: Option<usize>,
}

impl DumpReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>, options: DumpOptions) -> LmpResult<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file), options))
    }
}

impl<R: BufRead> DumpReader<R> {
    pub fn new(reader: R, options: DumpOptions) -> Self {
        Self {
            reader,
            options,
            state: State::AwaitingFrame,
            line_no: 0,
            n_atoms: None,
        }
    }

    fn next_line(&mut self) -> LmpResult<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(line))
    }

    fn parse_err(&self, msg: impl std::fmt::Display) -> LmpError {
        LmpError::parse_at(self.line_no, msg)
    }

    fn start_section(&mut self, item: &str, frame: &mut PendingFrame) -> LmpResult<()> {
        if item == "TIMESTEP" {
            if !frame.is_empty() {
                return Err(self.parse_err("TIMESTEP inside a frame that has no ATOMS section"));
            }
            self.state = State::ReadingTimestep;
        } else if item == "NUMBER OF ATOMS" {
            if frame.n_atoms.is_some() {
                return Err(self.parse_err("second NUMBER OF ATOMS within one frame"));
            }
            self.state = State::ReadingAtomCount;
        } else if item.starts_with("BOX BOUNDS") {
            if frame.n_atoms.is_none() {
                return Err(self.parse_err("BOX BOUNDS before NUMBER OF ATOMS"));
            }
            if frame.box_.is_some() {
                return Err(self.parse_err("second BOX BOUNDS within one frame"));
            }
            self.state = State::ReadingBoxBounds { dim: 0 };
        } else if let Some(rest) = item.strip_prefix("ATOMS") {
            let n_atoms = frame
                .n_atoms
                .ok_or_else(|| self.parse_err("ATOMS before NUMBER OF ATOMS"))?;
            if frame.box_.is_none() {
                return Err(self.parse_err("ATOMS before BOX BOUNDS"));
            }
            let names: Vec<&str> = rest.split_whitespace().collect();
            let columns = AtomColumns::from_header(&names)?;
            frame.columns = Some(columns);
            frame.types = vec![0; n_atoms];
            frame.positions = vec![Vec3::ZERO; n_atoms];
            frame.seen = vec![false; n_atoms];
            self.state = State::ReadingAtoms {
                remaining: n_atoms,
            };
        } else {
            return Err(LmpError::Unsupported(format!(
                "line {}: dump section 'ITEM: {item}'",
                self.line_no
            )));
        }
        Ok(())
    }

    /// Checks the atom count against earlier frames and hands the frame out.
    fn finish_frame(&mut self, frame: PendingFrame) -> LmpResult<Option<RawFrame>> {
        self.state = State::AwaitingFrame;
        let n = frame.positions.len();
        match self.n_atoms {
            None => self.n_atoms = Some(n),
            Some(first) if first != n => {
                return Err(LmpError::Mismatch(format!(
                    "frame ending at line {} has {n} atoms, first frame had {first}",
                    self.line_no
                )));
            }
            Some(_) => {}
        }
        log::debug!(
            "dump frame (timestep {:?}) with {n} atoms ends at line {}",
            frame.timestep,
            self.line_no
        );
        frame.into_raw().map(Some)
    }

    fn read_atom(&self, tokens: &[&str], frame: &mut PendingFrame) -> LmpResult<()> {
        let columns = frame
            .columns
            .ok_or_else(|| self.parse_err("atom record without ATOMS header"))?;
        let box_ = frame
            .box_
            .ok_or_else(|| self.parse_err("atom record without box bounds"))?;
        if tokens.len() < columns.min_fields {
            return Err(self.parse_err(format!(
                "truncated atom record: expected at least {} fields, got {}",
                columns.min_fields,
                tokens.len()
            )));
        }
        let id: usize = tokens[columns.id]
            .parse()
            .map_err(|_| self.parse_err(format!("invalid atom id '{}'", tokens[columns.id])))?;
        let n_atoms = frame.positions.len();
        if id == 0 || id > n_atoms {
            return Err(self.parse_err(format!(
                "atom id {id} outside 1..={n_atoms}"
            )));
        }
        let idx = id - 1;
        if frame.seen[idx] {
            return Err(self.parse_err(format!("duplicate atom id {id}")));
        }
        let type_: u32 = tokens[columns.type_].parse().map_err(|_| {
            self.parse_err(format!("invalid atom type '{}'", tokens[columns.type_]))
        })?;

        let extents = box_.extents();
        let z_extent = match self.options.z_extent {
            ZExtent::PerAxis => extents[2],
            ZExtent::FromX => extents[0],
        };
        let scale = [extents[0], extents[1], z_extent];
        let mut abs = [0.0f64; 3];
        for dim in 0..3 {
            let s_tok = tokens[columns.scaled[dim]];
            let i_tok = tokens[columns.image[dim]];
            let scaled: f64 = s_tok
                .parse()
                .map_err(|_| self.parse_err(format!("invalid scaled coordinate '{s_tok}'")))?;
            let image: i64 = i_tok
                .parse()
                .map_err(|_| self.parse_err(format!("invalid image count '{i_tok}'")))?;
            abs[dim] = (scaled + image as f64) * scale[dim];
        }

        frame.seen[idx] = true;
        frame.types[idx] = type_;
        frame.positions[idx] = Vec3::from_array(abs);
        Ok(())
    }
}

impl<R: BufRead> TrajReader for DumpReader<R> {
    fn n_atoms(&self) -> Option<usize> {
        self.n_atoms
    }

    fn read_frame(&mut self) -> LmpResult<Option<RawFrame>> {
        let mut frame = PendingFrame::new();
        loop {
            let Some(line) = self.next_line()? else {
                if self.state == State::AwaitingFrame && frame.is_empty() {
                    return Ok(None);
                }
                return Err(LmpError::Parse(format!(
                    "dump ends inside a frame ({:?}) after line {}",
                    self.state, self.line_no
                )));
            };
            let trimmed = line.trim();
            let item = trimmed.strip_prefix("ITEM:").map(str::trim);

            match self.state {
                State::AwaitingFrame => {
                    if trimmed.is_empty() {
                        continue;
                    }
                    let Some(item) = item else {
                        return Err(self.parse_err(
                            "record outside any section; atom count does not match the atom records",
                        ));
                    };
                    self.start_section(item, &mut frame)?;
                    if let State::ReadingAtoms { remaining: 0 } = self.state {
                        return self.finish_frame(frame);
                    }
                }
                State::ReadingTimestep => {
                    let step = trimmed
                        .parse::<u64>()
                        .map_err(|_| self.parse_err(format!("invalid timestep '{trimmed}'")))?;
                    frame.timestep = Some(step);
                    self.state = State::AwaitingFrame;
                }
                State::ReadingAtomCount => {
                    let n = trimmed
                        .parse::<usize>()
                        .map_err(|_| self.parse_err(format!("invalid atom count '{trimmed}'")))?;
                    frame.n_atoms = Some(n);
                    self.state = State::AwaitingFrame;
                }
                State::ReadingBoxBounds { dim } => {
                    if item.is_some() {
                        return Err(self.parse_err(format!(
                            "expected 3 box bound records, found {dim}"
                        )));
                    }
                    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
                    if tokens.len() < 2 {
                        return Err(self.parse_err("truncated box bound record"));
                    }
                    for (k, tok) in tokens[..2].iter().enumerate() {
                        frame.bounds[dim][k] = tok
                            .parse()
                            .map_err(|_| self.parse_err(format!("invalid box bound '{tok}'")))?;
                    }
                    if dim == 2 {
                        let box_ =
                            SimBox::from_bounds(frame.bounds).map_err(|e| self.parse_err(e))?;
                        frame.box_ = Some(box_);
                        self.state = State::AwaitingFrame;
                    } else {
                        self.state = State::ReadingBoxBounds { dim: dim + 1 };
                    }
                }
                State::ReadingAtoms { remaining } => {
                    if item.is_some() || trimmed.is_empty() {
                        let declared = frame.positions.len();
                        return Err(self.parse_err(format!(
                            "expected {declared} atom records, found {}",
                            declared - remaining
                        )));
                    }
                    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
                    self.read_atom(&tokens, &mut frame)?;
                    if remaining == 1 {
                        return self.finish_frame(frame);
                    }
                    self.state = State::ReadingAtoms {
                        remaining: remaining - 1,
                    };
                }
            }
        }
    }
}

/// Reads every frame of a dump file into memory.
pub fn read_dump(path: impl AsRef<Path>, options: DumpOptions) -> LmpResult<Trajectory> {
    let path = path.as_ref();
    let mut reader = DumpReader::open(path, options)?;
    let traj = reader.read_all()?;
    log::info!(
        "read {} frames of {} atoms from {}",
        traj.n_frames(),
        traj.n_atoms,
        path.display()
    );
    Ok(traj)
}

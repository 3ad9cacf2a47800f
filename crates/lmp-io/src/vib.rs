use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lmp_core::error::{LmpError, LmpResult};

/// First column of every non-empty, non-comment line, in cm^-1.
pub fn parse_vibrational_frequencies<R: BufRead>(reader: R) -> LmpResult<Vec<f64>> {
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(first) = line.split_whitespace().next() else {
            continue;
        };
        if first.starts_with('#') {
            continue;
        }
        let value = first
            .parse::<f64>()
            .map_err(|_| LmpError::parse_at(idx + 1, format!("invalid frequency '{first}'")))?;
        out.push(value);
    }
    if out.is_empty() {
        return Err(LmpError::InsufficientData(
            "no vibrational frequencies found".into(),
        ));
    }
    Ok(out)
}

pub fn read_vibrational_frequencies(path: impl AsRef<Path>) -> LmpResult<Vec<f64>> {
    let file = File::open(path.as_ref())?;
    parse_vibrational_frequencies(BufReader::new(file))
}

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lmp_core::error::{LmpError, LmpResult};

/// Uncompressed `(XY..XY)` spectrum from a JCAMP-DX file. Ordinates are
/// scaled by `##YFACTOR=`; abscissae are taken as written, `##XFACTOR=` is
/// not applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

fn label_value(line: &str, label: &str, line_no: usize) -> LmpResult<Option<f64>> {
    let Some(rest) = line.strip_prefix(label) else {
        return Ok(None);
    };
    rest.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| LmpError::parse_at(line_no, format!("invalid value for {label}")))
}

pub fn parse_jcamp<R: BufRead>(reader: R) -> LmpResult<Spectrum> {
    let mut y_factor = 1.0;
    let mut delta_x = 1.0;
    let mut in_data = false;
    let mut saw_data = false;
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.starts_with("##") {
            in_data = false;
            if let Some(v) = label_value(trimmed, "##YFACTOR=", line_no)? {
                y_factor = v;
            } else if let Some(v) = label_value(trimmed, "##DELTAX=", line_no)? {
                delta_x = v;
            } else if trimmed.starts_with("##XYDATA=") {
                in_data = true;
                saw_data = true;
            }
            continue;
        }
        if !in_data || trimmed.is_empty() {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let x0: f64 = first
            .parse()
            .map_err(|_| LmpError::parse_at(line_no, format!("invalid abscissa '{first}'")))?;
        for (i, tok) in tokens.enumerate() {
            let v: f64 = tok
                .parse()
                .map_err(|_| LmpError::parse_at(line_no, format!("invalid ordinate '{tok}'")))?;
            x.push(x0 + i as f64 * delta_x);
            y.push(v * y_factor);
        }
    }

    if !saw_data {
        return Err(LmpError::MarkerNotFound("##XYDATA= block".into()));
    }
    Ok(Spectrum { x, y })
}

pub fn read_jcamp(path: impl AsRef<Path>) -> LmpResult<Spectrum> {
    let file = File::open(path.as_ref())?;
    parse_jcamp(BufReader::new(file))
}

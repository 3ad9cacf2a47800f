use lmp_core::error::{LmpError, LmpResult};

/// Means of consecutive non-overlapping blocks of `n` points; a trailing
/// partial block is dropped.
pub fn block_average(x: &[f64], n: usize) -> LmpResult<Vec<f64>> {
    if n == 0 {
        return Err(LmpError::Invalid("block size must be at least 1".into()));
    }
    Ok(x.chunks_exact(n)
        .map(|block| block.iter().sum::<f64>() / n as f64)
        .collect())
}

/// Means over windows whose edges grow geometrically by `base`
/// (default `10^(1 / points_per_decade)`).
///
/// Windows start as single points and never shrink, so early samples are
/// kept at full resolution. The last incomplete window is dropped.
pub fn log_average(x: &[f64], points_per_decade: f64, base: Option<f64>) -> LmpResult<Vec<f64>> {
    let base = match base {
        Some(b) => b,
        None => {
            if !(points_per_decade > 0.0) {
                return Err(LmpError::Invalid(format!(
                    "points per decade must be positive, got {points_per_decade}"
                )));
            }
            10f64.powf(1.0 / points_per_decade)
        }
    };
    if !base.is_finite() || base <= 1.0 {
        return Err(LmpError::Invalid(format!(
            "logarithmic base must be larger than 1, got {base}"
        )));
    }
    let mut out = Vec::new();
    let mut floor = 0usize;
    let mut ceil = 1usize;
    let mut next_ceil = 1.0f64;
    while ceil < x.len() {
        let window = &x[floor..ceil];
        out.push(window.iter().sum::<f64>() / window.len() as f64);
        floor = ceil;
        while next_ceil as usize == ceil {
            next_ceil *= base;
        }
        ceil = next_ceil as usize;
    }
    Ok(out)
}

/// Moving average over `n` points, only where the window fits entirely.
pub fn boxcar(x: &[f64], n: usize) -> LmpResult<Vec<f64>> {
    if n == 0 || n > x.len() {
        return Err(LmpError::Invalid(format!(
            "boxcar width {n} must be between 1 and the series length {}",
            x.len()
        )));
    }
    let inv = 1.0 / n as f64;
    let mut sum: f64 = x[..n].iter().sum();
    let mut out = Vec::with_capacity(x.len() - n + 1);
    out.push(sum * inv);
    for i in n..x.len() {
        sum += x[i] - x[i - n];
        out.push(sum * inv);
    }
    Ok(out)
}

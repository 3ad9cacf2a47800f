use crate::error::{LmpError, LmpResult};
use crate::table::ThermoTable;

fn require(x: &[f64], min: usize, what: &str) -> LmpResult<()> {
    if x.len() < min {
        return Err(LmpError::InsufficientData(format!(
            "{what} needs at least {min} samples, got {}",
            x.len()
        )));
    }
    Ok(())
}

pub fn mean(x: &[f64]) -> LmpResult<f64> {
    require(x, 1, "mean")?;
    Ok(x.iter().sum::<f64>() / x.len() as f64)
}

/// Population variance (divides by `n`).
pub fn variance(x: &[f64]) -> LmpResult<f64> {
    let m = mean(x)?;
    Ok(x.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / x.len() as f64)
}

/// Unbiased variance (divides by `n - 1`).
pub fn sample_variance(x: &[f64]) -> LmpResult<f64> {
    require(x, 2, "sample variance")?;
    let m = mean(x)?;
    Ok(x.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (x.len() - 1) as f64)
}

/// Unbiased covariance (divides by `n - 1`).
pub fn covariance(x: &[f64], y: &[f64]) -> LmpResult<f64> {
    if x.len() != y.len() {
        return Err(LmpError::Mismatch(format!(
            "covariance of series with lengths {} and {}",
            x.len(),
            y.len()
        )));
    }
    require(x, 2, "covariance")?;
    let mx = mean(x)?;
    let my = mean(y)?;
    let sum: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    Ok(sum / (x.len() - 1) as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Quantile `q` in `[0, 1]` of ascending `sorted`, interpolating linearly
/// between the samples at positions `floor(q (n - 1))` and `ceil(q (n - 1))`.
pub fn quantile(sorted: &[f64], q: f64) -> LmpResult<f64> {
    require(sorted, 1, "quantile")?;
    if !(0.0..=1.0).contains(&q) {
        return Err(LmpError::Invalid(format!("quantile {q} outside [0, 1]")));
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// Per-column count, mean, unbiased standard deviation, range and quartiles.
pub fn describe(table: &ThermoTable) -> LmpResult<Vec<ColumnSummary>> {
    let mut out = Vec::with_capacity(table.n_columns());
    for name in table.columns() {
        let mut values = table.column(name)?;
        let std = if values.len() > 1 {
            sample_variance(&values)?.sqrt()
        } else {
            0.0
        };
        let mean = mean(&values)?;
        values.sort_by(|a, b| a.total_cmp(b));
        out.push(ColumnSummary {
            name: name.clone(),
            count: values.len(),
            mean,
            std,
            min: values[0],
            q25: quantile(&values, 0.25)?,
            median: quantile(&values, 0.5)?,
            q75: quantile(&values, 0.75)?,
            max: values[values.len() - 1],
        });
    }
    Ok(out)
}

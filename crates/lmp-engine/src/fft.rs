use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Forward and inverse transforms of one fixed length.
pub(crate) struct PaddedFft {
    size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl PaddedFft {
    pub(crate) fn new(size: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        Self {
            size,
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
        }
    }

    /// Spectrum of `series - offset`, zero-padded to the transform length.
    pub(crate) fn forward(&self, series: &[f64], offset: f64) -> Vec<Complex<f64>> {
        let mut buf = vec![Complex { re: 0.0, im: 0.0 }; self.size];
        for (dst, &v) in buf.iter_mut().zip(series) {
            dst.re = v - offset;
        }
        self.forward.process(&mut buf);
        buf
    }

    /// Inverse transform normalised by the transform length.
    pub(crate) fn inverse_real(&self, mut buf: Vec<Complex<f64>>, keep: usize) -> Vec<f64> {
        self.inverse.process(&mut buf);
        let scale = 1.0 / self.size as f64;
        buf.iter().take(keep).map(|c| c.re * scale).collect()
    }
}

/// `S(m) = sum_k a[k] * b[k + m]` for `m = 0..n`, no centering.
pub(crate) fn lagged_product_sums(a: &[f64], b: &[f64]) -> Vec<f64> {
    let n = a.len();
    let fft = PaddedFft::new(2 * n);
    let fa = fft.forward(a, 0.0);
    let fb = fft.forward(b, 0.0);
    let prod: Vec<Complex<f64>> = fa.iter().zip(&fb).map(|(x, y)| x.conj() * y).collect();
    fft.inverse_real(prod, n)
}

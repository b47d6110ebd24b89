//! Numerical support routines shared by the pipeline stages.
//!
//! **Module Organization**:
//! - `fft` - forward FFT, spectrum shift, frequency axis
//! - `filter` - linear convolution, windowed-sinc design, windows
//! - `resample` - polyphase-style rational resampling

pub mod fft;
pub mod filter;
pub mod resample;

/// Evenly stepped values from `start` while the running value stays at or
/// below `end`.
///
/// `step` must be positive. The end point is included when the step lands
/// on it, so
/// `arange(0.0, n as f64 * ts, ts)` yields `n + 1` points. Downstream
/// elementwise products truncate to the shorter operand, which is the
/// behavior the pipeline is built around.
pub fn arange(start: f64, end: f64, step: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut num = start;
    while num <= end {
        out.push(num);
        num += step;
    }
    out
}

/// `len` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, len: usize) -> Result<Vec<f64>, String> {
    if len < 2 {
        return Err(format!("linspace needs at least 2 points, got {}", len));
    }
    let step = (end - start) / (len - 1) as f64;
    Ok((0..len).map(|i| start + step * i as f64).collect())
}

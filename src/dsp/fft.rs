//! Forward FFT and spectrum helpers.
//!
//! Backed by `rustfft`, so any buffer length is valid, not just powers of
//! two.

use num::complex::Complex64;
use rustfft::FftPlanner;

/// Forward FFT of `input`, returned as a new vector.
pub fn fft(input: &[Complex64]) -> Result<Vec<Complex64>, String> {
    if input.is_empty() {
        return Err("cannot FFT an empty buffer".to_string());
    }
    let mut buf = input.to_vec();
    let mut planner = FftPlanner::<f64>::new();
    let transform = planner.plan_fft_forward(buf.len());
    transform.process(&mut buf);
    Ok(buf)
}

/// Rotate a spectrum so the zero-frequency bin sits at `len / 2`.
pub fn fftshift(spectrum: &[f64]) -> Vec<f64> {
    let mut out = spectrum.to_vec();
    let n = out.len();
    if n > 1 {
        out.rotate_right(n / 2);
    }
    out
}

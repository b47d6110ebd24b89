//! Rational resampling by zero-stuffing, low-pass smoothing, and decimation.

use num::complex::Complex64;

use crate::buffer::ComplexBuffer;
use crate::dsp::filter;

/// Resample `input` by the rational factor `up / down`.
///
/// The input is zero-stuffed by `up`, smoothed with a windowed-sinc low-pass
/// of `10 * max(up, down)` taps at cutoff `1 / max(up, down)`, decimated by
/// `down`, and finally rescaled so the output peak magnitude matches the
/// input peak magnitude.
pub fn resample_poly(input: &ComplexBuffer, up: usize, down: usize) -> Result<ComplexBuffer, String> {
    if input.is_empty() {
        return Err("cannot resample an empty buffer".to_string());
    }
    if up == 0 || down == 0 {
        return Err(format!("resample factors must be positive, got {}/{}", up, down));
    }

    // zero-stuff
    let mut upsampled = vec![Complex64::new(0.0, 0.0); input.len() * up];
    for (i, &sample) in input.samples().iter().enumerate() {
        upsampled[i * up] = sample;
    }

    let greater = up.max(down);
    let taps = filter::firwin(10 * greater, 1.0 / greater as f64)?;
    let smoothed = filter::convolve_same(&upsampled, &taps)?;

    // decimate
    let out_len = smoothed.len() / down;
    let decimated: Vec<Complex64> = smoothed.iter().step_by(down).take(out_len).copied().collect();

    let peak_sqr = decimated
        .iter()
        .map(|s| s.norm_sqr())
        .fold(0.0f64, f64::max);
    if peak_sqr == 0.0 || !peak_sqr.is_finite() {
        return Err("resampled signal has no energy to rescale against".to_string());
    }

    // restore the input scale
    let gain = input.peak_magnitude() / peak_sqr.sqrt();
    Ok(ComplexBuffer::new(
        decimated.into_iter().map(|s| s * gain).collect(),
    ))
}

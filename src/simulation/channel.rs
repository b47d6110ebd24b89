//! Fractional delay and carrier offset impairment.

use num::complex::Complex64;

use crate::buffer::ComplexBuffer;
use crate::dsp::{arange, filter};

/// Delay a waveform by a fractional sample and shift it in frequency.
///
/// The delay comes from a Hamming-windowed sinc filter with `taps`
/// coefficients, normalized to unity gain so signal power is untouched.
/// The carrier shift multiplies by `exp(j * 2 pi * freq_offset * t)` over
/// the filtered waveform. Output length grows by `taps - 1` samples from
/// the full convolution.
pub fn apply_channel_offset(
    input: &ComplexBuffer,
    fs: f64,
    delay: f64,
    taps: usize,
    freq_offset: f64,
) -> Result<ComplexBuffer, String> {
    if input.is_empty() {
        return Err("cannot impair an empty waveform".to_string());
    }
    if !fs.is_finite() || fs <= 0.0 {
        return Err(format!("sample rate must be positive, got {}", fs));
    }
    if taps < 2 {
        return Err(format!("delay filter needs at least 2 taps, got {}", taps));
    }

    // delay filter: sinc displaced by the fractional delay, windowed so it
    // decays to zero at both ends
    let half = (taps / 2) as f64;
    let n = arange(-half, half, 1.0);
    let displaced: Vec<f64> = n.iter().map(|v| v - delay).collect();
    let h = filter::sinc(&displaced);
    let window = filter::hamming(taps);
    let windowed: Vec<f64> = h.iter().zip(&window).map(|(a, b)| a * b).collect();
    let gain: f64 = windowed.iter().sum();
    if gain == 0.0 || !gain.is_finite() {
        return Err("delay filter has zero gain".to_string());
    }
    let normalized: Vec<f64> = windowed.iter().map(|v| v / gain).collect();

    let delayed = filter::convolve(input.samples(), &normalized)?;

    let ts = 1.0 / fs;
    let t = arange(0.0, ts * delayed.len() as f64, ts);
    let shifted = ComplexBuffer::new(delayed).elementwise_mul(&ComplexBuffer::new(
        t.iter()
            .map(|&t| Complex64::from_polar(1.0, 2.0 * std::f64::consts::PI * freq_offset * t))
            .collect(),
    ));
    Ok(shifted)
}

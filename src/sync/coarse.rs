//! Coarse carrier frequency estimation and correction.
//!
//! Squaring a binary-phase signal strips the modulation and leaves a tone
//! at twice the carrier offset. The stage locates that tone on the shifted
//! spectrum, halves it, and de-rotates the input by the estimate. Only a
//! single dominant peak is assumed; multipath or multiple strong tones are
//! not handled.

use num::complex::Complex64;
use tracing::{debug, instrument};

use crate::buffer::ComplexBuffer;
use crate::dsp::{arange, fft, linspace};

/// Estimate the coarse carrier offset of `input` and de-rotate it away.
#[instrument(skip(input), fields(input_len = input.len()))]
pub fn correct_coarse_frequency(input: &ComplexBuffer, fs: f64) -> Result<ComplexBuffer, String> {
    if input.is_empty() {
        return Err("cannot estimate frequency of an empty buffer".to_string());
    }
    if !fs.is_finite() || fs <= 0.0 {
        return Err(format!("sample rate must be positive, got {}", fs));
    }

    let squared = input.squared();
    let spectrum = fft::fft(squared.samples())?;
    let psd = fft::fftshift(&spectrum.iter().map(|s| s.norm()).collect::<Vec<f64>>());
    let axis = linspace(-fs / 2.0, fs / 2.0, psd.len())?;

    // first maximum wins on ties
    let mut peak = 0usize;
    for (i, &value) in psd.iter().enumerate() {
        if value > psd[peak] {
            peak = i;
        }
    }
    // squaring doubled the offset
    let offset = axis[peak] / 2.0;

    debug!(offset_hz = offset, peak_bin = peak, "coarse frequency estimate");

    let ts = 1.0 / fs;
    let t = arange(0.0, ts * input.len() as f64, ts);
    let derotator = ComplexBuffer::new(
        t.iter()
            .map(|&t| Complex64::from_polar(1.0, -2.0 * std::f64::consts::PI * offset * t))
            .collect(),
    );

    // the time vector may run one sample long; the product truncates
    Ok(input.elementwise_mul(&derotator))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone_with_offset(n: usize, fs: f64, offset_hz: f64, symbols: &[f64]) -> ComplexBuffer {
        let samples = (0..n)
            .map(|i| {
                let t = i as f64 / fs;
                let carrier = Complex64::from_polar(
                    1.0,
                    2.0 * std::f64::consts::PI * offset_hz * t,
                );
                carrier * symbols[i % symbols.len()]
            })
            .collect();
        ComplexBuffer::new(samples)
    }

    #[test]
    fn removes_a_known_offset_from_modulated_data() {
        let fs = 1.0e6;
        let n = 512;
        // pseudo-random bipolar symbols so the raw spectrum is spread out
        let symbols: Vec<f64> = (0..n)
            .map(|i| if (i * 2654435761usize) % 7 < 3 { 1.0 } else { -1.0 })
            .collect();
        // pick an offset that lands exactly on a shifted FFT bin so the
        // estimate is exact: bin spacing fs/n, doubled offset on a bin
        let offset = fs / 512.0 * 16.0;
        let input = tone_with_offset(n, fs, offset, &symbols);

        let corrected = correct_coarse_frequency(&input, fs).unwrap();
        assert_eq!(corrected.len(), n);

        // the doubled offset sat 16 bins off center before correction; the
        // frequency axis granularity leaves at most a half-bin residual
        assert_eq!(shifted_peak_distance_from_center(&input), 32);
        assert!(shifted_peak_distance_from_center(&corrected) <= 1);
    }

    fn shifted_peak_distance_from_center(buf: &ComplexBuffer) -> usize {
        let squared = buf.squared();
        let spectrum = fft::fft(squared.samples()).unwrap();
        let psd = fft::fftshift(&spectrum.iter().map(|s| s.norm()).collect::<Vec<f64>>());
        let mut peak = 0usize;
        for (i, &value) in psd.iter().enumerate() {
            if value > psd[peak] {
                peak = i;
            }
        }
        peak.abs_diff(psd.len() / 2)
    }

    #[test]
    fn zero_offset_input_passes_through_unchanged_for_odd_lengths() {
        // with an odd length the shifted axis has a true zero at its
        // center bin, so a centered peak maps to exactly zero offset
        let fs = 1.0e6;
        let n = 255;
        let symbols: Vec<f64> = (0..n).map(|i| if i % 3 == 0 { -1.0 } else { 1.0 }).collect();
        let input = tone_with_offset(n, fs, 0.0, &symbols);
        let corrected = correct_coarse_frequency(&input, fs).unwrap();
        for (a, b) in input.samples().iter().zip(corrected.samples()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn rejects_empty_input_and_bad_rate() {
        let buf = ComplexBuffer::from_real(vec![1.0; 8]);
        assert!(correct_coarse_frequency(&ComplexBuffer::zeros(0), 1.0).is_err());
        assert!(correct_coarse_frequency(&buf, 0.0).is_err());
    }
}

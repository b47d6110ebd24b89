//! Matched-filter frame synchronization.
//!
//! Cross-correlates the symbol stream against the time-reversed preamble
//! and slices the encoded payload out behind the correlation peak. There
//! is no secondary validation of the peak; a spurious maximum at low SNR
//! surfaces later as corrupted bits and a failed CRC.

use bitvec::prelude::*;
use num::complex::Complex64;
use tracing::{debug, instrument};

use crate::buffer::ComplexBuffer;
use crate::dsp::filter;

/// Locate the preamble in `input` and return the encoded-data region.
///
/// `encoded_len` is the codeword length in symbols. The correlation runs
/// over an affine-rescaled copy of the input; the payload window is sliced
/// from the original samples. A window falling outside the buffer reports
/// an error instead of wrapping, which is the one detectable sync failure.
#[instrument(skip(input, preamble), fields(input_len = input.len()))]
pub fn synchronize_frame(
    input: &ComplexBuffer,
    preamble: &BitSlice<u8, Msb0>,
    encoded_len: usize,
) -> Result<ComplexBuffer, String> {
    if input.is_empty() {
        return Err("cannot frame-sync an empty buffer".to_string());
    }
    if preamble.is_empty() {
        return Err("preamble must not be empty".to_string());
    }
    if encoded_len == 0 {
        return Err("encoded length must be at least 1 symbol".to_string());
    }

    let scale = input.magnitudes().iter().sum::<f64>() / input.len() as f64;

    // rescale both rails before correlating; the slice below still reads
    // the untouched input
    let rescaled: Vec<Complex64> = input
        .samples()
        .iter()
        .map(|s| Complex64::new((s.re + scale) / 2.0 * scale, (s.im + scale) / 2.0 * scale))
        .collect();

    let matched: Vec<f64> = preamble
        .iter()
        .rev()
        .map(|b| if *b { 1.0 } else { 0.0 })
        .collect();
    let crosscorr = filter::convolve(&rescaled, &matched)?;

    // complex maximum ordered by real part, imaginary part as tiebreak;
    // first maximum wins
    let mut idx = 0usize;
    for (i, c) in crosscorr.iter().enumerate() {
        let best = &crosscorr[idx];
        if c.re > best.re || (c.re == best.re && c.im > best.im) {
            idx = i;
        }
    }

    let start = idx as i64 - preamble.len() as i64 + 1;
    let end = idx as i64 + encoded_len as i64 + 1;
    if start < 0 || end > input.len() as i64 {
        return Err(format!(
            "correlation window [{}, {}) falls outside the {}-symbol buffer",
            start,
            end,
            input.len()
        ));
    }

    debug!(peak = idx, start, end, "preamble located");

    let payload_window = &input.samples()[start as usize..end as usize];
    let recovered = payload_window[preamble.len()..].to_vec();
    Ok(ComplexBuffer::new(recovered))
}

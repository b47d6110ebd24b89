//! Mueller & Muller symbol timing recovery.
//!
//! The input is first interpolated by a fixed factor of 16 to approximate
//! continuous time, then a decision-directed loop walks the interpolated
//! buffer picking one sample per symbol. The fractional timing estimate
//! `mu` carries forward between iterations; the integer index advances by
//! `floor(mu)` each symbol.

use num::complex::Complex64;
use tracing::{debug, instrument};

use crate::buffer::ComplexBuffer;
use crate::dsp::resample::resample_poly;
use crate::params::{MM_GAIN, MM_INTERP};

/// Recover one complex sample per symbol from an oversampled buffer.
///
/// The first two loop outputs are warm-up and are discarded. The loop ends
/// when either the output index reaches the input length or the input index
/// runs out of interpolated samples to read.
#[instrument(skip(input), fields(input_len = input.len()))]
pub fn recover_timing(input: &ComplexBuffer, sps: usize) -> Result<ComplexBuffer, String> {
    if input.is_empty() {
        return Err("cannot recover timing from an empty buffer".to_string());
    }
    if sps == 0 {
        return Err("samples per symbol must be at least 1".to_string());
    }

    let interpolated = resample_poly(input, MM_INTERP, 1)?;
    let interp = interpolated.samples();
    let n = input.len();

    let mut out = vec![Complex64::new(0.0, 0.0); n + 10];
    let mut rail = vec![Complex64::new(0.0, 0.0); n + 10];
    let mut mu = 0.0f64;
    let mut i_in: i64 = 0;
    let mut i_out: usize = 2;

    while i_out < n && (i_in as usize) + MM_INTERP < n {
        let pick = i_in as usize * MM_INTERP + (mu * MM_INTERP as f64).floor() as usize;
        out[i_out] = interp[pick];
        rail[i_out] = Complex64::new(
            (out[i_out].re > 0.0) as u8 as f64,
            (out[i_out].im > 0.0) as u8 as f64,
        );

        let x = (rail[i_out] - rail[i_out - 2]) * out[i_out - 1].conj();
        let y = (out[i_out] - out[i_out - 2]) * rail[i_out - 1].conj();
        let mm_val = (y - x).re;

        mu += sps as f64 + MM_GAIN * mm_val;
        i_in += mu.floor() as i64;
        if i_in < 0 {
            return Err(format!(
                "timing loop diverged (index went negative at output {})",
                i_out
            ));
        }
        mu -= mu.floor();
        i_out += 1;
    }

    debug!(symbols = i_out - 2, input_len = n, "timing recovery complete");

    Ok(ComplexBuffer::new(out[2..i_out].to_vec()))
}

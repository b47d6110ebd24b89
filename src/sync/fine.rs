//! Costas loop fine frequency and phase tracking.
//!
//! A per-sample second-order loop for binary phase signals. The coarse
//! stage is expected to have removed gross offset already; this loop only
//! tracks the residual drift left behind.

use num::complex::Complex64;
use tracing::{debug, instrument};

use crate::buffer::ComplexBuffer;
use crate::params::{COSTAS_ALPHA, COSTAS_BETA};

/// De-rotate `input` sample by sample while tracking phase and frequency.
///
/// Returns the corrected buffer and the per-sample frequency estimate in
/// Hz, useful as a lock diagnostic.
#[instrument(skip(input), fields(input_len = input.len()))]
pub fn track_carrier(input: &ComplexBuffer, fs: f64) -> Result<(ComplexBuffer, Vec<f64>), String> {
    use std::f64::consts::PI;

    if input.is_empty() {
        return Err("cannot track carrier on an empty buffer".to_string());
    }
    if !fs.is_finite() || fs <= 0.0 {
        return Err(format!("sample rate must be positive, got {}", fs));
    }

    let n = input.len();
    let mut out = Vec::with_capacity(n);
    let mut freq_log = Vec::with_capacity(n);
    let mut phase = 0.0f64;
    let mut freq = 0.0f64;

    for &sample in input.samples() {
        let corrected = sample * Complex64::from_polar(1.0, -phase);
        out.push(corrected);

        // binary phase error: the product is zero when the symbol sits on
        // the real axis
        let error = corrected.re * corrected.im;

        freq += COSTAS_BETA * error;
        freq_log.push(freq * fs / (2.0 * PI));
        phase += freq + COSTAS_ALPHA * error;

        // keep the phase in [0, 2pi)
        while phase >= 2.0 * PI {
            phase -= 2.0 * PI;
        }
        while phase < 0.0 {
            phase += 2.0 * PI;
        }
    }

    debug!(
        final_freq_hz = freq_log.last().copied().unwrap_or(0.0),
        "carrier tracking complete"
    );

    Ok((ComplexBuffer::new(out), freq_log))
}

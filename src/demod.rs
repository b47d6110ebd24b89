//! Hard-decision symbol demodulation.

use bitvec::prelude::*;
use num::complex::Complex64;

use crate::buffer::ComplexBuffer;
use crate::params::Modulation;

/// Map synchronized symbols to hard bit decisions.
///
/// Binary phase: each symbol goes to whichever of the two reference points
/// `-gain` (bit 0) and `+gain` (bit 1) is closer on the complex plane.
/// `channel_gain` models the channel impulse response as a plain scalar;
/// the pipeline always passes 1 because earlier stages already rescaled.
pub fn demodulate(
    symbols: &ComplexBuffer,
    scheme: Modulation,
    channel_gain: f64,
) -> Result<BitVec<u8, Msb0>, String> {
    if !channel_gain.is_finite() || channel_gain <= 0.0 {
        return Err(format!(
            "channel gain must be positive, got {}",
            channel_gain
        ));
    }

    match scheme {
        Modulation::Bpsk => {
            let reference_zero = Complex64::new(-channel_gain, 0.0);
            let reference_one = Complex64::new(channel_gain, 0.0);
            Ok(symbols
                .samples()
                .iter()
                .map(|&s| (s - reference_zero).norm() >= (s - reference_one).norm())
                .collect())
        }
    }
}

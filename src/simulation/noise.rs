//! Additive and multiplicative channel noise.

use num::complex::Complex64;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::buffer::ComplexBuffer;

/// Add complex AWGN and multiplicative phase noise to a waveform.
///
/// Per sample: `out = (z + awgn) * exp(j * n * phase_noise_strength)` with
/// the AWGN rails drawn from `Normal(0, std_dev)` and scaled by
/// `1 / (sqrt(2) * sqrt(noise_power))`. The generator state is owned by the
/// caller, so runs are reproducible with a seeded RNG.
pub fn add_channel_noise<R: Rng>(
    rng: &mut R,
    input: &ComplexBuffer,
    std_dev: f64,
    phase_noise_strength: f64,
    noise_power: f64,
) -> Result<ComplexBuffer, String> {
    if noise_power <= 0.0 || !noise_power.is_finite() {
        return Err(format!(
            "noise power must be positive, got {}",
            noise_power
        ));
    }
    let normal =
        Normal::new(0.0, std_dev).map_err(|e| format!("bad noise deviation {}: {}", std_dev, e))?;

    let scale = 1.0 / (2.0f64.sqrt() * noise_power.sqrt());
    let out = input
        .samples()
        .iter()
        .map(|&z| {
            let awgn = Complex64::new(
                normal.sample(rng) * scale,
                normal.sample(rng) * scale,
            );
            let phase = Complex64::from_polar(1.0, normal.sample(rng) * phase_noise_strength);
            (z + awgn) * phase
        })
        .collect();
    Ok(ComplexBuffer::new(out))
}

//! Pulse train generation and root-raised-cosine pulse shaping.
//!
//! The transmit side places one antipodal impulse per bit and convolves the
//! train with an RRC filter, producing the complex baseband waveform that
//! goes to the radio. The matched half of the RRC pair lives in the
//! receiver that captures the waveform, so only the transmit filter is
//! generated here.

use bitvec::prelude::*;

use crate::buffer::ComplexBuffer;
use crate::dsp::filter;

/// Root-raised-cosine filter coefficients.
///
/// Computes `n` taps centered at `n / 2` for symbol period `ts` at sample
/// rate `fs`. The two removable singularities of the closed form,
/// `t == 0` and `t == ±ts / (4 alpha)`, get their limit values; the second
/// pair is only tested when `alpha` is nonzero so a zero roll-off never
/// divides by zero.
///
/// # Arguments
/// * `n` - Number of taps
/// * `alpha` - Roll-off factor in [0, 1]
/// * `ts` - Symbol period in seconds
/// * `fs` - Sample rate in Hz
pub fn rrc_taps(n: usize, alpha: f64, ts: f64, fs: f64) -> Result<Vec<f64>, String> {
    use std::f64::consts::PI;

    if n == 0 {
        return Err("RRC filter needs at least one tap".to_string());
    }
    if !(0.0..=1.0).contains(&alpha) {
        return Err(format!("roll-off factor must be in [0, 1], got {}", alpha));
    }
    if !fs.is_finite() || fs <= 0.0 {
        return Err(format!("sample rate must be positive, got {}", fs));
    }
    if !ts.is_finite() || ts <= 0.0 {
        return Err(format!("symbol period must be positive, got {}", ts));
    }

    let t_delta = 1.0 / fs;
    let mut taps = vec![0.0f64; n];
    for (x, tap) in taps.iter_mut().enumerate() {
        let t = (x as f64 - n as f64 / 2.0) * t_delta;
        *tap = if t == 0.0 {
            1.0 - alpha + 4.0 * alpha / PI
        } else if alpha != 0.0 && (t == ts / (4.0 * alpha) || t == -ts / (4.0 * alpha)) {
            (alpha / 2.0f64.sqrt())
                * ((1.0 + 2.0 / PI) * (PI / (4.0 * alpha)).sin()
                    + (1.0 - 2.0 / PI) * (PI / (4.0 * alpha)).cos())
        } else {
            ((PI * t * (1.0 - alpha) / ts).sin()
                + 4.0 * alpha * (t / ts) * (PI * t * (1.0 + alpha) / ts).cos())
                / (PI * t * (1.0 - (4.0 * alpha * t / ts).powi(2)) / ts)
        };
    }
    Ok(taps)
}

/// Expand bits into an antipodal impulse train.
///
/// Each bit lands at index `i * sps` as +1 (bit 1) or -1 (bit 0) with
/// `sps - 1` zeros behind it, so the train length is `bits.len() * sps`.
/// No interpolation happens here; the pulse shaping filter fills the gaps.
pub fn pulse_train(bits: &BitSlice<u8, Msb0>, sps: usize) -> Result<Vec<f64>, String> {
    if bits.is_empty() {
        return Err("cannot build a pulse train from zero bits".to_string());
    }
    if sps == 0 {
        return Err("samples per symbol must be at least 1".to_string());
    }
    let mut train = vec![0.0f64; bits.len() * sps];
    for (i, bit) in bits.iter().enumerate() {
        train[i * sps] = if *bit { 1.0 } else { -1.0 };
    }
    Ok(train)
}

/// Convolve an impulse train with the shaping taps.
///
/// Full linear convolution; the result has length
/// `train.len() + taps.len() - 1` and an all-zero imaginary rail.
pub fn shape(train: &[f64], taps: &[f64]) -> Result<ComplexBuffer, String> {
    let shaped = filter::convolve_real(train, taps)?;
    Ok(ComplexBuffer::from_real(shaped))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: f64 = 2.45e9;

    #[test]
    fn taps_are_symmetric_about_the_center() {
        // centered at n/2, every tap pairs with its mirror; the leading tap
        // is the unpaired edge of the even-length grid
        let n = 65;
        let ts = 8.0 / FS;
        let taps = rrc_taps(n, 0.5, ts, FS).unwrap();
        for i in 1..n {
            assert!(
                (taps[i] - taps[n - i]).abs() < 1e-12,
                "asymmetry at tap {}: {} vs {}",
                i,
                taps[i],
                taps[n - i]
            );
        }
    }

    #[test]
    fn even_tap_counts_are_symmetric_about_the_center() {
        let n = 64;
        let ts = 8.0 / FS;
        let taps = rrc_taps(n, 0.5, ts, FS).unwrap();
        for k in 1..n / 2 {
            assert!(
                (taps[n / 2 + k] - taps[n / 2 - k]).abs() < 1e-12,
                "asymmetry at offset {}",
                k
            );
        }
    }

    #[test]
    fn center_tap_is_the_peak() {
        let n = 64;
        let ts = 8.0 / FS;
        let taps = rrc_taps(n, 0.5, ts, FS).unwrap();
        let center = taps[n / 2];
        assert!((center - (1.0 - 0.5 + 4.0 * 0.5 / std::f64::consts::PI)).abs() < 1e-12);
        for (i, &tap) in taps.iter().enumerate() {
            assert!(tap <= center + 1e-12, "tap {} above center", i);
        }
    }

    #[test]
    fn zero_rolloff_does_not_divide_by_zero() {
        let ts = 8.0 / FS;
        let taps = rrc_taps(64, 0.0, ts, FS).unwrap();
        assert!(taps.iter().all(|t| t.is_finite()));
        // alpha = 0 collapses the closed form to a plain sinc, which is 1
        // at the center
        assert!((taps[32] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_taps_rejected() {
        assert!(rrc_taps(0, 0.5, 1.0, 1.0).is_err());
        assert!(rrc_taps(8, -0.1, 1.0, 1.0).is_err());
        assert!(rrc_taps(8, 0.5, 0.0, 1.0).is_err());
        assert!(rrc_taps(8, 0.5, 1.0, 0.0).is_err());
    }

    #[test]
    fn pulse_train_layout() {
        let bits = bitvec![u8, Msb0; 1, 0, 1];
        let train = pulse_train(&bits, 4).unwrap();
        assert_eq!(train.len(), 12);
        assert_eq!(train[0], 1.0);
        assert_eq!(train[4], -1.0);
        assert_eq!(train[8], 1.0);
        for (i, &v) in train.iter().enumerate() {
            if i % 4 != 0 {
                assert_eq!(v, 0.0, "expected zero fill at {}", i);
            }
        }
    }

    #[test]
    fn pulse_train_rejects_bad_input() {
        let bits = bitvec![u8, Msb0; 1, 0];
        let empty: BitVec<u8, Msb0> = BitVec::new();
        assert!(pulse_train(&empty, 4).is_err());
        assert!(pulse_train(&bits, 0).is_err());
    }

    #[test]
    fn shape_produces_full_convolution_length() {
        let bits = bitvec![u8, Msb0; 1, 0, 1, 1];
        let train = pulse_train(&bits, 8).unwrap();
        let ts = 8.0 / FS;
        let taps = rrc_taps(64, 0.5, ts, FS).unwrap();
        let shaped = shape(&train, &taps).unwrap();
        assert_eq!(shaped.len(), train.len() + taps.len() - 1);
        assert!(shaped.samples().iter().all(|s| s.im == 0.0));
    }
}

//! Moment-based IQ imbalance correction.
//!
//! Estimates receiver gain and phase mismatch between the rails from
//! windowed first and second moments, then applies the 2x2 de-skew
//! transform per sample. Single pass: estimate once, apply once.
//! The transform follows the derivation in
//! https://www.faculty.ece.vt.edu/swe/argus/iqbal.pdf

use num::complex::Complex64;
use tracing::{debug, instrument};

use crate::buffer::ComplexBuffer;

/// Symmetric windowed mean of every element's neighborhood.
///
/// For each index the window reaches `period` elements to both sides,
/// dropping neighbors that fall off either end of the buffer. The walk
/// stops early once both sides are exhausted.
pub fn windowed_means(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![0.0f64; values.len()];
    for (index, slot) in out.iter_mut().enumerate() {
        let mut count = 1.0f64;
        let mut sum = values[index];
        for i in 1..=period {
            let mut left_exhausted = false;
            if index >= i {
                count += 1.0;
                sum += values[index - i];
            } else {
                left_exhausted = true;
            }
            if index + i < values.len() {
                count += 1.0;
                sum += values[index + i];
            } else if left_exhausted {
                break;
            }
        }
        *slot = sum / count;
    }
    out
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Estimate and remove IQ gain/phase mismatch.
///
/// The moment estimate runs on mean-centered rails; the final transform is
/// applied to the raw, uncentered rails.
#[instrument(skip(input), fields(input_len = input.len()))]
pub fn correct_iq_imbalance(
    input: &ComplexBuffer,
    mean_period: usize,
) -> Result<ComplexBuffer, String> {
    if input.is_empty() {
        return Err("cannot correct IQ imbalance on an empty buffer".to_string());
    }
    if mean_period == 0 {
        return Err("mean period must be at least 1".to_string());
    }

    let rail_i = input.real();
    let rail_q = input.imag();

    let bias_i = windowed_means(&rail_i, mean_period);
    let bias_q = windowed_means(&rail_q, mean_period);

    let centered_i: Vec<f64> = rail_i.iter().zip(&bias_i).map(|(v, b)| v - b).collect();
    let centered_q: Vec<f64> = rail_q.iter().zip(&bias_q).map(|(v, b)| v - b).collect();

    let squared_i: Vec<f64> = centered_i.iter().map(|v| v * v).collect();
    let amplitude = (2.0 * mean(&squared_i)).sqrt();
    if !amplitude.is_finite() || amplitude == 0.0 {
        return Err(format!(
            "rail amplitude estimate degenerate: {}",
            amplitude
        ));
    }

    let cross: Vec<f64> = centered_i
        .iter()
        .zip(&centered_q)
        .map(|(i, q)| i * q)
        .collect();
    let sin_psi = (2.0 / amplitude) * mean(&cross);
    if !sin_psi.is_finite() || sin_psi.abs() >= 1.0 {
        return Err(format!(
            "phase mismatch estimate out of range: sin = {}",
            sin_psi
        ));
    }
    let cos_psi = (1.0 - sin_psi * sin_psi).sqrt();

    let a = 1.0 / amplitude;
    let c = -sin_psi / (amplitude * cos_psi);
    let d = 1.0 / cos_psi;

    debug!(amplitude, sin_psi, "imbalance estimate");

    let corrected = rail_i
        .iter()
        .zip(&rail_q)
        .map(|(&i, &q)| Complex64::new(a * i, c * i + d * q))
        .collect();
    Ok(ComplexBuffer::new(corrected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windowed_means_truncate_at_the_edges() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let means = windowed_means(&values, 1);
        assert_eq!(means[0], (1.0 + 2.0) / 2.0);
        assert_eq!(means[2], (2.0 + 3.0 + 4.0) / 3.0);
        assert_eq!(means[4], (4.0 + 5.0) / 2.0);
    }

    #[test]
    fn windowed_means_with_wide_period_cover_everything() {
        let values = vec![2.0, 4.0, 6.0];
        let means = windowed_means(&values, 10);
        for &m in &means {
            assert!((m - 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn balanced_signal_keeps_its_shape() {
        // clean antipodal symbols: amplitude estimate ~1, phase ~0, so the
        // transform only rescales the real rail
        let n = 400;
        let input = ComplexBuffer::from_real(
            (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect(),
        );
        let corrected = correct_iq_imbalance(&input, 100).unwrap();
        assert_eq!(corrected.len(), n);
        for (raw, fixed) in input.samples().iter().zip(corrected.samples()) {
            assert_eq!(raw.re.signum(), fixed.re.signum());
            assert!(fixed.im.abs() < 0.2);
        }
    }

    #[test]
    fn corrects_a_known_phase_skew() {
        // I(t) = cos(wt), Q(t) = sin(wt + psi): after correction the
        // constellation is circular again, so |sample| is near-constant
        let n = 2000;
        let psi = 0.25f64;
        let samples: Vec<Complex64> = (0..n)
            .map(|i| {
                let wt = i as f64 * 0.37;
                Complex64::new(wt.cos(), (wt + psi).sin())
            })
            .collect();
        let input = ComplexBuffer::new(samples);

        let corrected = correct_iq_imbalance(&input, 100).unwrap();
        let mags = corrected.magnitudes();
        let mean_mag = mags.iter().sum::<f64>() / mags.len() as f64;
        let spread = mags
            .iter()
            .map(|m| (m - mean_mag).abs())
            .fold(0.0f64, f64::max);
        assert!(
            spread / mean_mag < 0.15,
            "constellation still elliptic: spread {} of {}",
            spread,
            mean_mag
        );
    }

    #[test]
    fn zero_signal_is_rejected() {
        let input = ComplexBuffer::zeros(64);
        assert!(correct_iq_imbalance(&input, 10).is_err());
    }

    #[test]
    fn empty_and_zero_period_rejected() {
        let input = ComplexBuffer::from_real(vec![1.0, -1.0]);
        assert!(correct_iq_imbalance(&ComplexBuffer::zeros(0), 10).is_err());
        assert!(correct_iq_imbalance(&input, 0).is_err());
    }
}

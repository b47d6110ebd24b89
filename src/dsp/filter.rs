//! Linear convolution and FIR design helpers.

use num::complex::Complex64;

/// Full linear convolution of a complex sequence with real taps.
///
/// Output length is `a.len() + v.len() - 1`.
pub fn convolve(a: &[Complex64], v: &[f64]) -> Result<Vec<Complex64>, String> {
    if a.is_empty() || v.is_empty() {
        return Err(format!(
            "cannot convolve empty sequences (signal={}, taps={})",
            a.len(),
            v.len()
        ));
    }
    let mut out = vec![Complex64::new(0.0, 0.0); a.len() + v.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &vj) in v.iter().enumerate() {
            out[i + j] += ai * vj;
        }
    }
    Ok(out)
}

/// Full linear convolution of two real sequences.
pub fn convolve_real(a: &[f64], v: &[f64]) -> Result<Vec<f64>, String> {
    if a.is_empty() || v.is_empty() {
        return Err(format!(
            "cannot convolve empty sequences (signal={}, taps={})",
            a.len(),
            v.len()
        ));
    }
    let mut out = vec![0.0f64; a.len() + v.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &vj) in v.iter().enumerate() {
            out[i + j] += ai * vj;
        }
    }
    Ok(out)
}

/// Linear convolution trimmed to `max(a.len(), v.len())` samples.
///
/// The trim removes half of the length difference from each side, rounding
/// the left cut down, which keeps the filter group delay centered.
pub fn convolve_same(a: &[Complex64], v: &[f64]) -> Result<Vec<Complex64>, String> {
    let full = convolve(a, v)?;
    let out_len = a.len().max(v.len());
    let remove = (full.len() - out_len) / 2;
    Ok(full[remove..remove + out_len].to_vec())
}

/// Hamming-windowed sinc low-pass prototype with normalized `cutoff`.
///
/// Returns `m + 1` taps; the last tap stays zero and the window runs over
/// `0..m`, matching the reference design this resampler was tuned against.
pub fn firwin(m: usize, cutoff: f64) -> Result<Vec<f64>, String> {
    if m == 0 {
        return Err("firwin needs at least one tap".to_string());
    }
    let mut out = vec![0.0f64; m + 1];
    let half = (m / 2) as isize;
    for (i, tap) in out.iter_mut().enumerate().take(m) {
        let window = 0.54 - 0.46 * (2.0 * std::f64::consts::PI * i as f64 / m as f64).cos();
        let centered = i as isize - half;
        let lowpass = if centered != 0 {
            let t = centered as f64;
            (cutoff * std::f64::consts::PI * t).sin() / (std::f64::consts::PI * t)
        } else {
            cutoff
        };
        *tap = window * lowpass;
    }
    Ok(out)
}

/// Hamming window of length `m`.
pub fn hamming(m: usize) -> Vec<f64> {
    match m {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => (0..m)
            .map(|i| {
                0.54 - 0.46 * (2.0 * std::f64::consts::PI * i as f64 / (m - 1) as f64).cos()
            })
            .collect(),
    }
}

/// Normalized sinc, `sin(pi x) / (pi x)` with the removable zero filled in.
pub fn sinc(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|&x| {
            if x != 0.0 {
                (std::f64::consts::PI * x).sin() / (std::f64::consts::PI * x)
            } else {
                1.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convolve_matches_hand_result() {
        let a = vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(3.0, 0.0),
        ];
        let v = vec![1.0, 1.0];
        let out = convolve(&a, &v).unwrap();
        let re: Vec<f64> = out.iter().map(|c| c.re).collect();
        assert_eq!(re, vec![1.0, 3.0, 5.0, 3.0]);
    }

    #[test]
    fn convolve_real_impulse_is_identity() {
        let out = convolve_real(&[0.5, -1.0, 2.0], &[1.0]).unwrap();
        assert_eq!(out, vec![0.5, -1.0, 2.0]);
    }

    #[test]
    fn convolve_rejects_empty() {
        assert!(convolve(&[], &[1.0]).is_err());
        assert!(convolve_real(&[1.0], &[]).is_err());
    }

    #[test]
    fn convolve_same_keeps_longer_length() {
        let a: Vec<Complex64> = (0..10).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let v = vec![0.25; 5];
        let out = convolve_same(&a, &v).unwrap();
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn firwin_tap_layout() {
        let taps = firwin(8, 0.5).unwrap();
        assert_eq!(taps.len(), 9);
        assert_eq!(taps[8], 0.0);
        // center tap carries the cutoff gain scaled by the window peak
        assert!((taps[4] - 0.5).abs() < 1e-6, "center tap {}", taps[4]);
    }

    #[test]
    fn sinc_fills_removable_zero() {
        let out = sinc(&[0.0, 0.5, 1.0]);
        assert_eq!(out[0], 1.0);
        assert!((out[1] - 2.0 / std::f64::consts::PI).abs() < 1e-12);
        assert!(out[2].abs() < 1e-12);
    }

    #[test]
    fn hamming_is_symmetric() {
        let w = hamming(21);
        for i in 0..21 {
            assert!((w[i] - w[20 - i]).abs() < 1e-12);
        }
        assert!((w[10] - 1.0).abs() < 1e-12);
    }
}

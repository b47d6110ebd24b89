//! Owned complex sample sequences.
//!
//! Every pipeline stage consumes one [`ComplexBuffer`] and produces a new
//! one; buffers are never aliased or mutated across a stage boundary. The
//! real and imaginary rails always have equal length, which the checked
//! constructor enforces, and any operation combining two buffers first
//! truncates to the shorter operand.

use num::complex::Complex64;

/// An ordered, fixed-length sequence of complex baseband samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexBuffer {
    samples: Vec<Complex64>,
}

impl ComplexBuffer {
    /// Wrap an existing sample vector.
    pub fn new(samples: Vec<Complex64>) -> Self {
        Self { samples }
    }

    /// Build a buffer of zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            samples: vec![Complex64::new(0.0, 0.0); len],
        }
    }

    /// Build a buffer from separate real and imaginary rails.
    ///
    /// The rails must have equal length.
    pub fn from_parts(real: Vec<f64>, imag: Vec<f64>) -> Result<Self, String> {
        if real.len() != imag.len() {
            return Err(format!(
                "rail length mismatch: real={}, imag={}",
                real.len(),
                imag.len()
            ));
        }
        Ok(Self {
            samples: real
                .into_iter()
                .zip(imag)
                .map(|(re, im)| Complex64::new(re, im))
                .collect(),
        })
    }

    /// Build a buffer from a real rail with an all-zero imaginary rail.
    pub fn from_real(real: Vec<f64>) -> Self {
        Self {
            samples: real.into_iter().map(|re| Complex64::new(re, 0.0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [Complex64] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<Complex64> {
        self.samples
    }

    /// Copy of the real rail.
    pub fn real(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.re).collect()
    }

    /// Copy of the imaginary rail.
    pub fn imag(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.im).collect()
    }

    /// Per-sample magnitudes.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.norm()).collect()
    }

    /// Largest sample magnitude, or 0 for an empty buffer.
    pub fn peak_magnitude(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.norm_sqr())
            .fold(0.0f64, f64::max)
            .sqrt()
    }

    /// Elementwise product, truncated to the shorter operand.
    pub fn elementwise_mul(&self, other: &ComplexBuffer) -> ComplexBuffer {
        let samples = self
            .samples
            .iter()
            .zip(other.samples.iter())
            .map(|(a, b)| a * b)
            .collect();
        ComplexBuffer { samples }
    }

    /// Elementwise square of the buffer.
    pub fn squared(&self) -> ComplexBuffer {
        ComplexBuffer {
            samples: self.samples.iter().map(|s| s * s).collect(),
        }
    }
}

impl std::ops::Index<usize> for ComplexBuffer {
    type Output = Complex64;

    fn index(&self, index: usize) -> &Complex64 {
        &self.samples[index]
    }
}

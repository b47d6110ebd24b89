//! Session configuration for the baseband pipeline.
//!
//! A [`PipelineParams`] value is built once per session and read-only
//! afterwards. Both pipeline entry points call [`PipelineParams::validate`]
//! before touching any samples, so every stage may assume a sane
//! configuration.

use bitvec::prelude::*;

use crate::error::PipelineError;

/// Mueller & Muller timing loop gain.
///
/// Empirically tuned for the binary scheme at 8 samples per symbol; carried
/// over from the reference receiver unchanged.
pub const MM_GAIN: f64 = 0.3;

/// Interpolation factor used to approximate continuous time before the
/// timing loop picks fractional sample instants.
pub const MM_INTERP: usize = 16;

/// Costas loop phase gain (how fast the phase estimate updates).
///
/// Tuned for BPSK; raising it speeds lock-in at the cost of noise on the
/// phase estimate.
pub const COSTAS_ALPHA: f64 = 0.132;

/// Costas loop frequency gain (how fast the frequency estimate updates).
pub const COSTAS_BETA: f64 = 0.00932;

/// Default symmetric window half-width for the IQ imbalance rail means.
pub const DEFAULT_IQ_MEAN_PERIOD: usize = 100;

/// Optimal periodic binary code for N = 63, truncated to 60 bits.
/// https://ntrs.nasa.gov/citations/19800017860
const DEFAULT_PREAMBLE: [u8; 60] = [
    0, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 0, 1, 0, 0, 1, 1, 1, 1, 0, 1, 0, 0, 0, 1, 1, 1, 0, 0, 1,
    0, 0, 1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1, 0,
];

/// Generator polynomial x^11 + x^8 + x^7 + x^2 + x + 1 as a bit pattern.
/// Chosen from Koopman's CRC polynomial survey:
/// https://users.ece.cmu.edu/~koopman/crc/
const DEFAULT_CRC_KEY: [u8; 12] = [1, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 1];

/// Modulation scheme tag.
///
/// Only the single-bit-per-symbol binary phase scheme is supported end to
/// end; the tag exists so a mismatched configuration is rejected up front
/// instead of silently demodulating with the wrong slicer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    Bpsk,
}

/// Pulse shape family for the transmit filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseShape {
    RootRaisedCosine,
}

/// Immutable per-session pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    /// Number of payload bits per frame
    pub payload_bits: usize,
    /// Sample rate in Hz
    pub fs: f64,
    /// Transmit pulse shape family
    pub pulse_shape: PulseShape,
    /// RRC roll-off factor
    pub alpha: f64,
    /// Pulse shaping filter span in symbols (taps per symbol)
    pub span: usize,
    /// Modulation scheme
    pub scheme: Modulation,
    /// Samples per symbol
    pub sps: usize,
    /// Synchronization preamble, prepended to every frame
    pub preamble: BitVec<u8, Msb0>,
    /// CRC generator polynomial, leading bit first
    pub crc_key: BitVec<u8, Msb0>,
    /// Half-width of the IQ imbalance rail-mean window
    pub iq_mean_period: usize,
    /// Dump intermediate sequences to this directory when set
    pub export_dir: Option<std::path::PathBuf>,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            payload_bits: 256,
            fs: 2.45e9,
            pulse_shape: PulseShape::RootRaisedCosine,
            alpha: 0.5,
            span: 8,
            scheme: Modulation::Bpsk,
            sps: 8,
            preamble: default_preamble(),
            crc_key: default_crc_key(),
            iq_mean_period: DEFAULT_IQ_MEAN_PERIOD,
            export_dir: None,
        }
    }
}

impl PipelineParams {
    /// Reject broken configurations before any stage runs.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let fail = |reason: String| Err(PipelineError::InvalidConfig { reason });

        if self.payload_bits == 0 {
            return fail("payload_bits must be at least 1".into());
        }
        if !self.fs.is_finite() || self.fs <= 0.0 {
            return fail(format!("sample rate must be positive, got {}", self.fs));
        }
        if self.sps == 0 {
            return fail("samples per symbol must be at least 1".into());
        }
        if self.span == 0 {
            return fail("pulse shape span must be at least 1 symbol".into());
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return fail(format!("roll-off factor must be in [0, 1], got {}", self.alpha));
        }
        if self.preamble.is_empty() {
            return fail("preamble must not be empty".into());
        }
        if self.crc_key.len() < 2 {
            return fail(format!(
                "CRC key needs at least 2 bits, got {}",
                self.crc_key.len()
            ));
        }
        if !self.crc_key[0] {
            return fail("CRC key must have a leading 1 bit".into());
        }
        if self.iq_mean_period == 0 {
            return fail("IQ mean period must be at least 1".into());
        }
        Ok(())
    }

    /// Length of a CRC codeword: payload plus parity tail.
    pub fn encoded_len(&self) -> usize {
        self.payload_bits + self.crc_key.len() - 1
    }

    /// Bits on the wire per frame: preamble plus codeword.
    pub fn frame_bits(&self) -> usize {
        self.preamble.len() + self.encoded_len()
    }

    /// Symbol period in seconds, derived from sample rate and oversampling.
    pub fn symbol_period(&self) -> f64 {
        1.0 / (self.fs / self.sps as f64)
    }

    /// Number of pulse shaping filter taps.
    pub fn rrc_tap_count(&self) -> usize {
        self.span * self.sps
    }
}

/// The crate-default 60-bit preamble.
pub fn default_preamble() -> BitVec<u8, Msb0> {
    DEFAULT_PREAMBLE.iter().map(|&b| b != 0).collect()
}

/// The crate-default 12-bit CRC generator polynomial.
pub fn default_crc_key() -> BitVec<u8, Msb0> {
    DEFAULT_CRC_KEY.iter().map(|&b| b != 0).collect()
}

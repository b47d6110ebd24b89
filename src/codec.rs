//! Frame encode and decode pipelines.
//!
//! Both entry points are bounded batch transforms over one waveform: no
//! threads, no cross-call state, each stage consuming one owned buffer and
//! producing the next. The wire layout is `preamble ‖ payload ‖ CRC tail`,
//! pulse-shaped at `sps` samples per symbol; any compatible decoder must
//! use the same preamble, CRC key, roll-off, and sps.

use bitvec::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::buffer::ComplexBuffer;
use crate::crc;
use crate::demod;
use crate::error::PipelineError;
use crate::export;
use crate::iq;
use crate::params::PipelineParams;
use crate::pulse;
use crate::sync;

/// Result of decoding one received frame.
#[derive(Debug, Clone)]
pub struct DecodeReport {
    /// All demodulated codeword bits, payload first
    pub bits: BitVec<u8, Msb0>,
    /// The payload region of `bits`
    pub payload: BitVec<u8, Msb0>,
    /// Whether the CRC remainder came out all zero
    pub crc_ok: bool,
}

fn stage_err(stage: &'static str) -> impl FnOnce(String) -> PipelineError {
    move |reason| PipelineError::Degenerate { stage, reason }
}

/// Best-effort debug dump; an unwritable sink never fails the pipeline.
fn maybe_export(params: &PipelineParams, name: &str, buffer: &ComplexBuffer) {
    if let Some(dir) = &params.export_dir {
        let path = dir.join(name);
        if let Err(err) = export::write_complex(&path, buffer) {
            warn!(file = %path.display(), %err, "debug export failed");
        }
    }
}

fn maybe_export_real(params: &PipelineParams, name: &str, values: &[f64]) {
    if let Some(dir) = &params.export_dir {
        let path = dir.join(name);
        if let Err(err) = export::write_real(&path, values) {
            warn!(file = %path.display(), %err, "debug export failed");
        }
    }
}

/// Encode a payload into a pulse-shaped complex baseband waveform.
///
/// The payload gets its CRC tail appended, the preamble prepended, and the
/// resulting bits expanded to an antipodal impulse train and convolved with
/// the RRC filter.
#[instrument(skip(payload, params), fields(payload_bits = payload.len()))]
pub fn encode_frame(
    payload: &BitSlice<u8, Msb0>,
    params: &PipelineParams,
) -> Result<ComplexBuffer, PipelineError> {
    params.validate()?;
    if payload.len() != params.payload_bits {
        return Err(PipelineError::InvalidConfig {
            reason: format!(
                "payload has {} bits, session expects {}",
                payload.len(),
                params.payload_bits
            ),
        });
    }

    let codeword = crc::encode(payload, &params.crc_key).map_err(stage_err("crc"))?;

    let mut frame: BitVec<u8, Msb0> = params.preamble.clone();
    frame.extend_from_bitslice(&codeword);

    let train = pulse::pulse_train(&frame, params.sps).map_err(stage_err("pulse train"))?;
    maybe_export_real(params, "pulsetrain.txt", &train);

    let taps = pulse::rrc_taps(
        params.rrc_tap_count(),
        params.alpha,
        params.symbol_period(),
        params.fs,
    )
    .map_err(stage_err("rrc taps"))?;

    let shaped = pulse::shape(&train, &taps).map_err(stage_err("pulse shaping"))?;
    maybe_export(params, "pulseshaping.txt", &shaped);

    info!(
        frame_bits = frame.len(),
        samples = shaped.len(),
        "frame encoded"
    );
    Ok(shaped)
}

/// Decode one captured waveform back into bits.
///
/// Runs the full receive chain in its fixed order: timing recovery, coarse
/// frequency correction, Costas tracking, IQ de-skew, frame sync, and the
/// bit slicer. A failed CRC is reported in the result, not as an error.
#[instrument(skip(waveform, params), fields(samples = waveform.len()))]
pub fn decode_frame(
    waveform: &ComplexBuffer,
    params: &PipelineParams,
) -> Result<DecodeReport, PipelineError> {
    params.validate()?;
    if waveform.is_empty() {
        return Err(PipelineError::Degenerate {
            stage: "input",
            reason: "received waveform is empty".to_string(),
        });
    }

    let symbols = sync::recover_timing(waveform, params.sps).map_err(stage_err("timing"))?;
    maybe_export(params, "clockrecovery.txt", &symbols);

    let coarse =
        sync::correct_coarse_frequency(&symbols, params.fs).map_err(stage_err("coarse"))?;
    maybe_export(params, "coarsefrequency.txt", &coarse);

    let (tracked, freq_log) =
        sync::track_carrier(&coarse, params.fs).map_err(stage_err("costas"))?;
    maybe_export(params, "costasout.txt", &tracked);
    maybe_export_real(params, "costasfreqlog.txt", &freq_log);

    let balanced = iq::correct_iq_imbalance(&tracked, params.iq_mean_period)
        .map_err(stage_err("iq imbalance"))?;
    maybe_export(params, "iqimbalance.txt", &balanced);

    let recovered = sync::synchronize_frame(&balanced, &params.preamble, params.encoded_len())
        .map_err(|reason| PipelineError::SyncLost { reason })?;
    maybe_export(params, "recovereddata.txt", &recovered);

    // the channel gain is folded out by the earlier stages, so the slicer
    // always runs with gain 1
    let bits = demod::demodulate(&recovered, params.scheme, 1.0).map_err(stage_err("demod"))?;

    let crc_ok = crc::check(&bits, &params.crc_key).map_err(stage_err("crc"))?;
    let payload = bits[..params.payload_bits].to_bitvec();

    debug!(bits = bits.len(), crc_ok, "frame decoded");
    Ok(DecodeReport {
        bits,
        payload,
        crc_ok,
    })
}

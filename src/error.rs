use snafu::Snafu;

/// Pipeline-level failures.
///
/// A CRC mismatch is deliberately not represented here. It is a recoverable,
/// reportable outcome carried in [`crate::codec::DecodeReport::crc_ok`], and
/// the caller decides whether to retry or discard.
#[derive(Debug, Snafu)]
pub enum PipelineError {
    /// Session parameters failed validation before any stage ran
    #[snafu(display("invalid configuration: {reason}"))]
    InvalidConfig { reason: String },

    /// A stage received a numerically degenerate input
    #[snafu(display("degenerate input in {stage}: {reason}"))]
    Degenerate { stage: &'static str, reason: String },

    /// The correlation window fell outside the captured buffer
    #[snafu(display("frame synchronization lost: {reason}"))]
    SyncLost { reason: String },
}

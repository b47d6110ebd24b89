pub mod buffer;
pub mod codec;
pub mod crc;
pub mod demod;
pub mod dsp;
pub mod error;
pub mod export;
pub mod iq;
pub mod params;
pub mod pulse;
pub mod simulation;
pub mod sync;
pub mod tracing_init;
pub mod util;

pub use buffer::ComplexBuffer;
pub use codec::{decode_frame, encode_frame, DecodeReport};
pub use error::PipelineError;
pub use params::{Modulation, PipelineParams, PulseShape};

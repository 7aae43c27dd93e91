//! WAV file output

mod hound_writer;

pub use hound_writer::{encode_wav, wav_spec, HoundWavWriter};

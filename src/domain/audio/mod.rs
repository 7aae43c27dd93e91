//! Audio format value objects

mod parameters;

pub use parameters::{
    AudioParameters, Channels, SampleFormat, CHUNKS_PER_SECOND, COMMON_SAMPLE_RATES,
    DEFAULT_SAMPLE_RATE,
};

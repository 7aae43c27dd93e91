//! Recording entities and value objects

mod buffer;
mod duration;
#[allow(clippy::module_inception)]
mod recording;

pub use buffer::RecordingBuffer;
pub use duration::Duration;
pub use recording::{recording_name, Recording, GENERATED_NAME_PREFIX, WAV_EXTENSION};

//! Audio capture parameters

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::ParameterError;

/// Sample rates offered as presets by the front end
pub const COMMON_SAMPLE_RATES: &[u32] = &[8000, 11025, 16000, 44100, 48000];

/// Default sample rate (16kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 16000;

/// Number of chunks read per second of audio (100ms chunks)
pub const CHUNKS_PER_SECOND: u32 = 10;

/// Channel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channels {
    #[default]
    Mono,
    Stereo,
}

impl Channels {
    /// Number of interleaved channels
    pub const fn count(&self) -> u16 {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }

    pub fn from_count(count: u16) -> Result<Self, ParameterError> {
        match count {
            1 => Ok(Self::Mono),
            2 => Ok(Self::Stereo),
            other => Err(ParameterError::Channels(other.to_string())),
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mono => write!(f, "mono"),
            Self::Stereo => write!(f, "stereo"),
        }
    }
}

impl FromStr for Channels {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "mono" => Ok(Self::Mono),
            "2" | "stereo" => Ok(Self::Stereo),
            _ => Err(ParameterError::Channels(s.to_string())),
        }
    }
}

/// Encoding of a single captured sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleFormat {
    UInt8,
    Int8,
    #[default]
    Int16,
    /// Packed 3-byte little-endian samples
    Int24,
    Int32,
    Float32,
}

impl SampleFormat {
    /// All formats, in the order the front end lists them
    pub const ALL: [SampleFormat; 6] = [
        Self::UInt8,
        Self::Int8,
        Self::Int16,
        Self::Int24,
        Self::Int32,
        Self::Float32,
    ];

    /// Canonical configuration name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UInt8 => "uint8",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int24 => "int24",
            Self::Int32 => "int32",
            Self::Float32 => "float32",
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UInt8 => "8-bit uint",
            Self::Int8 => "8-bit int",
            Self::Int16 => "16-bit int",
            Self::Int24 => "24-bit int",
            Self::Int32 => "32-bit int",
            Self::Float32 => "32-bit float",
        }
    }

    /// Bytes occupied by one sample of one channel
    pub const fn bytes_per_sample(&self) -> usize {
        match self {
            Self::UInt8 | Self::Int8 => 1,
            Self::Int16 => 2,
            Self::Int24 => 3,
            Self::Int32 | Self::Float32 => 4,
        }
    }

    /// Bit depth written to the WAV header
    pub const fn bits_per_sample(&self) -> u16 {
        (self.bytes_per_sample() * 8) as u16
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32)
    }

    /// Byte value that encodes silence
    pub const fn silence_byte(&self) -> u8 {
        match self {
            Self::UInt8 => 0x80,
            _ => 0x00,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SampleFormat {
    type Err = ParameterError;

    /// Accepts canonical names ("int16") and the labels ("16-bit int")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == input || format.label() == input)
            .ok_or_else(|| ParameterError::SampleFormat(s.to_string()))
    }
}

/// Value object describing how a capture is opened and how its bytes are laid out.
/// Fixed for the lifetime of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioParameters {
    channels: Channels,
    sample_format: SampleFormat,
    sample_rate: u32,
}

impl AudioParameters {
    /// Create validated parameters.
    ///
    /// The rate must produce at least one frame per 100ms chunk.
    pub fn new(
        channels: Channels,
        sample_format: SampleFormat,
        sample_rate: u32,
    ) -> Result<Self, ParameterError> {
        if sample_rate < CHUNKS_PER_SECOND {
            return Err(ParameterError::SampleRate(sample_rate));
        }
        Ok(Self {
            channels,
            sample_format,
            sample_rate,
        })
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames per device read (100ms of audio)
    pub fn chunk_frames(&self) -> u32 {
        self.sample_rate / CHUNKS_PER_SECOND
    }

    /// Bytes in one interleaved frame
    pub fn frame_bytes(&self) -> usize {
        self.channels.count() as usize * self.sample_format.bytes_per_sample()
    }

    /// Bytes returned by one device read
    pub fn chunk_bytes(&self) -> usize {
        self.chunk_frames() as usize * self.frame_bytes()
    }

    /// Wall-clock duration of one chunk
    pub fn chunk_duration(&self) -> Duration {
        frames_to_duration(self.chunk_frames() as u64, self.sample_rate)
    }

    /// Playback duration of `byte_len` bytes of audio in this layout
    pub fn duration_of(&self, byte_len: usize) -> Duration {
        frames_to_duration((byte_len / self.frame_bytes()) as u64, self.sample_rate)
    }
}

fn frames_to_duration(frames: u64, sample_rate: u32) -> Duration {
    Duration::from_nanos(frames * 1_000_000_000 / sample_rate as u64)
}

impl Default for AudioParameters {
    fn default() -> Self {
        Self {
            channels: Channels::Mono,
            sample_format: SampleFormat::Int16,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl fmt::Display for AudioParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} Hz",
            self.channels,
            self.sample_format.label(),
            self.sample_rate
        )
    }
}

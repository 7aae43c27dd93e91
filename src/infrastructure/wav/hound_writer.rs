//! WAV serialization using hound
//!
//! Sample bytes are written back exactly as they were captured; only the
//! RIFF/fmt/data framing is added.

use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use hound::{WavSpec, WavWriter};

use crate::application::ports::{RecordingWriteError, RecordingWriter};
use crate::domain::audio::{AudioParameters, SampleFormat};
use crate::domain::recording::Recording;

/// WAV header fields for recordings captured with `params`
pub fn wav_spec(params: &AudioParameters) -> WavSpec {
    let format = params.sample_format();
    WavSpec {
        channels: params.channels().count(),
        sample_rate: params.sample_rate(),
        bits_per_sample: format.bits_per_sample(),
        sample_format: if format.is_float() {
            hound::SampleFormat::Float
        } else {
            hound::SampleFormat::Int
        },
    }
}

/// Write `recording` as a complete WAV stream into `sink`
pub fn encode_wav<W: Write + Seek>(recording: &Recording, sink: W) -> Result<(), hound::Error> {
    let params = recording.parameters();
    let mut writer = WavWriter::new(sink, wav_spec(params))?;
    write_verbatim(&mut writer, params.sample_format(), recording.samples())?;
    writer.finalize()
}

/// Feed raw little-endian bytes through hound so they land unchanged in the data chunk
fn write_verbatim<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    format: SampleFormat,
    bytes: &[u8],
) -> Result<(), hound::Error> {
    match format {
        // hound stores 8-bit samples offset by 128; undo that so the byte is kept
        SampleFormat::UInt8 | SampleFormat::Int8 => {
            for &b in bytes {
                writer.write_sample((b as i16 - 128) as i8)?;
            }
        }
        SampleFormat::Int16 => {
            for s in bytes.chunks_exact(2) {
                writer.write_sample(i16::from_le_bytes([s[0], s[1]]))?;
            }
        }
        SampleFormat::Int24 => {
            for s in bytes.chunks_exact(3) {
                let sign = if s[2] & 0x80 != 0 { 0xff } else { 0x00 };
                writer.write_sample(i32::from_le_bytes([s[0], s[1], s[2], sign]))?;
            }
        }
        SampleFormat::Int32 => {
            for s in bytes.chunks_exact(4) {
                writer.write_sample(i32::from_le_bytes([s[0], s[1], s[2], s[3]]))?;
            }
        }
        SampleFormat::Float32 => {
            for s in bytes.chunks_exact(4) {
                writer.write_sample(f32::from_le_bytes([s[0], s[1], s[2], s[3]]))?;
            }
        }
    }
    Ok(())
}

/// Saves recordings as WAV files named after the recording, inside `output_dir`
pub struct HoundWavWriter {
    output_dir: PathBuf,
}

impl HoundWavWriter {
    pub fn with_output_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Destination of a recording. Absolute names are used as given.
    pub fn path_for(&self, recording: &Recording) -> PathBuf {
        self.output_dir.join(recording.name())
    }
}

impl RecordingWriter for HoundWavWriter {
    /// Existing files at the destination are overwritten.
    fn write(&self, recording: &Recording) -> Result<PathBuf, RecordingWriteError> {
        let path = self.path_for(recording);
        let fail = |message: String| RecordingWriteError {
            path: path.clone(),
            message,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| fail(format!("failed to create directory: {}", e)))?;
        }

        let file = File::create(&path).map_err(|e| fail(e.to_string()))?;
        encode_wav(recording, BufWriter::new(file)).map_err(|e| fail(e.to_string()))?;

        Ok(path)
    }
}

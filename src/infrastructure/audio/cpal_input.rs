//! Host audio input using cpal
//!
//! cpal delivers samples through a callback on its own thread. The callback
//! encodes them to little-endian bytes and hands them over a channel; the
//! capture worker blocks on that channel until a full chunk has arrived.

use std::sync::mpsc::{self, Receiver, Sender};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, BuildStreamError, SampleRate, SizedSample, StreamConfig};

use crate::application::ports::{AudioInput, AudioInputError, InputStream};
use crate::domain::audio::{AudioParameters, SampleFormat};

/// Messages from the cpal callbacks to the reader
enum StreamMessage {
    Data(Vec<u8>),
    Error(String),
}

/// Converts one callback buffer into raw bytes
type Encoder<T> = fn(&[T], &mut Vec<u8>);

/// Audio input backed by the default cpal host.
///
/// Opens the default input device unless a device name is configured.
pub struct CpalAudioInput {
    device_name: Option<String>,
}

impl CpalAudioInput {
    pub fn new() -> Self {
        Self { device_name: None }
    }

    /// Use the input device whose name matches exactly
    pub fn with_device(name: impl Into<String>) -> Self {
        Self {
            device_name: Some(name.into()),
        }
    }

    /// Names of the input devices the default host exposes
    pub fn device_names() -> Result<Vec<String>, AudioInputError> {
        let host = cpal::default_host();
        let devices = host
            .input_devices()
            .map_err(|e| AudioInputError::DeviceOpen(e.to_string()))?;
        Ok(devices.filter_map(|d| d.name().ok()).collect())
    }

    fn find_device(&self) -> Result<cpal::Device, AudioInputError> {
        let host = cpal::default_host();
        match &self.device_name {
            None => host
                .default_input_device()
                .ok_or(AudioInputError::NoAudioDevice),
            Some(wanted) => host
                .input_devices()
                .map_err(|e| AudioInputError::DeviceOpen(e.to_string()))?
                .find(|d| d.name().map(|n| &n == wanted).unwrap_or(false))
                .ok_or_else(|| {
                    AudioInputError::DeviceOpen(format!("input device \"{}\" not found", wanted))
                }),
        }
    }

    fn build_stream(
        device: &cpal::Device,
        config: &StreamConfig,
        format: SampleFormat,
        tx: &Sender<StreamMessage>,
    ) -> Result<cpal::Stream, BuildStreamError> {
        match format {
            SampleFormat::UInt8 => build_typed::<u8>(device, config, tx, encode_u8),
            SampleFormat::Int8 => build_typed::<i8>(device, config, tx, encode_i8),
            SampleFormat::Int16 => build_typed::<i16>(device, config, tx, encode_i16),
            SampleFormat::Int24 => build_typed::<i32>(device, config, tx, encode_i24),
            SampleFormat::Int32 => build_typed::<i32>(device, config, tx, encode_i32),
            SampleFormat::Float32 => build_typed::<f32>(device, config, tx, encode_f32),
        }
    }
}

impl Default for CpalAudioInput {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_u8(data: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(data);
}

/// Two's complement bytes as-is
fn encode_i8(data: &[i8], out: &mut Vec<u8>) {
    out.extend(data.iter().map(|&s| s as u8));
}

fn encode_i16(data: &[i16], out: &mut Vec<u8>) {
    out.extend(data.iter().flat_map(|s| s.to_le_bytes()));
}

/// cpal has no packed 24-bit type: keep the top three bytes of each i32
fn encode_i24(data: &[i32], out: &mut Vec<u8>) {
    for s in data {
        out.extend_from_slice(&s.to_le_bytes()[1..]);
    }
}

fn encode_i32(data: &[i32], out: &mut Vec<u8>) {
    out.extend(data.iter().flat_map(|s| s.to_le_bytes()));
}

fn encode_f32(data: &[f32], out: &mut Vec<u8>) {
    out.extend(data.iter().flat_map(|s| s.to_le_bytes()));
}

fn build_typed<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    tx: &Sender<StreamMessage>,
    encode: Encoder<T>,
) -> Result<cpal::Stream, BuildStreamError>
where
    T: SizedSample + Send + 'static,
{
    let data_tx = tx.clone();
    let error_tx = tx.clone();
    let sample_width = std::mem::size_of::<T>();

    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mut bytes = Vec::with_capacity(data.len() * sample_width);
            encode(data, &mut bytes);
            // The reader is gone once the stream is closing
            let _ = data_tx.send(StreamMessage::Data(bytes));
        },
        move |err| {
            log::error!("Audio stream error: {}", err);
            let _ = error_tx.send(StreamMessage::Error(err.to_string()));
        },
        None,
    )
}

impl AudioInput for CpalAudioInput {
    fn open(&self, params: &AudioParameters) -> Result<Box<dyn InputStream>, AudioInputError> {
        let device = self.find_device()?;
        if let Ok(name) = device.name() {
            log::debug!("Opening input device \"{}\" with {}", name, params);
        }

        let mut config = StreamConfig {
            channels: params.channels().count(),
            sample_rate: SampleRate(params.sample_rate()),
            buffer_size: BufferSize::Fixed(params.chunk_frames()),
        };
        let (tx, rx) = mpsc::channel();

        let stream = match Self::build_stream(&device, &config, params.sample_format(), &tx) {
            Err(BuildStreamError::StreamConfigNotSupported) => {
                // Some hosts only accept their own period size; chunks are
                // assembled from whatever the callback delivers anyway
                log::debug!(
                    "Fixed buffer of {} frames rejected, using host default",
                    params.chunk_frames()
                );
                config.buffer_size = BufferSize::Default;
                Self::build_stream(&device, &config, params.sample_format(), &tx)
            }
            other => other,
        }
        .map_err(|e| AudioInputError::DeviceOpen(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioInputError::DeviceOpen(e.to_string()))?;

        Ok(Box::new(CpalInputStream {
            stream,
            chunks: ChunkReader::new(rx, params.chunk_bytes()),
        }))
    }
}

/// Cuts the callback byte stream into fixed-size chunks
struct ChunkReader {
    receiver: Receiver<StreamMessage>,
    pending: Vec<u8>,
    chunk_bytes: usize,
}

impl ChunkReader {
    fn new(receiver: Receiver<StreamMessage>, chunk_bytes: usize) -> Self {
        Self {
            receiver,
            pending: Vec::with_capacity(chunk_bytes * 2),
            chunk_bytes,
        }
    }

    /// Block until `chunk_bytes` bytes are buffered; leftovers carry over
    fn next_chunk(&mut self) -> Result<Vec<u8>, AudioInputError> {
        while self.pending.len() < self.chunk_bytes {
            match self.receiver.recv() {
                Ok(StreamMessage::Data(bytes)) => self.pending.extend_from_slice(&bytes),
                Ok(StreamMessage::Error(msg)) => return Err(AudioInputError::DeviceRead(msg)),
                Err(_) => {
                    return Err(AudioInputError::DeviceRead(
                        "audio stream disconnected".to_string(),
                    ))
                }
            }
        }
        let rest = self.pending.split_off(self.chunk_bytes);
        Ok(std::mem::replace(&mut self.pending, rest))
    }
}

/// A running cpal input stream read in fixed-size chunks.
///
/// `cpal::Stream` is not `Send`; this must stay on the thread that opened it.
struct CpalInputStream {
    stream: cpal::Stream,
    chunks: ChunkReader,
}

impl InputStream for CpalInputStream {
    fn read_chunk(&mut self) -> Result<Vec<u8>, AudioInputError> {
        self.chunks.next_chunk()
    }

    fn close(self: Box<Self>) -> Result<(), AudioInputError> {
        let result = self
            .stream
            .pause()
            .map_err(|e| AudioInputError::DeviceRead(e.to_string()));
        // Dropping the stream releases the device
        drop(self);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_device_keeps_name() {
        let input = CpalAudioInput::with_device("USB Mic");
        assert_eq!(input.device_name.as_deref(), Some("USB Mic"));
        assert!(CpalAudioInput::new().device_name.is_none());
    }

    fn encoded<T>(data: &[T], encode: Encoder<T>) -> Vec<u8> {
        let mut out = Vec::new();
        encode(data, &mut out);
        out
    }

    #[test]
    fn unsigned_8bit_passes_through() {
        assert_eq!(encoded(&[0u8, 0x80, 0xff], encode_u8), vec![0x00, 0x80, 0xff]);
    }

    #[test]
    fn signed_8bit_keeps_twos_complement() {
        assert_eq!(encoded(&[0i8, 1, -1, i8::MIN], encode_i8), vec![0x00, 0x01, 0xff, 0x80]);
    }

    #[test]
    fn int16_is_little_endian() {
        assert_eq!(
            encoded(&[0x1234i16, -2], encode_i16),
            vec![0x34, 0x12, 0xfe, 0xff]
        );
    }

    #[test]
    fn int24_keeps_top_three_bytes() {
        assert_eq!(
            encoded(&[0x1234_5678i32, -256], encode_i24),
            vec![0x56, 0x34, 0x12, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn int32_is_little_endian() {
        assert_eq!(
            encoded(&[0x0102_0304i32], encode_i32),
            vec![0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn float32_is_little_endian_ieee() {
        assert_eq!(encoded(&[1.0f32], encode_f32), vec![0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(encoded(&[-0.5f32, 0.0], encode_f32).len(), 8);
    }

    #[test]
    fn reader_assembles_exact_chunks_from_uneven_callbacks() {
        let (tx, rx) = mpsc::channel();
        tx.send(StreamMessage::Data(vec![1, 2, 3])).unwrap();
        tx.send(StreamMessage::Data(vec![4, 5])).unwrap();
        tx.send(StreamMessage::Data(vec![6, 7, 8, 9])).unwrap();

        let mut reader = ChunkReader::new(rx, 4);
        assert_eq!(reader.next_chunk().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(reader.next_chunk().unwrap(), vec![5, 6, 7, 8]);
        assert_eq!(reader.pending, vec![9]);
    }

    #[test]
    fn reader_surfaces_stream_errors() {
        let (tx, rx) = mpsc::channel();
        tx.send(StreamMessage::Data(vec![1])).unwrap();
        tx.send(StreamMessage::Error("device lost".to_string())).unwrap();

        let mut reader = ChunkReader::new(rx, 4);
        match reader.next_chunk() {
            Err(AudioInputError::DeviceRead(msg)) => assert_eq!(msg, "device lost"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn reader_fails_when_callbacks_are_gone() {
        let (tx, rx) = mpsc::channel::<StreamMessage>();
        drop(tx);

        let mut reader = ChunkReader::new(rx, 4);
        assert!(matches!(
            reader.next_chunk(),
            Err(AudioInputError::DeviceRead(_))
        ));
    }
}

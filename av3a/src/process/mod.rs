use crate::structs::header::HeaderInfo;
use crate::utils::errors::PayloadError;

/// Frame extraction from Audio Vivid elementary streams.
///
/// Provides the [`Extractor`](extract::Extractor) that splits continuous
/// bitstream data into [`Frame`](extract::Frame) objects using the size each
/// header announces.
pub mod extract;

/// 12-bit frame sync word.
pub const SYNC_WORD: u16 = 0xFFF;

/// The only codec id this crate decodes.
pub const CODEC_ID: u8 = 2;

/// Samples per channel in every coded frame.
pub const FRAME_LENGTH: u32 = 1024;

/// Size of the window a header is decoded from.
pub const MAX_HEADER_BYTES: usize = 9;

/// Stereo, 48 kHz, 16-bit, 64 kbps.
pub const EXAMPLE_HEADER: [u8; MAX_HEADER_BYTES] =
    [0xFF, 0xF2, 0x00, 0x40, 0x00, 0x53, 0x00, 0x00, 0x00];

/// Computes the coded frame size in bytes.
///
/// `ceil(total_bitrate * frame_length / (sampling_rate * 8))`, evaluated in
/// integer arithmetic so the result never depends on float rounding.
///
/// ```rust
/// use av3a::process::{FRAME_LENGTH, payload_size};
///
/// assert_eq!(payload_size(192_000, 48_000, FRAME_LENGTH)?, 512);
/// assert_eq!(payload_size(64_000, 48_000, FRAME_LENGTH)?, 171);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn payload_size(
    total_bitrate: u64,
    sampling_rate: u32,
    frame_length: u32,
) -> Result<usize, PayloadError> {
    if sampling_rate == 0 {
        return Err(PayloadError::ZeroSamplingRate);
    }

    let bits = total_bitrate
        .checked_mul(frame_length as u64)
        .ok_or(PayloadError::Overflow {
            bitrate: total_bitrate,
            frame_length,
        })?;

    usize::try_from(bits.div_ceil(sampling_rate as u64 * 8)).map_err(|_| PayloadError::Overflow {
        bitrate: total_bitrate,
        frame_length,
    })
}

/// Codec-specific configuration handed to a downstream decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub codec_id: u8,
    pub sampling_rate_index: u8,
    pub nn_type: u8,
    pub content_type: u8,
    pub channel_num_index: u8,
    pub num_objects: u8,
    pub hoa_order: u8,
    pub resolution_index: u8,
    pub total_bitrate_kbps: u16,
}

impl CodecConfig {
    pub const SIZE: usize = 10;

    pub fn from_header(header: &HeaderInfo) -> Self {
        Self {
            codec_id: header.codec_id,
            sampling_rate_index: header.sampling_rate_index,
            nn_type: header.nn_type,
            content_type: header.content_type() as u8,
            channel_num_index: header.channel_num_index().unwrap_or(0),
            // 128 objects wrap to 0 in the 8-bit field
            num_objects: header.objects() as u8,
            hoa_order: header.hoa_order().unwrap_or(0),
            resolution_index: header.resolution.index(),
            total_bitrate_kbps: (header.total_bitrate / 1000).min(u16::MAX as u64) as u16,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let kbps = self.total_bitrate_kbps.to_le_bytes();

        [
            self.codec_id,
            self.sampling_rate_index,
            self.nn_type,
            self.content_type,
            self.channel_num_index,
            self.num_objects,
            self.hoa_order,
            self.resolution_index,
            kbps[0],
            kbps[1],
        ]
    }
}

#[test]
fn payload_size_rounds_up() {
    assert_eq!(payload_size(192_000, 48_000, FRAME_LENGTH).unwrap(), 512);
    assert_eq!(payload_size(64_000, 48_000, FRAME_LENGTH).unwrap(), 171);
    assert_eq!(payload_size(64_000, 44_100, FRAME_LENGTH).unwrap(), 186);
    assert_eq!(payload_size(16_000, 192_000, FRAME_LENGTH).unwrap(), 11);
    assert_eq!(payload_size(0, 48_000, FRAME_LENGTH).unwrap(), 0);
}

#[test]
fn payload_size_is_monotonic_in_bitrate() {
    let mut previous = 0;
    for bitrate in (0..=2_000_000).step_by(1_000) {
        let size = payload_size(bitrate, 44_100, FRAME_LENGTH).unwrap();
        assert!(size >= previous);
        assert_eq!(size, payload_size(bitrate, 44_100, FRAME_LENGTH).unwrap());
        previous = size;
    }
}

#[test]
fn payload_size_matches_float_reference() {
    use crate::structs::tables::{ChannelConfig, SAMPLING_RATE_TABLE};

    for config in ChannelConfig::ALL {
        for &bitrate in config.bitrate_table().iter().filter(|&&rate| rate != 0) {
            for &rate in &SAMPLING_RATE_TABLE {
                let reference =
                    ((bitrate as f32 / rate as f32) * FRAME_LENGTH as f32 / 8.0).ceil() as usize;
                assert_eq!(payload_size(bitrate, rate, FRAME_LENGTH).unwrap(), reference);
            }
        }
    }
}

#[test]
fn payload_size_rejects_zero_rate() {
    assert_eq!(
        payload_size(64_000, 0, FRAME_LENGTH),
        Err(PayloadError::ZeroSamplingRate)
    );
}

#[test]
fn payload_size_overflow() {
    assert!(matches!(
        payload_size(u64::MAX, 48_000, FRAME_LENGTH),
        Err(PayloadError::Overflow { .. })
    ));
}

#[test]
fn codec_config_bytes() -> Result<(), crate::utils::errors::HeaderError> {
    let header = HeaderInfo::from_bytes(&EXAMPLE_HEADER)?;
    let config = CodecConfig::from_header(&header);

    assert_eq!(config.content_type, 0);
    assert_eq!(config.channel_num_index, 1);
    assert_eq!(config.total_bitrate_kbps, 64);
    assert_eq!(config.to_bytes(), [2, 2, 0, 0, 1, 0, 0, 1, 64, 0]);
    Ok(())
}

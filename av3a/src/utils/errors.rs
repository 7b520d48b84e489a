use std::io;

#[derive(thiserror::Error, Debug)]
pub enum HeaderError {
    #[error("Invalid sync word. Read {0:#05X}, expected 0xFFF")]
    InvalidSyncWord(u16),

    #[error("Unsupported codec id {0}, only codec id 2 is supported")]
    UnsupportedCodec(u8),

    #[error("Ancillary data flag is set, ancillary data is not supported")]
    UnsupportedAncillaryData,

    #[error("Invalid sampling_rate_index {0}, must be 0-8")]
    InvalidSamplingRateIndex(u8),

    #[error("Invalid coding_profile {0}, must be 0-2")]
    InvalidCodingProfile(u8),

    #[error("Invalid soundbed_type {0}, must be 0 or 1")]
    InvalidSoundbedType(u8),

    #[error("Invalid channel_num_index {index} for {context}")]
    InvalidChannelConfig { index: u8, context: &'static str },

    #[error("Invalid HOA order {0}, must be 1-3")]
    InvalidHoaOrder(u8),

    #[error("Invalid resolution_index {0}, must be 0-2")]
    InvalidResolutionIndex(u8),

    #[error("No bitrate defined at index {index} for {config}")]
    InvalidBitrateIndex { index: u8, config: &'static str },

    #[error("Header truncated: {0}")]
    TruncatedHeader(#[from] io::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Sampling rate must be non-zero")]
    ZeroSamplingRate,

    #[error("Payload size overflows: bitrate = {bitrate}, frame_length = {frame_length}")]
    Overflow { bitrate: u64, frame_length: u32 },
}

#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("Invalid frame header at byte offset {offset}: {source}")]
    Header {
        offset: u64,
        #[source]
        source: HeaderError,
    },

    #[error("Invalid frame size at byte offset {offset}: {source}")]
    FrameSize {
        offset: u64,
        #[source]
        source: PayloadError,
    },

    #[error("Frame at byte offset {offset} is shorter than its header: {size} < {header}")]
    FrameTooShort { offset: u64, size: usize, header: usize },

    #[error("Stream ends with {0} bytes that do not form a complete frame")]
    TrailingData(usize),
}

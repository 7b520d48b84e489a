#![doc = include_str!("../README.md")]
//!
//! ## Technical Overview
//!
//! Parser for the frame header of Audio Vivid (AVS3-P3) elementary streams.
//!
//! ### Bitstream Organization
//!
//! A stream is a plain sequence of coded frames. Each frame starts with a
//! bit-packed header (at most 9 bytes) followed by the coded payload. Every
//! frame carries 1024 samples per channel.
//!
//! ### Content Types
//!
//! - Channel-based: mono, stereo and multichannel beds up to 22.2
//! - Objects only: up to 128 discrete objects
//! - Channel bed plus objects
//! - Higher-order ambisonics, orders 1 to 3
//!
//! ### Frame Size
//!
//! Frames are constant-bitrate per header: the size in bytes follows from the
//! total bitrate and the sampling rate, see [`process::payload_size`].
//!
//! ## Quick Start
//!
//! ```rust
//! use av3a::process::{EXAMPLE_HEADER, extract::Extractor};
//! use av3a::structs::header::HeaderInfo;
//!
//! // Decode a single header
//! let header = HeaderInfo::from_bytes(&EXAMPLE_HEADER)?;
//! println!(
//!     "{} Hz, {} channels, {} bps",
//!     header.sampling_rate,
//!     header.total_channels(),
//!     header.total_bitrate
//! );
//!
//! // Or split a stream into frames
//! let mut stream = EXAMPLE_HEADER.to_vec();
//! stream.resize(header.payload_size()?, 0);
//!
//! let mut extractor = Extractor::default();
//! extractor.push_bytes(&stream);
//!
//! for frame in extractor.by_ref() {
//!     let frame = frame?;
//!     println!("frame at {}: {} bytes", frame.offset, frame.as_ref().len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Processing functionality for audio bitstreams.
///
/// - **Frame size** ([`process::payload_size`]): bytes per coded frame
/// - **Frame extraction** ([`process::extract`]): splits a stream into frames
/// - **Codec configuration** ([`process::CodecConfig`]): decoder setup record
pub mod process;

/// Data structures representing format components.
///
/// - **Header** ([`structs::header`]): decoded frame header
/// - **Tables** ([`structs::tables`]): sampling rate, channel and bitrate tables
pub mod structs;

/// Utility functions and supporting infrastructure.
///
/// - **Bitstream I/O** ([`utils::bitstream_io`]): bit-level reading
/// - **Error Handling** ([`utils::errors`]): error types
pub mod utils;

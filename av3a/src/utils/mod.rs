//! Utility functions and supporting infrastructure.
//!
//! Provides bit-level reading and the error types shared by the parser and
//! the frame extractor.

pub mod bitstream_io;
pub mod errors;

#[cfg(test)]
pub(crate) mod test_util;

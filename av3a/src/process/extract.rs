use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, trace};

use crate::process::{FRAME_LENGTH, MAX_HEADER_BYTES, SYNC_WORD};
use crate::structs::header::HeaderInfo;
use crate::utils::errors::ExtractError;

/// Splits an Audio Vivid elementary stream into coded frames.
///
/// Each frame starts with a header whose bitrate and sampling rate fix the
/// frame size, so no scanning is needed while the stream stays valid.
///
/// # Example
///
/// ```rust
/// use av3a::process::EXAMPLE_HEADER;
/// use av3a::process::extract::Extractor;
///
/// // A 64 kbps 48 kHz frame is 171 bytes, header included.
/// let mut stream = EXAMPLE_HEADER.to_vec();
/// stream.resize(171, 0);
///
/// let mut extractor = Extractor::default();
/// extractor.push_bytes(&stream);
///
/// let frame = extractor.next().unwrap()?;
/// assert_eq!(frame.as_ref().len(), 171);
/// assert_eq!(frame.header.sampling_rate, 48000);
/// assert!(extractor.next().is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// A header that fails to decode is reported once, then the extractor yields
/// nothing until [`Extractor::resync`] is called. Whether to resynchronize or
/// abort is up to the caller.
#[derive(Debug, Default)]
pub struct Extractor {
    buffer: VecDeque<u8>,
    offset: u64,
    failed: bool,
    frames_extracted: usize,
    bytes_skipped: usize,
}

impl Extractor {
    /// Adds raw bitstream data to the internal buffer.
    ///
    /// The buffer grows without bound while the extractor is stopped on a
    /// header error: call [`Extractor::resync`] before pushing more data.
    pub fn push_bytes(&mut self, data: &[u8]) {
        self.buffer.extend(data);
    }

    /// Stream offset of the next unconsumed byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn frames_extracted(&self) -> usize {
        self.frames_extracted
    }

    /// Bytes dropped by [`Extractor::resync`].
    pub fn bytes_skipped(&self) -> usize {
        self.bytes_skipped
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drops at least one byte, then everything up to the next sync word
    /// candidate.
    ///
    /// Returns `true` when a candidate is at the front of the buffer. If none
    /// is found, all but the last byte are dropped, since that byte may start
    /// a sync word that continues in the next push.
    pub fn resync(&mut self) -> bool {
        self.failed = false;

        if self.buffer.is_empty() {
            return false;
        }

        let candidate = (1..self.buffer.len()).find(|&i| self.is_sync_at(i));
        let skip = candidate.unwrap_or(self.buffer.len() - 1).max(1);
        self.consume_front(skip);
        self.bytes_skipped += skip;

        debug!("Skipped {skip} bytes, next offset {}", self.offset);

        candidate.is_some()
    }

    /// Checks whether the remaining bytes form a complete stream.
    pub fn finish(&self) -> Result<(), ExtractError> {
        match self.buffer.len() {
            0 => Ok(()),
            len => Err(ExtractError::TrailingData(len)),
        }
    }

    fn is_sync_at(&self, i: usize) -> bool {
        match (self.buffer.get(i), self.buffer.get(i + 1)) {
            (Some(&hi), Some(&lo)) => (u16::from_be_bytes([hi, lo]) >> 4) == SYNC_WORD,
            // A lone 0xFF at the end may still be the start of a sync word.
            (Some(&hi), None) => hi == 0xFF,
            _ => false,
        }
    }

    fn consume_front(&mut self, cnt: usize) {
        self.buffer.drain(..cnt);
        self.offset += cnt as u64;
    }

    fn header_window(&self) -> [u8; MAX_HEADER_BYTES] {
        let mut window = [0u8; MAX_HEADER_BYTES];
        for (dst, src) in window.iter_mut().zip(self.buffer.iter()) {
            *dst = *src;
        }
        window
    }

    fn fail(&mut self, error: ExtractError) -> Option<Result<Frame, ExtractError>> {
        self.failed = true;
        Some(Err(error))
    }
}

impl Iterator for Extractor {
    type Item = Result<Frame, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.buffer.len() < MAX_HEADER_BYTES {
            return None;
        }

        let offset = self.offset;

        let header = match HeaderInfo::from_bytes(&self.header_window()) {
            Ok(header) => header,
            Err(source) => return self.fail(ExtractError::Header { offset, source }),
        };

        let size = match header.payload_size() {
            Ok(size) => size,
            Err(source) => return self.fail(ExtractError::FrameSize { offset, source }),
        };

        if size < header.header_len() {
            return self.fail(ExtractError::FrameTooShort {
                offset,
                size,
                header: header.header_len(),
            });
        }

        if self.buffer.len() < size {
            trace!(
                "Frame at offset {offset} needs {size} bytes, {} buffered",
                self.buffer.len()
            );
            return None;
        }

        let data: Vec<u8> = self.buffer.drain(..size).collect();
        self.offset += size as u64;
        self.frames_extracted += 1;

        Some(Ok(Frame {
            header,
            offset,
            data: data.into(),
        }))
    }
}

/// A single coded frame, header included.
#[derive(Debug, Clone)]
pub struct Frame {
    pub header: HeaderInfo,
    /// Byte offset of the frame in the stream.
    pub offset: u64,
    pub data: Arc<[u8]>,
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Frame {
    /// Coded payload following the header bytes.
    pub fn payload(&self) -> &[u8] {
        &self.data[self.header.header_len()..]
    }

    /// Frame duration in seconds.
    pub fn duration(&self) -> f64 {
        FRAME_LENGTH as f64 / self.header.sampling_rate as f64
    }
}

#[cfg(test)]
fn example_frame(fill: u8) -> Vec<u8> {
    use crate::process::EXAMPLE_HEADER;

    let mut frame = EXAMPLE_HEADER[..7].to_vec();
    frame.resize(171, fill);
    frame
}

#[test]
fn extracts_consecutive_frames() {
    let mut stream = example_frame(0x11);
    stream.extend(example_frame(0x22));

    let mut extractor = Extractor::default();
    extractor.push_bytes(&stream);

    let frames = extractor.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].offset, 0);
    assert_eq!(frames[1].offset, 171);
    assert_eq!(frames[1].payload().len(), 164);
    assert!(frames[1].payload().iter().all(|&b| b == 0x22));
    assert_eq!(extractor.frames_extracted(), 2);
    assert!(extractor.finish().is_ok());
}

#[test]
fn waits_for_complete_frame() {
    let stream = example_frame(0);
    let mut extractor = Extractor::default();

    extractor.push_bytes(&stream[..5]);
    assert!(extractor.next().is_none());

    extractor.push_bytes(&stream[5..100]);
    assert!(extractor.next().is_none());
    assert_eq!(extractor.buffered(), 100);
    assert!(matches!(extractor.finish(), Err(ExtractError::TrailingData(100))));

    extractor.push_bytes(&stream[100..]);
    let frame = extractor.next().unwrap().unwrap();
    assert_eq!(frame.as_ref(), stream.as_slice());
    assert_eq!(frame.duration(), 1024.0 / 48000.0);
}

#[test]
fn header_error_stops_until_resync() {
    let mut stream = vec![0x00, 0x12, 0x34];
    stream.extend(example_frame(0));

    let mut extractor = Extractor::default();
    extractor.push_bytes(&stream);

    let err = extractor.next().unwrap().unwrap_err();
    assert!(matches!(err, ExtractError::Header { offset: 0, .. }));
    assert!(extractor.next().is_none());

    assert!(extractor.resync());
    assert_eq!(extractor.bytes_skipped(), 3);
    assert_eq!(extractor.offset(), 3);

    let frame = extractor.next().unwrap().unwrap();
    assert_eq!(frame.offset, 3);
    assert_eq!(frame.header.total_bitrate, 64000);
}

#[test]
fn resync_skips_false_sync_words() {
    // 0xFFF followed by codec id 1 is not a valid header.
    let mut stream = vec![0xFF, 0xF1, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    stream.extend(example_frame(0));

    let mut extractor = Extractor::default();
    extractor.push_bytes(&stream);

    let mut frames = 0;
    let mut errors = 0;
    loop {
        match extractor.next() {
            Some(Ok(_)) => frames += 1,
            Some(Err(_)) => {
                errors += 1;
                extractor.resync();
            }
            None => break,
        }
    }

    assert_eq!(frames, 1);
    assert_eq!(errors, 1);
    assert_eq!(extractor.bytes_skipped(), 10);
}

#[test]
fn resync_without_candidate_keeps_last_byte() {
    let mut extractor = Extractor::default();
    extractor.push_bytes(&[0x00, 0x01, 0x02, 0x03, 0xFF]);

    assert!(extractor.resync());
    assert_eq!(extractor.buffered(), 1);

    let mut extractor = Extractor::default();
    extractor.push_bytes(&[0x00, 0x01, 0x02, 0x03]);

    assert!(!extractor.resync());
    assert_eq!(extractor.buffered(), 1);
    assert_eq!(extractor.offset(), 3);
}

#[test]
fn data_pushed_while_stopped_is_kept() {
    let mut extractor = Extractor::default();
    extractor.push_bytes(&[0x00; 9]);
    assert!(extractor.next().unwrap().is_err());

    extractor.push_bytes(&example_frame(0));
    extractor.push_bytes(&example_frame(0));
    assert!(extractor.next().is_none());
    assert_eq!(extractor.buffered(), 9 + 2 * 171);

    assert!(extractor.resync());
    assert_eq!(extractor.bytes_skipped(), 9);
    assert_eq!(extractor.by_ref().filter(Result::is_ok).count(), 2);
    assert_eq!(extractor.buffered(), 0);
}

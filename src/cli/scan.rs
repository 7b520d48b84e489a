use std::path::Path;

use anyhow::Result;
use log::{debug, warn};

use crate::input::InputReader;
use av3a::process::extract::{Extractor, Frame};

const CHUNK_SIZE: usize = 64 * 1024;

/// Drives an [`Extractor`] over an input, resynchronizing on bad headers
/// unless running strict.
pub struct FrameScanner {
    extractor: Extractor,
    strict: bool,
    error_count: usize,
    total_bytes: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStats {
    pub frames: usize,
    pub total_bytes: usize,
    pub skipped_bytes: usize,
    pub trailing_bytes: usize,
    pub errors: usize,
}

impl FrameScanner {
    pub fn new(strict: bool) -> Self {
        Self {
            extractor: Extractor::default(),
            strict,
            error_count: 0,
            total_bytes: 0,
        }
    }

    /// Calls `on_frame` for every frame in the input until it returns
    /// `Ok(false)` or the input ends.
    pub fn run<F>(self, input_path: &Path, on_frame: F) -> Result<ScanStats>
    where
        F: FnMut(&Frame) -> Result<bool>,
    {
        let input_reader = InputReader::new(input_path)?;
        if input_reader.is_pipe() {
            debug!("Reading bitstream from stdin");
        }

        self.scan(input_reader, CHUNK_SIZE, on_frame)
    }

    fn scan<F>(
        mut self,
        mut input: InputReader,
        chunk_size: usize,
        mut on_frame: F,
    ) -> Result<ScanStats>
    where
        F: FnMut(&Frame) -> Result<bool>,
    {
        let mut stopped = false;

        input.process_chunks(chunk_size, |chunk| {
            self.total_bytes += chunk.len();
            self.extractor.push_bytes(chunk);

            stopped = !self.drain(&mut on_frame)?;
            Ok(!stopped)
        })?;

        let mut trailing_bytes = 0;
        if !stopped {
            if let Err(e) = self.extractor.finish() {
                if self.strict {
                    return Err(e.into());
                }
                warn!("{e}");
                trailing_bytes = self.extractor.buffered();
            }
        }

        Ok(ScanStats {
            frames: self.extractor.frames_extracted(),
            total_bytes: self.total_bytes,
            skipped_bytes: self.extractor.bytes_skipped(),
            trailing_bytes,
            errors: self.error_count,
        })
    }

    fn drain<F>(&mut self, on_frame: &mut F) -> Result<bool>
    where
        F: FnMut(&Frame) -> Result<bool>,
    {
        loop {
            match self.extractor.next() {
                Some(Ok(frame)) => {
                    if !on_frame(&frame)? {
                        return Ok(false);
                    }
                }
                Some(Err(e)) => {
                    if self.strict {
                        return Err(e.into());
                    }

                    self.error_count += 1;
                    warn!("{e}, resynchronizing");
                    self.extractor.resync();
                }
                None => return Ok(true),
            }
        }
    }
}

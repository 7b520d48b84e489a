use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Bitstream source: a file, or stdin when the path is "-".
pub struct InputReader {
    reader: Box<dyn Read>,
    is_pipe: bool,
}

impl InputReader {
    pub fn new<P: AsRef<Path>>(input_path: P) -> Result<Self> {
        let path = input_path.as_ref();

        if path.as_os_str() == "-" {
            return Ok(Self::from_reader(io::stdin().lock(), true));
        }

        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Self::from_reader(BufReader::new(file), false))
    }

    pub fn from_reader<R: Read + 'static>(reader: R, is_pipe: bool) -> Self {
        Self {
            reader: Box::new(reader),
            is_pipe,
        }
    }

    pub fn is_pipe(&self) -> bool {
        self.is_pipe
    }

    /// Feeds the input to `callback` in chunks of at most `chunk_size` bytes
    /// until EOF or until the callback returns `Ok(false)`.
    pub fn process_chunks<F>(&mut self, chunk_size: usize, mut callback: F) -> Result<()>
    where
        F: FnMut(&[u8]) -> Result<bool>,
    {
        let mut buffer = vec![0u8; chunk_size];

        loop {
            let bytes_read = match self.reader.read(&mut buffer) {
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if !callback(&buffer[..bytes_read])? {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn chunks_cover_the_input_in_order() -> Result<()> {
        let data: Vec<u8> = (0..=255).collect();
        let mut reader = InputReader::from_reader(Cursor::new(data.clone()), false);

        let mut seen = Vec::new();
        let mut calls = 0;
        reader.process_chunks(100, |chunk| {
            assert!(chunk.len() <= 100);
            seen.extend_from_slice(chunk);
            calls += 1;
            Ok(true)
        })?;

        assert_eq!(seen, data);
        assert_eq!(calls, 3);
        assert!(!reader.is_pipe());
        Ok(())
    }

    #[test]
    fn callback_can_stop_early() -> Result<()> {
        let mut reader = InputReader::from_reader(Cursor::new(vec![0u8; 1000]), false);

        let mut calls = 0;
        reader.process_chunks(10, |_| {
            calls += 1;
            Ok(calls < 2)
        })?;

        assert_eq!(calls, 2);
        Ok(())
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = InputReader::new("/nonexistent/stream.av3a").err().unwrap();
        assert!(err.to_string().contains("/nonexistent/stream.av3a"));
    }
}

//! Chunk sources over readers
//!
//! Adapts any `Read` into the fallible chunk iterator consumed by the stream
//! translator. Decompression and record parsing belong upstream; this only
//! slices raw bytes.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

// Default read buffer size
const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024; // 64KB

/// Reader that yields fixed-capacity byte chunks
pub struct ChunkReader<R> {
    reader: R,
    buffer_size: usize,
    bytes_read: usize,
    finished: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Wrap a reader; `buffer_size` bounds each yielded chunk
    pub fn new(reader: R, buffer_size: Option<usize>) -> Self {
        Self {
            reader,
            buffer_size: buffer_size.unwrap_or(DEFAULT_READ_BUFFER_SIZE).max(1),
            bytes_read: 0,
            finished: false,
        }
    }

    /// Get the buffer size being used
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Total bytes yielded so far
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }
}

impl ChunkReader<File> {
    /// Open a file as a chunk source; each chunk is filled straight from the file
    pub fn open<P: AsRef<Path>>(path: P, buffer_size: Option<usize>) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(file, buffer_size))
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut chunk = vec![0u8; self.buffer_size];
        loop {
            match self.reader.read(&mut chunk) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(n) => {
                    chunk.truncate(n);
                    self.bytes_read += n;
                    return Some(Ok(chunk));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

//! Boundary-aligned stream translation
//!
//! Translates a sequence delivered as arbitrarily sized chunks as if it were
//! one contiguous forward frame 0. Bases are buffered until a full window
//! (`chunk_size` rounded down to a codon multiple) is available; whatever is
//! left over is carried into the next chunk, so codons are never split across
//! windows and the concatenated output equals a single-call translation.

use std::collections::VecDeque;
use std::error::Error;
use std::sync::Arc;

use crate::engines::compute::translate::translate_frame_into;
use crate::engines::{EngineError, EngineResult};
use crate::modules::genetic_code::CompiledLookup;
use crate::modules::translation::TranslationResult;

/// Default stream window size
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024; // 1MB

/// Lifecycle of a stream cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Accepting chunks
    Running,
    /// A stop codon ended translation
    Stopped,
    /// The source was exhausted or closed
    Done,
}

/// Push-style stream translation state
#[derive(Debug)]
pub struct StreamCursor {
    lookup: Arc<CompiledLookup>,
    stop_symbol: char,
    break_on_stop: bool,
    /// Buffered bases needed before a window is translated
    threshold: usize,
    /// Bases per translated window, a multiple of 3
    window: usize,
    pending: Vec<u8>,
    state: StreamState,
    bases_translated: usize,
}

impl StreamCursor {
    /// Create a cursor; a `chunk_size` below 3 behaves as 3
    pub fn new(
        lookup: Arc<CompiledLookup>,
        stop_symbol: char,
        break_on_stop: bool,
        chunk_size: usize,
    ) -> Self {
        let threshold = chunk_size.max(3);
        let window = threshold - threshold % 3;
        Self {
            lookup,
            stop_symbol,
            break_on_stop,
            threshold,
            window,
            pending: Vec::with_capacity(threshold),
            state: StreamState::Running,
            bases_translated: 0,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Whether the cursor accepts no further input
    pub fn is_terminal(&self) -> bool {
        self.state != StreamState::Running
    }

    /// Bases buffered but not yet translated
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Bases translated so far
    pub fn bases_translated(&self) -> usize {
        self.bases_translated
    }

    /// Window size in bases
    pub fn window(&self) -> usize {
        self.window
    }

    fn emit(&mut self, start: usize, end: usize) -> Option<TranslationResult> {
        let mut protein = String::new();
        let prefix = &self.pending[start..end];
        let halted = translate_frame_into(
            prefix,
            &self.lookup,
            self.stop_symbol,
            self.break_on_stop,
            0,
            &mut protein,
        );
        self.bases_translated += prefix.len();

        if halted {
            self.state = StreamState::Stopped;
            log::debug!("Stream stopped at a stop codon after {} bases", self.bases_translated);
        }

        if protein.is_empty() {
            None
        } else {
            Some(TranslationResult::new(protein, 0, false, end - start))
        }
    }

    /// Feed one chunk and collect every window it completes.
    ///
    /// Whitespace inside the chunk (line breaks from sequence files) is
    /// skipped. Input after the cursor has stopped is ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<TranslationResult> {
        let mut results = Vec::new();
        if self.is_terminal() {
            return results;
        }

        self.pending.extend(
            chunk
                .iter()
                .filter(|b| !b.is_ascii_whitespace())
                .map(|b| b.to_ascii_uppercase()),
        );

        let mut start = 0;
        while self.pending.len() - start >= self.threshold && !self.is_terminal() {
            let end = start + self.window;
            if let Some(result) = self.emit(start, end) {
                results.push(result);
            }
            start = end;
        }

        if self.is_terminal() {
            self.pending.clear();
        } else {
            self.pending.drain(..start);
        }

        results
    }

    /// Flush the carried bases once the source is exhausted
    pub fn finish(&mut self) -> Option<TranslationResult> {
        if self.is_terminal() {
            return None;
        }

        let result = if self.pending.len() >= 3 {
            self.emit(0, self.pending.len())
        } else {
            None
        };
        self.pending.clear();

        if self.state == StreamState::Running {
            self.state = StreamState::Done;
        }
        log::debug!("Stream finished after {} bases", self.bases_translated);
        result
    }

    /// Abandon the stream without flushing carried bases
    pub fn close(&mut self) {
        self.pending.clear();
        if self.state == StreamState::Running {
            self.state = StreamState::Done;
        }
    }
}

/// Pull-style stream translation over a fallible chunk source
///
/// Yields one `TranslationResult` per translated window. A source error is
/// yielded once and ends the stream; results already yielded stay valid.
pub struct StreamTranslator<I> {
    source: Option<I>,
    cursor: StreamCursor,
    ready: VecDeque<TranslationResult>,
}

impl<I> StreamTranslator<I> {
    pub fn new(source: I, cursor: StreamCursor) -> Self {
        Self {
            source: Some(source),
            cursor,
            ready: VecDeque::new(),
        }
    }

    pub fn state(&self) -> StreamState {
        self.cursor.state()
    }

    /// Stop pulling from the source; nothing further is yielded
    pub fn close(&mut self) {
        self.source = None;
        self.ready.clear();
        self.cursor.close();
    }
}

impl<I, C, E> Iterator for StreamTranslator<I>
where
    I: Iterator<Item = Result<C, E>>,
    C: AsRef<[u8]>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    type Item = EngineResult<TranslationResult>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(result) = self.ready.pop_front() {
                return Some(Ok(result));
            }

            if self.cursor.is_terminal() {
                self.source = None;
                return None;
            }

            let source = self.source.as_mut()?;
            match source.next() {
                Some(Ok(chunk)) => {
                    let results = self.cursor.feed(chunk.as_ref());
                    self.ready.extend(results);
                }
                Some(Err(err)) => {
                    self.source = None;
                    self.cursor.close();
                    return Some(Err(EngineError::StreamSource(err.into())));
                }
                None => {
                    self.source = None;
                    if let Some(result) = self.cursor.finish() {
                        self.ready.push_back(result);
                    }
                }
            }
        }
    }
}

//! Charset decoding of response bodies.

use encoding_rs::{CoderResult, Decoder, Encoding};
use std::cell::RefCell;
use std::io::{self, Read};

const SCRATCH_CAPACITY: usize = 32 * 1024;
/// Scratch buffers that grew past this are released after use.
const SCRATCH_RETAIN_LIMIT: usize = 4 * 1024 * 1024;

thread_local! {
    static SCRATCH: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(SCRATCH_CAPACITY));
}

/// Read a whole body and decode it with `encoding`.
///
/// The raw bytes are collected in a per-thread scratch buffer so sequential
/// calls on one thread do not reallocate it. Malformed sequences decode to
/// U+FFFD; a leading BOM overrides `encoding`.
pub fn read_to_string<R: Read>(reader: R, encoding: &'static Encoding) -> io::Result<String> {
    SCRATCH.with(|cell| match cell.try_borrow_mut() {
        Ok(mut buf) => {
            let result = decode_into(reader, encoding, &mut buf);
            if buf.capacity() > SCRATCH_RETAIN_LIMIT {
                *buf = Vec::with_capacity(SCRATCH_CAPACITY);
            }
            result
        }
        Err(_) => decode_into(reader, encoding, &mut Vec::new()),
    })
}

fn decode_into<R: Read>(
    mut reader: R,
    encoding: &'static Encoding,
    buf: &mut Vec<u8>,
) -> io::Result<String> {
    buf.clear();
    reader.read_to_end(buf)?;
    let (text, _, _) = encoding.decode(buf);
    Ok(text.into_owned())
}

/// Streaming decoder: reads bytes in `encoding` and yields UTF-8.
pub struct DecodingReader<R> {
    inner: R,
    decoder: Decoder,
    input: Vec<u8>,
    in_pos: usize,
    in_len: usize,
    output: Vec<u8>,
    out_pos: usize,
    out_len: usize,
    eof: bool,
    finished: bool,
}

impl<R: Read> DecodingReader<R> {
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self::with_capacity(SCRATCH_CAPACITY, inner, encoding)
    }

    pub fn with_capacity(capacity: usize, inner: R, encoding: &'static Encoding) -> Self {
        // room for at least one multi-byte sequence either side
        let capacity = capacity.max(16);
        Self {
            inner,
            decoder: encoding.new_decoder(),
            input: vec![0; capacity],
            in_pos: 0,
            in_len: 0,
            output: vec![0; capacity * 3],
            out_pos: 0,
            out_len: 0,
            eof: false,
            finished: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill_output(&mut self) -> io::Result<()> {
        if self.in_pos == self.in_len && !self.eof {
            self.in_len = self.inner.read(&mut self.input)?;
            self.in_pos = 0;
            self.eof = self.in_len == 0;
        }
        let (result, read, written, _) = self.decoder.decode_to_utf8(
            &self.input[self.in_pos..self.in_len],
            &mut self.output,
            self.eof,
        );
        self.in_pos += read;
        self.out_pos = 0;
        self.out_len = written;
        if self.eof && result == CoderResult::InputEmpty {
            self.finished = true;
        }
        Ok(())
    }
}

impl<R: Read> Read for DecodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.out_pos == self.out_len {
            if self.finished {
                return Ok(0);
            }
            self.fill_output()?;
        }
        let n = buf.len().min(self.out_len - self.out_pos);
        buf[..n].copy_from_slice(&self.output[self.out_pos..self.out_pos + n]);
        self.out_pos += n;
        Ok(n)
    }
}

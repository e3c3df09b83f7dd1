use std::{
    error, fmt,
    io::{self, Write},
};

use http::{
    header::{HeaderValue, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE},
    StatusCode,
};
use http1_wire::{
    chunked_body_renderer::{render_chunk, render_chunk_terminator, render_trailer_section},
    headers::Headers,
    response_head_renderer::{render_field_section, render_status_line},
    CRLF,
};

//
//
//
/// Strict-order response serializer. Each write is validated against the
/// current state before any byte reaches the sink, so a rejected call leaves
/// the already-written prefix intact.
///
/// The blank line ending the field section is not written by `write_headers`;
/// the first body or chunk write emits it.
///
/// A completed message rejects further body and trailer writes.
pub struct ResponseWriter<W>
where
    W: Write,
{
    w: W,
    buf: Vec<u8>,
    state: WriterState,
    content_length_written: bool,
    chunk_terminated: bool,
    completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WriterState {
    Init,
    WroteStatusLine,
    WroteHeaders,
    WritingBody,
}
impl Default for WriterState {
    fn default() -> Self {
        Self::Init
    }
}

impl<W> ResponseWriter<W>
where
    W: Write,
{
    pub fn new(w: W) -> Self {
        Self {
            w,
            buf: Vec::with_capacity(1024),
            state: Default::default(),
            content_length_written: false,
            chunk_terminated: false,
            completed: false,
        }
    }

    pub fn state(&self) -> WriterState {
        self.state
    }
    pub fn into_inner(self) -> W {
        self.w
    }

    fn require_state(&self, required: WriterState) -> Result<(), EncodeError> {
        if self.state == required {
            Ok(())
        } else {
            Err(EncodeError::OrderingViolation {
                required,
                actual: self.state,
            })
        }
    }

    fn flush_buf(&mut self) -> Result<usize, EncodeError> {
        self.w.write_all(&self.buf).map_err(EncodeError::WriteError)?;
        let n = self.buf.len();
        self.buf.clear();
        Ok(n)
    }

    //
    pub fn write_status_line(&mut self, status: StatusCode) -> Result<(), EncodeError> {
        self.require_state(WriterState::Init)?;

        self.buf.clear();
        render_status_line(status, &mut self.buf);
        self.flush_buf()?;

        self.state = WriterState::WroteStatusLine;
        Ok(())
    }

    pub fn write_headers(&mut self, headers: &Headers) -> Result<(), EncodeError> {
        self.require_state(WriterState::WroteStatusLine)?;

        self.buf.clear();
        render_field_section(headers, &mut self.buf);
        self.flush_buf()?;

        self.content_length_written = headers.get("content-length").is_some();
        self.state = WriterState::WroteHeaders;
        Ok(())
    }

    /// Emits the whole fixed-length body, synthesizing a `content-length`
    /// field when none was written, and the blank line before it.
    pub fn write_body(&mut self, body: &[u8]) -> Result<usize, EncodeError> {
        self.require_state(WriterState::WroteHeaders)?;

        self.buf.clear();
        if !self.content_length_written {
            self.buf
                .extend_from_slice(format!("content-length: {}\r\n", body.len()).as_bytes());
        }
        self.buf.extend_from_slice(CRLF);
        self.buf.extend_from_slice(body);
        let n = self.flush_buf()?;

        self.state = WriterState::WritingBody;
        self.completed = true;
        Ok(n)
    }

    pub fn write_chunk(&mut self, payload: &[u8]) -> Result<usize, EncodeError> {
        match self.state {
            WriterState::WroteHeaders => {}
            WriterState::WritingBody => {
                if self.completed {
                    return Err(EncodeError::MessageAlreadyCompleted);
                }
                if self.chunk_terminated {
                    return Err(EncodeError::BodyAlreadyTerminated);
                }
            }
            actual => {
                return Err(EncodeError::OrderingViolation {
                    required: WriterState::WroteHeaders,
                    actual,
                })
            }
        }

        self.buf.clear();
        if self.state == WriterState::WroteHeaders {
            self.buf.extend_from_slice(CRLF);
        }
        render_chunk(payload, &mut self.buf);
        let n = self.flush_buf()?;

        self.state = WriterState::WritingBody;
        Ok(n)
    }

    pub fn write_chunk_terminator(&mut self) -> Result<usize, EncodeError> {
        self.require_state(WriterState::WritingBody)?;
        if self.completed {
            return Err(EncodeError::MessageAlreadyCompleted);
        }
        if self.chunk_terminated {
            return Err(EncodeError::BodyAlreadyTerminated);
        }

        self.buf.clear();
        render_chunk_terminator(&mut self.buf);
        let n = self.flush_buf()?;

        self.chunk_terminated = true;
        Ok(n)
    }

    pub fn write_trailers(&mut self, trailers: &Headers) -> Result<(), EncodeError> {
        self.require_state(WriterState::WritingBody)?;
        if self.completed {
            return Err(EncodeError::MessageAlreadyCompleted);
        }
        if !self.chunk_terminated {
            return Err(EncodeError::TerminatorNotWritten);
        }

        self.buf.clear();
        render_trailer_section(trailers, &mut self.buf);
        self.flush_buf()?;

        self.completed = true;
        Ok(())
    }

    /// Ends a chunked message without trailers: the blank line after the
    /// zero-size chunk.
    pub fn finish(&mut self) -> Result<usize, EncodeError> {
        self.require_state(WriterState::WritingBody)?;
        if self.completed {
            return Err(EncodeError::MessageAlreadyCompleted);
        }
        if !self.chunk_terminated {
            return Err(EncodeError::TerminatorNotWritten);
        }

        self.buf.clear();
        self.buf.extend_from_slice(CRLF);
        let n = self.flush_buf()?;

        self.completed = true;
        Ok(n)
    }
}

//
//
//
/// Baseline response fields. Every one may be overridden before
/// `write_headers`.
pub fn default_headers(content_length: usize) -> Headers {
    let mut headers = Headers::new();
    headers.set(CONTENT_LENGTH, HeaderValue::from(content_length as u64));
    headers.set(CONNECTION, HeaderValue::from_static("close"));
    headers.set(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers
}

//
//
//
#[derive(Debug)]
pub enum EncodeError {
    WriteError(io::Error),
    OrderingViolation {
        required: WriterState,
        actual: WriterState,
    },
    BodyAlreadyTerminated,
    TerminatorNotWritten,
    MessageAlreadyCompleted,
}
impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl error::Error for EncodeError {}

impl From<EncodeError> for io::Error {
    fn from(err: EncodeError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
    }
}

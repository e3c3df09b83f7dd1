use std::{
    cmp, error, fmt,
    io::{self, BufReader, Read},
    mem,
};

use http::Request;
use http1_wire::{
    body_framing::{BodyFraming, BodyFramingDetector},
    body_parser::{BodyParseError, BodyParseOutput, BodyParser},
    content_length_body_parser::ContentLengthBodyParser,
    head_parser::{HeadParseConfig, HeadParseError},
    headers::Headers,
    request_line::RequestLine,
};

//
//
//
pub const DEFAULT_BUF_CAPACITY: usize = 1024;

//
//
//
/// Assembles one request from a blocking reader. Bytes land in an internal
/// growable buffer; the wire parsers only ever see the unparsed window, and
/// an incomplete unit is re-offered from the window start on the next pass.
pub struct Http1RequestDecoder {
    //
    request_line: Option<RequestLine>,
    headers: Headers,
    content_length_body_parser: ContentLengthBodyParser,
    body_buf: Vec<u8>,
    //
    config: HeadParseConfig,
    line_buf: Vec<u8>,
    buf: Vec<u8>,
    offset_read: usize,
    offset_parsed: usize,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    Initialized,
    ParsingHeaders,
    ParsingBody,
    Done,
}
impl Default for State {
    fn default() -> Self {
        Self::Initialized
    }
}

impl Default for Http1RequestDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_BUF_CAPACITY, None)
    }
}

impl Http1RequestDecoder {
    pub fn new(buf_capacity: usize, config: Option<HeadParseConfig>) -> Self {
        Self {
            request_line: None,
            headers: Headers::new(),
            content_length_body_parser: ContentLengthBodyParser::new(),
            body_buf: Vec::new(),
            config: config.unwrap_or_default(),
            line_buf: Vec::new(),
            buf: vec![0u8; cmp::max(buf_capacity, 1)],
            offset_read: 0,
            offset_parsed: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }
    pub fn has_unparsed_bytes(&self) -> bool {
        self.offset_read > self.offset_parsed
    }

    //
    pub fn read_request<R: Read>(&mut self, r: &mut R) -> Result<Request<Vec<u8>>, DecodeError> {
        loop {
            if self.state == State::Done {
                break;
            }

            self.rotate_offset();
            self.read(r)?;
            self.parse_available()?;
        }

        let request_line = self.request_line.take().ok_or(DecodeError::AlreadyDone)?;

        let mut request = Request::new(mem::take(&mut self.body_buf));
        *request.method_mut() = request_line.method;
        *request.uri_mut() = request_line.target;
        *request.version_mut() = request_line.version;
        *request.headers_mut() = mem::take(&mut self.headers).into_header_map();

        Ok(request)
    }

    fn rotate_offset(&mut self) {
        let n = self.offset_parsed;
        self.buf.rotate_left(n);
        self.offset_read -= n;
        self.offset_parsed = 0;
    }

    fn read<R: Read>(&mut self, r: &mut R) -> Result<(), DecodeError> {
        if self.offset_read == self.buf.len() {
            let len = self.buf.len();
            self.buf.resize(len * 2, 0);
        }

        let n = r
            .read(&mut self.buf[self.offset_read..])
            .map_err(DecodeError::ReadError)?;
        if n == 0 {
            return Err(self.eof_error());
        }
        self.offset_read += n;
        Ok(())
    }

    fn eof_error(&self) -> DecodeError {
        if self.state == State::ParsingBody {
            DecodeError::Body(BodyParseError::BodyLengthMismatch {
                declared: self.content_length_body_parser.get_declared(),
                actual: self.content_length_body_parser.get_consumed(),
            })
        } else {
            DecodeError::UnexpectedEof
        }
    }

    fn parse_available(&mut self) -> Result<(), DecodeError> {
        loop {
            match self.state {
                State::Initialized => {
                    self.line_buf.clear();
                    let mut take =
                        BufReader::new(&self.buf[self.offset_parsed..self.offset_read]).take(0);

                    match RequestLine::parse(&mut take, &mut self.line_buf, &self.config)? {
                        Some((request_line, n)) => {
                            self.request_line = Some(request_line);
                            self.offset_parsed += n;

                            self.state = State::ParsingHeaders;
                        }
                        None => return Ok(()),
                    }
                }
                State::ParsingHeaders => {
                    self.line_buf.clear();
                    let mut take =
                        BufReader::new(&self.buf[self.offset_parsed..self.offset_read]).take(0);

                    match Headers::parse_line(
                        &mut take,
                        &mut self.line_buf,
                        &self.config,
                        &mut self.headers,
                    )? {
                        Some((true, n)) => {
                            self.offset_parsed += n;

                            match (&self.headers).detect()? {
                                BodyFraming::ContentLength(declared) if declared > 0 => {
                                    self.content_length_body_parser.set_length(declared);

                                    self.state = State::ParsingBody;
                                }
                                _ => {
                                    self.state = State::Done;
                                }
                            }
                        }
                        Some((false, n)) => {
                            self.offset_parsed += n;
                        }
                        None => return Ok(()),
                    }
                }
                State::ParsingBody => {
                    let mut buf_reader =
                        BufReader::new(&self.buf[self.offset_parsed..self.offset_read]);

                    match self
                        .content_length_body_parser
                        .parse(&mut buf_reader, &mut self.body_buf)?
                    {
                        BodyParseOutput::Completed(n) => {
                            self.offset_parsed += n;

                            self.state = State::Done;
                        }
                        BodyParseOutput::Partial(n) => {
                            self.offset_parsed += n;

                            return Ok(());
                        }
                    }
                }
                State::Done => return Ok(()),
            }
        }
    }
}

//
//
//
#[derive(Debug)]
pub enum DecodeError {
    ReadError(io::Error),
    Head(HeadParseError),
    Body(BodyParseError),
    UnexpectedEof,
    AlreadyDone,
}
impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl error::Error for DecodeError {}

impl From<HeadParseError> for DecodeError {
    fn from(err: HeadParseError) -> Self {
        Self::Head(err)
    }
}
impl From<BodyParseError> for DecodeError {
    fn from(err: BodyParseError) -> Self {
        Self::Body(err)
    }
}
impl From<DecodeError> for io::Error {
    fn from(err: DecodeError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
    }
}

//
//
//
pub fn request_from_reader<R: Read>(r: &mut R) -> Result<Request<Vec<u8>>, DecodeError> {
    let mut decoder = Http1RequestDecoder::default();
    decoder.read_request(r)
}

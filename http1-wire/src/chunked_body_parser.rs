use std::{
    io::{BufRead, Read},
    mem, str,
};

use crate::body_parser::{BodyParseError, BodyParseOutput, BodyParser};
use crate::head_parser::HeadParseConfig;
use crate::headers::Headers;
use crate::{CR, CRLF, LF};

//
//
//
const SIZE_MAX_LEN: usize = 8; // b"FFFFFFFF"

//
//
//
#[derive(Default)]
pub struct ChunkedBodyParser {
    //
    config: HeadParseConfig,
    state: State,
    line_buf: Vec<u8>,
    length: usize,
    trailers: Headers,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum State {
    Idle,
    WaitSizeParse,
    WaitDataParse,
    WaitDataParsing,
    WaitCRLFParse,
    WaitTrailersParse,
}
impl Default for State {
    fn default() -> Self {
        Self::Idle
    }
}

impl ChunkedBodyParser {
    pub fn new() -> Self {
        Self {
            line_buf: Vec::with_capacity(SIZE_MAX_LEN + 2),
            ..Default::default()
        }
    }

    pub fn with_config(config: HeadParseConfig) -> Self {
        Self {
            config,
            line_buf: Vec::with_capacity(SIZE_MAX_LEN + 2),
            ..Default::default()
        }
    }

    /// Trailer fields seen after the zero-size chunk of the last completed
    /// body.
    pub fn get_trailers(&self) -> &Headers {
        &self.trailers
    }
    pub fn take_trailers(&mut self) -> Headers {
        mem::take(&mut self.trailers)
    }
}

//
//
//
impl BodyParser for ChunkedBodyParser {
    fn parse<R: BufRead>(
        &mut self,
        r: &mut R,
        body_buf: &mut Vec<u8>,
    ) -> Result<BodyParseOutput, BodyParseError> {
        let mut take = r.take(0);
        let mut parsed_num_bytes = 0_usize;

        if self.state == State::Idle {
            self.trailers.clear();
        }

        loop {
            if self.state <= State::WaitSizeParse {
                let end_bytes_len = 2_usize;
                take.set_limit(SIZE_MAX_LEN as u64 + end_bytes_len as u64);

                self.line_buf.clear();
                let n = take
                    .read_until(LF, &mut self.line_buf)
                    .map_err(BodyParseError::ReadError)?;

                if n < end_bytes_len {
                    return Ok(BodyParseOutput::Partial(parsed_num_bytes));
                }
                if !self.line_buf[..n].ends_with(&[LF]) {
                    if n >= SIZE_MAX_LEN + end_bytes_len {
                        return Err(BodyParseError::TooLongChunkSizeLine);
                    } else {
                        return Ok(BodyParseOutput::Partial(parsed_num_bytes));
                    }
                }
                if !self.line_buf[..n - 1].ends_with(&[CR]) {
                    return Err(BodyParseError::InvalidCRLF);
                }
                let size_bytes = &self.line_buf[..n - end_bytes_len];
                let size_str = str::from_utf8(size_bytes)
                    .map_err(|_| BodyParseError::InvalidChunkSize(None))?;
                let length = usize::from_str_radix(size_str, 16)
                    .map_err(|err| BodyParseError::InvalidChunkSize(Some(err)))?;

                self.length = length;
                parsed_num_bytes += n;

                if length == 0 {
                    self.state = State::WaitTrailersParse;
                } else {
                    self.state = State::WaitDataParse;
                }
            }

            if self.state <= State::WaitDataParsing {
                take.set_limit(self.length as u64);

                let n = take
                    .read_to_end(body_buf)
                    .map_err(BodyParseError::ReadError)?;

                self.length -= n;
                parsed_num_bytes += n;

                if self.length == 0 {
                    self.state = State::WaitCRLFParse;
                } else {
                    self.state = State::WaitDataParsing;

                    return Ok(BodyParseOutput::Partial(parsed_num_bytes));
                }
            }

            if self.state == State::WaitCRLFParse {
                let end_bytes_len = 2_usize;
                take.set_limit(end_bytes_len as u64);

                self.line_buf.clear();
                let n = take
                    .read_until(LF, &mut self.line_buf)
                    .map_err(BodyParseError::ReadError)?;
                if n < end_bytes_len {
                    return Ok(BodyParseOutput::Partial(parsed_num_bytes));
                }
                if &self.line_buf[..n] != CRLF {
                    return Err(BodyParseError::InvalidCRLF);
                }
                parsed_num_bytes += n;

                self.state = State::WaitSizeParse;

                continue;
            }

            if self.state == State::WaitTrailersParse {
                self.line_buf.clear();
                match Headers::parse_line(
                    &mut take,
                    &mut self.line_buf,
                    &self.config,
                    &mut self.trailers,
                )
                .map_err(BodyParseError::InvalidTrailerField)?
                {
                    Some((true, n)) => {
                        parsed_num_bytes += n;

                        self.state = State::Idle;

                        break Ok(BodyParseOutput::Completed(parsed_num_bytes));
                    }
                    Some((false, n)) => {
                        parsed_num_bytes += n;

                        continue;
                    }
                    None => return Ok(BodyParseOutput::Partial(parsed_num_bytes)),
                }
            }

            unreachable!()
        }
    }
}

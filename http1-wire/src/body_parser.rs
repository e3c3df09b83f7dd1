use std::{error, fmt, io, num::ParseIntError};

use crate::head_parser::HeadParseError;

//
//
//
pub trait BodyParser {
    fn parse<R: io::BufRead>(
        &mut self,
        r: &mut R,
        body_buf: &mut Vec<u8>,
    ) -> Result<BodyParseOutput, BodyParseError>;
}

//
#[derive(Debug, PartialEq, Eq)]
pub enum BodyParseOutput {
    Completed(usize),
    Partial(usize),
}

//
#[derive(Debug)]
pub enum BodyParseError {
    ReadError(io::Error),
    InvalidContentLength(Option<ParseIntError>),
    BodyLengthMismatch { declared: usize, actual: usize },
    TooLongChunkSizeLine,
    InvalidChunkSize(Option<ParseIntError>),
    InvalidCRLF,
    InvalidTrailerField(HeadParseError),
}
impl fmt::Display for BodyParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl error::Error for BodyParseError {}

impl From<BodyParseError> for io::Error {
    fn from(err: BodyParseError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
    }
}

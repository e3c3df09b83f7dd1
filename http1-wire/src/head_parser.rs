use std::{
    cmp, error, fmt,
    io::{self},
};

use http::{
    header::{InvalidHeaderName, InvalidHeaderValue},
    method::InvalidMethod,
    uri::InvalidUri,
};

//
//
//
const REQUEST_LINE_MAX_LEN: usize = 8192;
const FIELD_LINE_MAX_LEN: usize = 8192;

pub type IsAllCompleted = bool;

//
//
//
#[derive(Debug, Clone)]
pub struct HeadParseConfig {
    request_line_max_len: usize,
    field_line_max_len: usize,
}
impl Default for HeadParseConfig {
    fn default() -> Self {
        HeadParseConfig {
            request_line_max_len: 2048,
            field_line_max_len: 32 + 448,
        }
    }
}
impl HeadParseConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn buf_capacity(&self) -> usize {
        cmp::max(
            self.get_request_line_max_len(),
            self.get_field_line_max_len(),
        )
    }

    pub fn set_request_line_max_len(&mut self, value: u16) -> &mut Self {
        self.request_line_max_len = cmp::min(value as usize, REQUEST_LINE_MAX_LEN);
        self
    }
    pub fn get_request_line_max_len(&self) -> usize {
        self.request_line_max_len
    }
    pub fn set_field_line_max_len(&mut self, value: u16) -> &mut Self {
        self.field_line_max_len = cmp::min(value as usize, FIELD_LINE_MAX_LEN);
        self
    }
    pub fn get_field_line_max_len(&self) -> usize {
        self.field_line_max_len
    }
}

//
//
//
#[derive(Debug)]
pub enum HeadParseError {
    ReadError(io::Error),
    TooLongRequestLine,
    InvalidRequestLine,
    MethodNotUppercase,
    InvalidMethod(InvalidMethod),
    InvalidUri(InvalidUri),
    UnknownProtocol,
    UnsupportedHttpVersion,
    InvalidCRLF,
    TooLongFieldLine,
    FieldLineMissingColon,
    FieldNameTrailingWhitespace,
    InvalidFieldName(InvalidHeaderName),
    InvalidFieldValue(InvalidHeaderValue),
}
impl fmt::Display for HeadParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl error::Error for HeadParseError {}
impl From<HeadParseError> for io::Error {
    fn from(err: HeadParseError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
    }
}

use std::{
    io::{BufRead, Take},
    str,
};

use http::{Method, Uri, Version};

use crate::head_parser::{HeadParseConfig, HeadParseError};
use crate::{CR, LF};

//
//
//
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLine {
    pub method: Method,
    pub target: Uri,
    pub version: Version,
}

impl RequestLine {
    /// Parses the request line from the window. `Ok(None)` means the line is
    /// not complete yet and nothing counts as consumed.
    pub fn parse<R: BufRead>(
        take: &mut Take<R>,
        buf: &mut Vec<u8>,
        config: &HeadParseConfig,
    ) -> Result<Option<(Self, usize)>, HeadParseError> {
        let end_bytes_len = 2_usize;
        take.set_limit(config.get_request_line_max_len() as u64 + end_bytes_len as u64);
        let n = take.read_until(LF, buf).map_err(HeadParseError::ReadError)?;
        if n < end_bytes_len {
            return Ok(None);
        }
        if !buf[..n].ends_with(&[LF]) {
            if n >= config.get_request_line_max_len() + end_bytes_len {
                return Err(HeadParseError::TooLongRequestLine);
            } else {
                return Ok(None);
            }
        }
        if !buf[..n - 1].ends_with(&[CR]) {
            return Err(HeadParseError::InvalidCRLF);
        }

        let line = str::from_utf8(&buf[..n - end_bytes_len])
            .map_err(|_| HeadParseError::InvalidRequestLine)?;

        let mut parts = line.split_ascii_whitespace();
        let (method_str, target_str, version_str) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(method_str), Some(target_str), Some(version_str), None) => {
                    (method_str, target_str, version_str)
                }
                _ => return Err(HeadParseError::InvalidRequestLine),
            };

        if !method_str.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(HeadParseError::MethodNotUppercase);
        }
        let method =
            Method::from_bytes(method_str.as_bytes()).map_err(HeadParseError::InvalidMethod)?;

        let target = target_str
            .parse::<Uri>()
            .map_err(HeadParseError::InvalidUri)?;

        let version = match version_str.split_once('/') {
            Some(("HTTP", "1.1")) => Version::HTTP_11,
            Some(("HTTP", _)) => return Err(HeadParseError::UnsupportedHttpVersion),
            _ => return Err(HeadParseError::UnknownProtocol),
        };

        Ok(Some((
            Self {
                method,
                target,
                version,
            },
            n,
        )))
    }
}

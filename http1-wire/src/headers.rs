use std::io::{BufRead, Take};

use http::{
    header::{Entry, HeaderName, HeaderValue, Iter},
    HeaderMap,
};

use crate::head_parser::{HeadParseConfig, HeadParseError, IsAllCompleted};
use crate::{COLON, CR, LF};

//
//
//
/// Ordered field store with lowercase-normalized names. Duplicate names are
/// merged into a single comma-joined value, so iteration yields one entry per
/// name in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    inner: HeaderMap<HeaderValue>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: HeaderMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.inner.get(name)
    }
    pub fn set(&mut self, name: HeaderName, value: HeaderValue) {
        self.inner.insert(name, value);
    }
    pub fn remove(&mut self, name: &str) -> Option<HeaderValue> {
        self.inner.remove(name)
    }
    pub fn merge(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), HeadParseError> {
        match self.inner.entry(name) {
            Entry::Occupied(mut entry) => {
                let mut joined = entry.get().as_bytes().to_vec();
                joined.extend_from_slice(b", ");
                joined.extend_from_slice(value.as_bytes());
                let joined = HeaderValue::from_bytes(&joined)
                    .map_err(HeadParseError::InvalidFieldValue)?;
                entry.insert(joined);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> Iter<'_, HeaderValue> {
        self.inner.iter()
    }
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn as_header_map(&self) -> &HeaderMap<HeaderValue> {
        &self.inner
    }
    pub fn into_header_map(self) -> HeaderMap<HeaderValue> {
        self.inner
    }

    //
    /// Parses one field line from the window. `Ok(None)` means the line is not
    /// complete yet and nothing counts as consumed; `Some((true, n))` is the
    /// section-terminating blank line.
    pub fn parse_line<R: BufRead>(
        take: &mut Take<R>,
        buf: &mut Vec<u8>,
        config: &HeadParseConfig,
        headers: &mut Headers,
    ) -> Result<Option<(IsAllCompleted, usize)>, HeadParseError> {
        let end_bytes_len = 2_usize;
        take.set_limit(config.get_field_line_max_len() as u64 + end_bytes_len as u64);
        let n = take.read_until(LF, buf).map_err(HeadParseError::ReadError)?;
        if n < end_bytes_len {
            return Ok(None);
        }
        if !buf[..n].ends_with(&[LF]) {
            if n >= config.get_field_line_max_len() + end_bytes_len {
                return Err(HeadParseError::TooLongFieldLine);
            } else {
                return Ok(None);
            }
        }
        if !buf[..n - 1].ends_with(&[CR]) {
            return Err(HeadParseError::InvalidCRLF);
        }

        if buf[..n - end_bytes_len].is_empty() {
            return Ok(Some((true, n)));
        }

        let line = &buf[..n - end_bytes_len];
        let colon_index = line
            .iter()
            .position(|x| x == &COLON)
            .ok_or(HeadParseError::FieldLineMissingColon)?;

        let name_bytes = &line[..colon_index];
        if name_bytes.last().is_some_and(|b| b.is_ascii_whitespace()) {
            return Err(HeadParseError::FieldNameTrailingWhitespace);
        }
        let header_name = HeaderName::from_bytes(name_bytes.trim_ascii())
            .map_err(HeadParseError::InvalidFieldName)?;

        let value_bytes = line[colon_index + 1..].trim_ascii();
        let header_value =
            HeaderValue::from_bytes(value_bytes).map_err(HeadParseError::InvalidFieldValue)?;

        headers.merge(header_name, header_value)?;
        Ok(Some((false, n)))
    }
}

impl From<HeaderMap<HeaderValue>> for Headers {
    fn from(inner: HeaderMap<HeaderValue>) -> Self {
        Self { inner }
    }
}
impl From<Headers> for HeaderMap<HeaderValue> {
    fn from(headers: Headers) -> Self {
        headers.inner
    }
}

use http::header::CONTENT_LENGTH;

use crate::body_parser::BodyParseError;
use crate::headers::Headers;

//
//
//
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    ContentLength(usize),
    Neither,
}

pub trait BodyFramingDetector {
    fn detect(self) -> Result<BodyFraming, BodyParseError>;
}

impl BodyFramingDetector for &Headers {
    fn detect(self) -> Result<BodyFraming, BodyParseError> {
        let header_value = match self.as_header_map().get(CONTENT_LENGTH) {
            Some(header_value) => header_value,
            None => return Ok(BodyFraming::Neither),
        };
        let length = header_value
            .to_str()
            .map_err(|_| BodyParseError::InvalidContentLength(None))?
            .parse::<usize>()
            .map_err(|err| BodyParseError::InvalidContentLength(Some(err)))?;
        Ok(BodyFraming::ContentLength(length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use http::header::{HeaderName, HeaderValue};

    #[test]
    fn detect() {
        let mut headers = Headers::new();
        assert_eq!((&headers).detect().unwrap(), BodyFraming::Neither);

        headers.set(CONTENT_LENGTH, HeaderValue::from_static("13"));
        assert_eq!(
            (&headers).detect().unwrap(),
            BodyFraming::ContentLength(13)
        );

        headers.set(CONTENT_LENGTH, HeaderValue::from_static("abc"));
        match (&headers).detect() {
            Err(BodyParseError::InvalidContentLength(Some(_))) => {}
            _ => panic!(),
        }

        headers.remove(CONTENT_LENGTH.as_str());
        headers.set(
            HeaderName::from_static("transfer-encoding"),
            HeaderValue::from_static("chunked"),
        );
        assert_eq!((&headers).detect().unwrap(), BodyFraming::Neither);
    }
}

use std::{
    error::Error,
    io::{BufReader, Cursor, Read},
};

use http::{Method, Version};
use http1_wire::{
    head_parser::{HeadParseConfig, HeadParseError},
    request_line::RequestLine,
};

fn parse_once(
    bytes: &[u8],
    config: &HeadParseConfig,
) -> Result<Option<(RequestLine, usize)>, HeadParseError> {
    let mut take = BufReader::new(Cursor::new(bytes)).take(0);
    let mut buf = Vec::new();
    RequestLine::parse(&mut take, &mut buf, config)
}

#[test]
fn simple() -> Result<(), Box<dyn Error>> {
    let o = parse_once(b"GET / HTTP/1.1\r\n", &Default::default())?;
    let (request_line, n) = o.unwrap();
    assert_eq!(n, 16);

    assert_eq!(request_line.method, Method::GET);
    assert_eq!(request_line.target, "/");
    assert_eq!(request_line.version, Version::HTTP_11);

    Ok(())
}

#[test]
fn with_path() -> Result<(), Box<dyn Error>> {
    let o = parse_once(b"GET /coffee HTTP/1.1\r\n", &Default::default())?;
    let (request_line, n) = o.unwrap();
    assert_eq!(n, 22);

    assert_eq!(request_line.method, Method::GET);
    assert_eq!(request_line.target, "/coffee");

    Ok(())
}

#[test]
fn with_post_method() -> Result<(), Box<dyn Error>> {
    let o = parse_once(b"POST /submit HTTP/1.1\r\n", &Default::default())?;
    let (request_line, n) = o.unwrap();
    assert_eq!(n, 23);

    assert_eq!(request_line.method, Method::POST);
    assert_eq!(request_line.target, "/submit");

    Ok(())
}

#[test]
fn need_more_data() -> Result<(), Box<dyn Error>> {
    let o = parse_once(b"GET / HTTP/1.1", &Default::default())?;
    assert!(o.is_none());

    let o = parse_once(b"", &Default::default())?;
    assert!(o.is_none());

    Ok(())
}

#[test]
fn with_extra_field() {
    let err = parse_once(b"GET / extra HTTP/1.1\r\n", &Default::default())
        .err()
        .unwrap();
    match err {
        HeadParseError::InvalidRequestLine => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_missing_field() {
    let err = parse_once(b"GET HTTP/1.1\r\n", &Default::default())
        .err()
        .unwrap();
    match err {
        HeadParseError::InvalidRequestLine => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_lowercase_method() {
    let err = parse_once(b"get / HTTP/1.1\r\n", &Default::default())
        .err()
        .unwrap();
    match err {
        HeadParseError::MethodNotUppercase => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_mixed_case_method() {
    let err = parse_once(b"GeT / HTTP/1.1\r\n", &Default::default())
        .err()
        .unwrap();
    match err {
        HeadParseError::MethodNotUppercase => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_unknown_protocol() {
    let err = parse_once(b"GET / HTTPS/1.1\r\n", &Default::default())
        .err()
        .unwrap();
    match err {
        HeadParseError::UnknownProtocol => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_unsupported_version() {
    let err = parse_once(b"GET / HTTP/1.0\r\n", &Default::default())
        .err()
        .unwrap();
    match err {
        HeadParseError::UnsupportedHttpVersion => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_bare_lf() {
    let err = parse_once(b"GET / HTTP/1.1\n", &Default::default())
        .err()
        .unwrap();
    match err {
        HeadParseError::InvalidCRLF => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn too_long() {
    let mut config = HeadParseConfig::default();
    config.set_request_line_max_len(16);

    let err = parse_once(b"GET /very-long-target HTTP/1.1\r\n", &config)
        .err()
        .unwrap();
    match err {
        HeadParseError::TooLongRequestLine => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn max_length_line_split_before_lf() -> Result<(), Box<dyn Error>> {
    let mut config = HeadParseConfig::default();
    config.set_request_line_max_len(16);

    // The line content fills the cap exactly, the LF still in flight.
    let o = parse_once(b"GET /ab HTTP/1.1\r", &config)?;
    assert!(o.is_none());

    let o = parse_once(b"GET /ab HTTP/1.1\r\n", &config)?;
    let (request_line, n) = o.unwrap();
    assert_eq!(n, 18);
    assert_eq!(request_line.target, "/ab");

    Ok(())
}

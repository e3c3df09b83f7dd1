use std::{
    error::Error,
    io::{BufReader, Cursor, Read},
};

use http1_wire::{
    head_parser::{HeadParseConfig, HeadParseError, IsAllCompleted},
    headers::Headers,
};

fn parse_line_once(
    bytes: &[u8],
    config: &HeadParseConfig,
    headers: &mut Headers,
) -> Result<Option<(IsAllCompleted, usize)>, HeadParseError> {
    let mut take = BufReader::new(Cursor::new(bytes)).take(0);
    let mut buf = Vec::new();
    Headers::parse_line(&mut take, &mut buf, config, headers)
}

#[test]
fn single_field() -> Result<(), Box<dyn Error>> {
    let mut headers = Headers::new();
    let o = parse_line_once(b"Host: localhost:42069\r\n", &Default::default(), &mut headers)?;
    assert_eq!(o, Some((false, 23)));

    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("host").unwrap(), "localhost:42069");

    Ok(())
}

#[test]
fn section_end() -> Result<(), Box<dyn Error>> {
    let mut headers = Headers::new();
    let o = parse_line_once(b"\r\n", &Default::default(), &mut headers)?;
    assert_eq!(o, Some((true, 2)));

    assert!(headers.is_empty());

    Ok(())
}

#[test]
fn need_more_data() -> Result<(), Box<dyn Error>> {
    let mut headers = Headers::new();

    let o = parse_line_once(b"Host", &Default::default(), &mut headers)?;
    assert!(o.is_none());

    let o = parse_line_once(b"Host: localhost:42069\r", &Default::default(), &mut headers)?;
    assert!(o.is_none());

    assert!(headers.is_empty());

    Ok(())
}

#[test]
fn merge_duplicates() -> Result<(), Box<dyn Error>> {
    let bytes = b"Set-Person: lane-loves-go\r\nSet-Person: prime-loves-zig\r\nSet-Person: tj-loves-ocaml\r\n\r\n";

    let mut headers = Headers::new();
    let mut take = BufReader::new(Cursor::new(&bytes[..])).take(0);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match Headers::parse_line(&mut take, &mut buf, &Default::default(), &mut headers)? {
            Some((true, _)) => break,
            Some((false, _)) => continue,
            None => assert!(false, "o not match"),
        }
    }

    assert_eq!(headers.len(), 1);
    assert_eq!(
        headers.get("set-person").unwrap(),
        "lane-loves-go, prime-loves-zig, tj-loves-ocaml"
    );

    Ok(())
}

#[test]
fn name_stored_lowercase() -> Result<(), Box<dyn Error>> {
    let mut headers = Headers::new();
    parse_line_once(b"HOST: localhost:42069\r\n", &Default::default(), &mut headers)?;

    let names: Vec<&str> = headers.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["host"]);

    assert!(headers.get("host").is_some());
    assert!(headers.get("HoSt").is_some());

    Ok(())
}

#[test]
fn value_surrounding_whitespace_trimmed() -> Result<(), Box<dyn Error>> {
    let mut headers = Headers::new();
    parse_line_once(
        b"Host:      localhost:42069       \r\n",
        &Default::default(),
        &mut headers,
    )?;

    assert_eq!(headers.get("host").unwrap(), "localhost:42069");

    Ok(())
}

#[test]
fn with_space_before_colon() {
    let mut headers = Headers::new();
    let err = parse_line_once(b"Host : localhost:42069\r\n", &Default::default(), &mut headers)
        .err()
        .unwrap();
    match err {
        HeadParseError::FieldNameTrailingWhitespace => {}
        _ => assert!(false, "err not match"),
    }

    assert!(headers.is_empty());
}

#[test]
fn with_invalid_name_char() {
    let mut headers = Headers::new();
    let err = parse_line_once(b"H@st: localhost:42069\r\n", &Default::default(), &mut headers)
        .err()
        .unwrap();
    match err {
        HeadParseError::InvalidFieldName(_) => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_missing_colon() {
    let mut headers = Headers::new();
    let err = parse_line_once(b"Host localhost\r\n", &Default::default(), &mut headers)
        .err()
        .unwrap();
    match err {
        HeadParseError::FieldLineMissingColon => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_whitespace_inside_name() {
    // The first colon sits in the value, leaving a space inside the name.
    let mut headers = Headers::new();
    let err = parse_line_once(b"Host localhost:42069\r\n", &Default::default(), &mut headers)
        .err()
        .unwrap();
    match err {
        HeadParseError::InvalidFieldName(_) => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn with_bare_lf() {
    let mut headers = Headers::new();
    let err = parse_line_once(b"Host: localhost:42069\n", &Default::default(), &mut headers)
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
    config.set_field_line_max_len(16);

    let mut headers = Headers::new();
    let err = parse_line_once(b"This-Header-Name-Is-Long: value\r\n", &config, &mut headers)
        .err()
        .unwrap();
    match err {
        HeadParseError::TooLongFieldLine => {}
        _ => assert!(false, "err not match"),
    }
}

#[test]
fn max_length_line_split_before_lf() -> Result<(), Box<dyn Error>> {
    let mut config = HeadParseConfig::default();
    config.set_field_line_max_len(16);

    // The line content fills the cap exactly, the LF still in flight.
    let mut headers = Headers::new();
    let o = parse_line_once(b"Host: bbbbbbbbbb\r", &config, &mut headers)?;
    assert!(o.is_none());

    let o = parse_line_once(b"Host: bbbbbbbbbb\r\n", &config, &mut headers)?;
    assert_eq!(o, Some((false, 18)));
    assert_eq!(headers.get("host").unwrap(), "bbbbbbbbbb");

    Ok(())
}

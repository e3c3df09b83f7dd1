use std::io::{self, BufReader, Cursor};

use http1_wire::{
    body_parser::{BodyParseError, BodyParseOutput, BodyParser},
    content_length_body_parser::ContentLengthBodyParser,
};

#[test]
fn all_at_once() -> io::Result<()> {
    let mut p = ContentLengthBodyParser::new();
    p.set_length(13);

    let mut body_buf = vec![];
    let o = p.parse(
        &mut BufReader::new(Cursor::new(b"hello world!\n".to_vec())),
        &mut body_buf,
    )?;
    assert_eq!(o, BodyParseOutput::Completed(13));
    assert_eq!(body_buf, b"hello world!\n".to_vec());

    assert_eq!(p.get_declared(), 13);
    assert_eq!(p.get_consumed(), 13);

    Ok(())
}

#[test]
fn zero_length() -> io::Result<()> {
    let mut p = ContentLengthBodyParser::new();
    p.set_length(0);

    let mut body_buf = vec![];
    let o = p.parse(&mut BufReader::new(Cursor::new(b"".to_vec())), &mut body_buf)?;
    assert_eq!(o, BodyParseOutput::Completed(0));
    assert!(body_buf.is_empty());

    Ok(())
}

#[test]
fn reuse_after_completed() -> io::Result<()> {
    let mut p = ContentLengthBodyParser::new();

    p.set_length(3);
    let mut body_buf = vec![];
    let o = p.parse(
        &mut BufReader::new(Cursor::new(b"abc".to_vec())),
        &mut body_buf,
    )?;
    assert_eq!(o, BodyParseOutput::Completed(3));

    p.set_length(5);
    assert_eq!(p.get_consumed(), 0);

    let mut body_buf = vec![];
    let o = p.parse(
        &mut BufReader::new(Cursor::new(b"de".to_vec())),
        &mut body_buf,
    )?;
    assert_eq!(o, BodyParseOutput::Partial(2));
    assert_eq!(p.get_consumed(), 2);

    let o = p.parse(
        &mut BufReader::new(Cursor::new(b"fgh".to_vec())),
        &mut body_buf,
    )?;
    assert_eq!(o, BodyParseOutput::Completed(3));
    assert_eq!(body_buf, b"defgh".to_vec());

    Ok(())
}

#[test]
fn excess_is_fatal() {
    let mut p = ContentLengthBodyParser::new();
    p.set_length(5);

    let mut body_buf = vec![];
    let err = p
        .parse(
            &mut BufReader::new(Cursor::new(b"hello world!\n".to_vec())),
            &mut body_buf,
        )
        .err()
        .unwrap();
    match err {
        BodyParseError::BodyLengthMismatch { declared, actual } => {
            assert_eq!(declared, 5);
            assert_eq!(actual, 13);
        }
        _ => assert!(false, "err not match"),
    }
}

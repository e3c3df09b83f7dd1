use http::StatusCode;

use crate::headers::Headers;
use crate::{CRLF, HTTP_VERSION_11, SP};

//
//
//
/// The reason phrase is taken from the status code registry; unregistered
/// codes render without one, and without the separating space.
pub fn render_status_line(status: StatusCode, buf: &mut Vec<u8>) {
    buf.extend_from_slice(HTTP_VERSION_11);
    buf.extend_from_slice(&[SP]);
    buf.extend_from_slice(status.as_str().as_bytes());
    if let Some(reason) = status.canonical_reason() {
        buf.extend_from_slice(&[SP]);
        buf.extend_from_slice(reason.as_bytes());
    }
    buf.extend_from_slice(CRLF);
}

/// Renders `name: value` lines in store order. The section-terminating blank
/// line is the caller's concern.
pub fn render_field_section(headers: &Headers, buf: &mut Vec<u8>) {
    for (name, value) in headers.iter() {
        buf.extend_from_slice(name.as_str().as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(CRLF);
    }
}

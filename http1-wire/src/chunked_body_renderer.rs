use crate::headers::Headers;
use crate::response_head_renderer::render_field_section;
use crate::CRLF;

//
//
//
/// Renders one chunk: lowercase hex size line, payload, CRLF.
pub fn render_chunk(payload: &[u8], buf: &mut Vec<u8>) {
    buf.extend_from_slice(format!("{:x}", payload.len()).as_bytes());
    buf.extend_from_slice(CRLF);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(CRLF);
}

/// Renders the zero-size chunk line. The trailer section (or the bare blank
/// line) follows separately.
pub fn render_chunk_terminator(buf: &mut Vec<u8>) {
    buf.extend_from_slice(b"0");
    buf.extend_from_slice(CRLF);
}

pub fn render_trailer_section(trailers: &Headers, buf: &mut Vec<u8>) {
    render_field_section(trailers, buf);
    buf.extend_from_slice(CRLF);
}

pub mod body_framing;
pub mod body_parser;
pub mod chunked_body_parser;
pub mod chunked_body_renderer;
pub mod content_length_body_parser;
pub mod head_parser;
pub mod headers;
pub mod request_line;
pub mod response_head_renderer;

pub use http;

//
//
//
pub const SP: u8 = b' ';
pub const COLON: u8 = b':';
pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const CRLF: &[u8] = b"\r\n";

pub const HTTP_VERSION_11: &[u8] = b"HTTP/1.1";

pub const CHUNKED: &str = "chunked";

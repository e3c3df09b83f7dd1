pub mod decoder;
pub mod encoder;
pub mod server;

pub use self::decoder::{request_from_reader, DecodeError, Http1RequestDecoder};
pub use self::encoder::{default_headers, EncodeError, ResponseWriter, WriterState};
pub use self::server::{Handler, Server};

pub use http::{Method, Request, Response, StatusCode, Version};
pub use http1_wire;

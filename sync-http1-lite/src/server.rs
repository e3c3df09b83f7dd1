use std::{
    io::{self, Write},
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use http::{Request, StatusCode};

use crate::decoder::{request_from_reader, DecodeError};
use crate::encoder::{default_headers, EncodeError, ResponseWriter};

//
//
//
pub type Handler = Arc<dyn Fn(&mut ResponseWriter<Vec<u8>>, &Request<Vec<u8>>) + Send + Sync>;

//
//
//
/// Accepts connections on its own thread and hands each one to a worker
/// thread: read one request, run the handler, write the buffered response,
/// close. A request that fails to parse gets a synthesized 400 carrying the
/// parse error text.
pub struct Server {
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    accept_handle: Option<JoinHandle<()>>,
}

impl Server {
    pub fn serve<A: ToSocketAddrs>(addr: A, handler: Handler) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;
        let closed = Arc::new(AtomicBool::new(false));

        let accept_handle = thread::Builder::new().name("http1-accept".into()).spawn({
            let closed = closed.clone();
            move || listen(listener, closed, handler)
        })?;

        Ok(Self {
            local_addr,
            closed,
            accept_handle: Some(accept_handle),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting. Idempotent; connections already handed to workers run
    /// to completion.
    pub fn close(&mut self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        // The accept loop only observes the flag after accept returns.
        let mut wake_addr = self.local_addr;
        if wake_addr.ip().is_unspecified() {
            match &mut wake_addr {
                SocketAddr::V4(v4) => v4.set_ip(Ipv4Addr::LOCALHOST),
                SocketAddr::V6(v6) => v6.set_ip(Ipv6Addr::LOCALHOST),
            }
        }
        let _ = TcpStream::connect(wake_addr);

        if let Some(accept_handle) = self.accept_handle.take() {
            let _ = accept_handle.join();
        }
    }
}

fn listen(listener: TcpListener, closed: Arc<AtomicBool>, handler: Handler) {
    for incoming in listener.incoming() {
        if closed.load(Ordering::SeqCst) {
            break;
        }

        match incoming {
            Ok(stream) => {
                let handler = handler.clone();
                let r = thread::Builder::new()
                    .name("http1-conn".into())
                    .spawn(move || handle_connection(stream, handler));
                if let Err(err) = r {
                    tracing::error!("spawn connection thread failed: {err}");
                }
            }
            Err(err) => {
                tracing::error!("accept failed: {err}");
            }
        }
    }
}

fn handle_connection(mut stream: TcpStream, handler: Handler) {
    let mut w = ResponseWriter::new(Vec::new());

    match request_from_reader(&mut stream) {
        Ok(request) => {
            tracing::debug!(method = %request.method(), uri = %request.uri(), "request received");
            handler(&mut w, &request);
        }
        Err(err) => {
            tracing::warn!("request parse failed: {err}");
            write_bad_request(&mut w, &err);
        }
    }

    let buf = w.into_inner();
    if let Err(err) = stream.write_all(&buf) {
        tracing::error!("response write failed: {err}");
    }
}

fn write_bad_request(w: &mut ResponseWriter<Vec<u8>>, err: &DecodeError) {
    let body = err.to_string();
    if let Err(err) = try_write_bad_request(w, &body) {
        tracing::error!("bad request response write failed: {err}");
    }
}

fn try_write_bad_request(w: &mut ResponseWriter<Vec<u8>>, body: &str) -> Result<(), EncodeError> {
    w.write_status_line(StatusCode::BAD_REQUEST)?;
    w.write_headers(&default_headers(body.len()))?;
    w.write_body(body.as_bytes())?;
    Ok(())
}

/*
cargo run -p sync-http1-lite-demo-httpserver

RUST_LOG=debug cargo run -p sync-http1-lite-demo-httpserver -- --addr 127.0.0.1:42069 --assets assets
*/

mod digest;

use std::{
    error::Error,
    fs,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

use clap::Parser;
use http1_wire::{
    headers::Headers,
    http::header::{HeaderName, HeaderValue, CONNECTION, CONTENT_TYPE, TRAILER, TRANSFER_ENCODING},
    CHUNKED,
};
use sync_http1_lite::{default_headers, Handler, Request, ResponseWriter, Server, StatusCode};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:42069")]
    addr: String,
    /// Directory holding static assets.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let assets = cli.assets.clone();
    let handler: Handler = Arc::new(move |w, req| route(w, req, &assets));

    let server = Server::serve(cli.addr.as_str(), handler)?;
    tracing::info!("listening on {}", server.local_addr());

    loop {
        thread::park();
    }
}

//
//
//
fn route(w: &mut ResponseWriter<Vec<u8>>, req: &Request<Vec<u8>>, assets: &Path) {
    let path = req.uri().path();

    let r = match path {
        "/yourproblem" => respond_html(w, StatusCode::BAD_REQUEST, HTML_BAD_REQUEST),
        "/myproblem" => respond_html(w, StatusCode::INTERNAL_SERVER_ERROR, HTML_INTERNAL_ERROR),
        "/video" => respond_video(w, assets),
        _ if path.starts_with("/stream") => respond_stream(w, assets),
        _ => respond_html(w, StatusCode::OK, HTML_OK),
    };

    if let Err(err) = r {
        tracing::error!(path, "handler failed: {err}");
    }
}

fn respond_html(
    w: &mut ResponseWriter<Vec<u8>>,
    status: StatusCode,
    body: &str,
) -> Result<(), Box<dyn Error>> {
    w.write_status_line(status)?;

    let mut headers = default_headers(body.len());
    headers.set(CONTENT_TYPE, HeaderValue::from_static("text/html"));
    w.write_headers(&headers)?;

    w.write_body(body.as_bytes())?;
    Ok(())
}

fn respond_video(w: &mut ResponseWriter<Vec<u8>>, assets: &Path) -> Result<(), Box<dyn Error>> {
    let video_path = assets.join("sample.mp4");
    let body = match fs::read(&video_path) {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!("read {} failed: {err}", video_path.display());
            return respond_html(w, StatusCode::NOT_FOUND, HTML_NOT_FOUND);
        }
    };

    w.write_status_line(StatusCode::OK)?;

    let mut headers = default_headers(body.len());
    headers.set(CONTENT_TYPE, HeaderValue::from_static("video/mp4"));
    w.write_headers(&headers)?;

    w.write_body(&body)?;
    Ok(())
}

/// Streams the asset chunked and reports a digest and the total byte count in
/// trailers.
fn respond_stream(w: &mut ResponseWriter<Vec<u8>>, assets: &Path) -> Result<(), Box<dyn Error>> {
    let data_path = assets.join("sample.mp4");
    let mut file = match File::open(&data_path) {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!("open {} failed: {err}", data_path.display());
            return respond_html(w, StatusCode::NOT_FOUND, HTML_NOT_FOUND);
        }
    };

    w.write_status_line(StatusCode::OK)?;

    let mut headers = Headers::new();
    headers.set(CONNECTION, HeaderValue::from_static("close"));
    headers.set(TRANSFER_ENCODING, HeaderValue::from_static(CHUNKED));
    headers.set(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
    headers.set(
        TRAILER,
        HeaderValue::from_static("X-Content-SHA256, X-Content-Length"),
    );
    w.write_headers(&headers)?;

    let mut full_body = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = file.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        full_body.extend_from_slice(&chunk[..n]);
        w.write_chunk(&chunk[..n])?;
    }
    w.write_chunk_terminator()?;

    let mut trailers = Headers::new();
    trailers.set(
        HeaderName::from_static("x-content-sha256"),
        HeaderValue::from_str(&digest::to_hex(&digest::sha256(&full_body)))?,
    );
    trailers.set(
        HeaderName::from_static("x-content-length"),
        HeaderValue::from(full_body.len() as u64),
    );
    w.write_trailers(&trailers)?;

    Ok(())
}

//
//
//
const HTML_OK: &str = "<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>
";

const HTML_BAD_REQUEST: &str = "<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>
";

const HTML_INTERNAL_ERROR: &str = "<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>
";

const HTML_NOT_FOUND: &str = "<html>
  <head>
    <title>404 Not Found</title>
  </head>
  <body>
    <h1>Not Found</h1>
    <p>That file seems to be missing.</p>
  </body>
</html>
";

//! Live-reload server
//!
//! Serves the compiled page and answers the page's reload polls. Routes:
//!
//! - `/is_changed/`: `{"is_changed": bool}`, then the change flag is cleared
//! - `/`: the compiled output file
//! - `/<path>`: a file next to the output (stylesheets, images)
//!
//! Everything else, including any path with a `..` segment, is a 404.

use crate::error::{Error, Result};
use crate::watch::ChangeFlag;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tiny_http::{Header, Request, Response, Server, StatusCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    IsChanged,
    Index,
    File(String),
    NotFound,
}

/// Map a request URL to a route. The query string is ignored.
pub fn route(url: &str) -> Route {
    let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    match path.trim_start_matches('/') {
        "" | "index.html" => Route::Index,
        "is_changed" | "is_changed/" => Route::IsChanged,
        rest if rest.split('/').any(|segment| segment == ".." || segment.contains('\\')) => {
            Route::NotFound
        }
        rest => Route::File(rest.to_string()),
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn header(value: &str) -> Option<Header> {
    Header::from_bytes(&b"Content-Type"[..], value.as_bytes()).ok()
}

fn with_content_type<R: std::io::Read>(response: Response<R>, value: &str) -> Response<R> {
    match header(value) {
        Some(header) => response.with_header(header),
        None => response,
    }
}

pub struct LiveServer {
    server: Arc<Server>,
    address: String,
    output: PathBuf,
    flag: ChangeFlag,
}

impl LiveServer {
    /// Bind to `host:port`, moving on to the next port while the current one
    /// is taken, for at most `max_attempts` ports.
    pub fn bind(
        host: &str,
        port: u16,
        max_attempts: u16,
        output: impl Into<PathBuf>,
        flag: ChangeFlag,
    ) -> Result<Self> {
        let mut last_error = String::from("no port tried");
        for offset in 0..max_attempts.max(1) {
            let Some(candidate) = port.checked_add(offset) else {
                break;
            };
            match Server::http((host, candidate)) {
                Ok(server) => {
                    let bound_port = server
                        .server_addr()
                        .to_ip()
                        .map(|addr| addr.port())
                        .unwrap_or(candidate);
                    let address = format!("http://{host}:{bound_port}");
                    info!("serving on {address}");
                    return Ok(Self {
                        server: Arc::new(server),
                        address,
                        output: output.into(),
                        flag,
                    });
                }
                Err(err) => {
                    debug!("port {candidate} unavailable: {err}");
                    last_error = err.to_string();
                }
            }
        }
        Err(Error::Server(format!(
            "could not bind {host} from port {port} ({last_error})"
        )))
    }

    /// Base URL the page should poll, e.g. `http://localhost:8000`
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Serve requests on a background thread until the handle is stopped
    pub fn spawn(self) -> ServerHandle {
        let server = self.server.clone();
        let thread = thread::spawn(move || {
            for request in self.server.incoming_requests() {
                self.handle(request);
            }
        });
        ServerHandle {
            server,
            thread: Some(thread),
        }
    }

    fn handle(&self, request: Request) {
        let url = request.url().to_string();
        debug!("{} {}", request.method(), url);

        let result = match route(&url) {
            Route::IsChanged => {
                let body = serde_json::json!({ "is_changed": self.flag.take() }).to_string();
                request.respond(with_content_type(
                    Response::from_string(body),
                    "application/json",
                ))
            }
            Route::Index => self.respond_file(request, &self.output),
            Route::File(relative) => {
                let path = self.root().join(relative);
                self.respond_file(request, &path)
            }
            Route::NotFound => request.respond(not_found()),
        };

        if let Err(err) = result {
            warn!("failed to answer {url}: {err}");
        }
    }

    fn root(&self) -> &Path {
        match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn respond_file(&self, request: Request, path: &Path) -> std::io::Result<()> {
        match fs::read(path) {
            Ok(data) => request.respond(with_content_type(
                Response::from_data(data),
                content_type(path),
            )),
            Err(_) => request.respond(not_found()),
        }
    }
}

fn not_found() -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string("Not Found").with_status_code(StatusCode(404))
}

/// Handle returned by [`LiveServer::spawn`]
pub struct ServerHandle {
    server: Arc<Server>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ServerHandle {
    /// Stop accepting requests and wait for the server thread to finish.
    pub fn stop(mut self) {
        self.server.unblock();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use tempfile::tempdir;

    #[rstest]
    #[case("/", Route::Index)]
    #[case("/index.html", Route::Index)]
    #[case("/?t=1", Route::Index)]
    #[case("/is_changed/", Route::IsChanged)]
    #[case("/is_changed", Route::IsChanged)]
    #[case("/style.css", Route::File("style.css".to_string()))]
    #[case("/img/logo.png?v=2", Route::File("img/logo.png".to_string()))]
    #[case("/../secret", Route::NotFound)]
    #[case("/a/../../b", Route::NotFound)]
    fn test_route(#[case] url: &str, #[case] expected: Route) {
        assert_eq!(route(url), expected);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Path::new("a.css")), "text/css; charset=utf-8");
        assert_eq!(content_type(Path::new("a")), "application/octet-stream");
    }

    fn get(address: &str, path: &str) -> String {
        let host = address.trim_start_matches("http://");
        let mut stream = TcpStream::connect(host).expect("connect");
        write!(
            stream,
            "GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n"
        )
        .expect("send request");
        let mut response = String::new();
        stream.read_to_string(&mut response).expect("read response");
        response
    }

    #[test]
    fn test_server_routes() {
        let dir = tempdir().expect("temp dir");
        let output = dir.path().join("index.html");
        fs::write(&output, "<p>page</p>").expect("write page");
        fs::write(dir.path().join("extra.css"), "p {}").expect("write css");

        let flag = ChangeFlag::new();
        let server =
            LiveServer::bind("127.0.0.1", 0, 1, &output, flag.clone()).expect("bind");
        let address = server.address().to_string();
        let handle = server.spawn();

        flag.mark();
        let changed = get(&address, "/is_changed/");
        assert!(changed.contains("{\"is_changed\":true}"));
        assert!(!flag.is_set());

        let unchanged = get(&address, "/is_changed/");
        assert!(unchanged.contains("{\"is_changed\":false}"));

        let page = get(&address, "/");
        assert!(page.starts_with("HTTP/1.1 200"));
        assert!(page.contains("<p>page</p>"));

        assert!(get(&address, "/extra.css").contains("p {}"));
        assert!(get(&address, "/missing.css").starts_with("HTTP/1.1 404"));
        assert!(get(&address, "/../etc/passwd").starts_with("HTTP/1.1 404"));

        handle.stop();
    }

    #[test]
    fn test_bind_moves_to_next_port_when_taken() {
        let dir = tempdir().expect("temp dir");
        let output = dir.path().join("index.html");

        let first = LiveServer::bind("127.0.0.1", 0, 1, &output, ChangeFlag::new())
            .expect("first bind");
        let taken: u16 = first
            .address()
            .rsplit(':')
            .next()
            .and_then(|port| port.parse().ok())
            .expect("port in address");

        let second = LiveServer::bind("127.0.0.1", taken, 3, &output, ChangeFlag::new())
            .expect("second bind");
        assert_ne!(second.address(), first.address());
    }
}

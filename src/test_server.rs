//! Minimal HTTP/1.1 server for exercising the fetch path without the network.
//!
//! Serves canned responses by request path and records every request it sees.
//! Each connection is answered once and closed.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: Vec<u8>,
    /// Pause before each body byte; headers go out immediately.
    byte_delay: Option<Duration>,
}

type Routes = Arc<Mutex<HashMap<String, Route>>>;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub struct TestServer {
    base_url: String,
    routes: Routes,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
        let routes: Routes = Arc::default();
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();

        let thread_routes = Arc::clone(&routes);
        let thread_requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().map_while(Result::ok) {
                let _ = handle(stream, &thread_routes, &thread_requests);
            }
        });

        Self {
            base_url,
            routes,
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Serve `body` with `status` for GETs of `path`, replacing any earlier route.
    pub fn route(&self, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.insert(path, Route {
            status,
            body: body.into(),
            byte_delay: None,
        });
    }

    /// Serve a 200 whose body trickles out one byte per `byte_delay`.
    pub fn route_slow(&self, path: &str, body: impl Into<Vec<u8>>, byte_delay: Duration) {
        self.insert(path, Route {
            status: 200,
            body: body.into(),
            byte_delay: Some(byte_delay),
        });
    }

    fn insert(&self, path: &str, route: Route) {
        self.routes.lock().insert(path.to_string(), route);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

fn handle(
    stream: TcpStream,
    routes: &Routes,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    requests.lock().push(RecordedRequest {
        path: path.clone(),
        headers,
    });

    let route = routes.lock().get(&path).cloned().unwrap_or_else(|| Route {
        status: 404,
        body: b"not found".to_vec(),
        byte_delay: None,
    });

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    )?;

    match route.byte_delay {
        Some(delay) => {
            stream.flush()?;
            for byte in &route.body {
                thread::sleep(delay);
                stream.write_all(std::slice::from_ref(byte))?;
                stream.flush()?;
            }
        }
        None => stream.write_all(&route.body)?,
    }
    stream.flush()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        202 => "Accepted",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

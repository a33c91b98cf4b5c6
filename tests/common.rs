#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use indico_harvest::HarvestConfig;

/// Canned response for one path
#[derive(Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Route {
    pub fn json(body: &serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: serde_json::to_vec(body).unwrap(),
        }
    }

    pub fn bytes(body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: "application/octet-stream",
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: b"error".to_vec(),
        }
    }
}

/// One request as seen by [`TestServer`]; header names are lowercased
#[derive(Clone, Debug)]
pub struct Request {
    pub path: String,
    pub headers: HashMap<String, String>,
}

/// Minimal HTTP/1.1 server on a random local port, answering from a fixed
/// route table. Unknown paths get 404. Runs until the test process exits.
pub struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl TestServer {
    pub fn start<P, I>(routes: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = (P, Route)>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes: HashMap<String, Route> = routes
            .into_iter()
            .map(|(path, route)| (path.into(), route))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                let mut headers = HashMap::new();
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if line == "\r\n" || line == "\n" => break,
                        Ok(_) => {
                            if let Some((name, value)) = line.split_once(':') {
                                headers.insert(name.trim().to_lowercase(), value.trim().to_string());
                            }
                        }
                    }
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
                seen.lock().unwrap().push(Request {
                    path: path.clone(),
                    headers,
                });
                let route = routes.get(&path).cloned().unwrap_or_else(|| Route::status(404));

                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    route.status,
                    reason(route.status),
                    route.content_type,
                    route.body.len()
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(&route.body);
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Paths requested so far, in arrival order
    pub fn hits(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Export API path for `event_id`, as requested by the harvester
pub fn api_path(event_id: &str) -> String {
    format!("/export/event/{}.json?detail=contributions", event_id)
}

/// Config pointing at `server`, writing into `output_dir`, without delays
pub fn test_config(server: &TestServer, output_dir: &std::path::Path) -> HarvestConfig {
    HarvestConfig {
        base_url: server.base_url().to_string(),
        output_dir: output_dir.to_path_buf(),
        log_file: output_dir.join("harvest.log"),
        download_delay: Duration::ZERO,
        api_timeout: Duration::from_secs(5),
        download_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

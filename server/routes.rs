use std::io::Cursor;
use std::io::Read;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::{debug, warn};

use rnn_graph::TrainConfig;

use crate::handlers;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// A response before it is handed to tiny_http.
#[derive(Debug, PartialEq)]
pub struct Routed {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Vec<u8>,
}

impl Routed {
    fn new(status: u16, content_type: Option<&'static str>, body: Vec<u8>) -> Routed {
        let mut headers = CORS_HEADERS.to_vec();
        if let Some(content_type) = content_type {
            headers.push(("Content-Type", content_type));
        }
        Routed { status, headers, body }
    }

    pub fn json(status: u16, body: String) -> Routed {
        Routed::new(status, Some("application/json"), body.into_bytes())
    }

    pub fn preflight() -> Routed {
        Routed::new(204, None, Vec::new())
    }

    pub fn not_found() -> Routed {
        Routed::new(404, Some("text/plain"), b"404 Not Found".to_vec())
    }

    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|&(_, value)| value)
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let headers = self.headers.iter()
            .filter_map(|(name, value)| Header::from_bytes(name.as_bytes(), value.as_bytes()).ok())
            .collect();
        let len = self.body.len();
        Response::new(StatusCode(self.status), headers, Cursor::new(self.body), Some(len), None)
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Picks the response for one request. `path` excludes the query string.
pub fn route(method: &Method, path: &str, body: &str, config: &TrainConfig) -> Routed {
    match (method, path) {
        (Method::Options, _)     => Routed::preflight(),
        (Method::Post, "/graph") => {
            let reply = handlers::graph::handle(body, config);
            Routed::json(reply.status, reply.body)
        }
        _ => Routed::not_found(),
    }
}

/// Reads one request, routes it and sends its response.
pub fn dispatch(mut request: Request, config: &TrainConfig) {
    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or("").to_owned();
    debug!(%method, %path, "request");

    let mut body = String::new();
    let routed = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => route(&method, &path, &body, config),
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            Routed::json(400, handlers::graph::error_body("Invalid input data", &e.to_string()))
        }
    };

    if let Err(e) = request.respond(routed.into_response()) {
        warn!(error = %e, "failed to send response");
    }
}

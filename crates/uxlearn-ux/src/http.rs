use crate::dashboard::parse_completed;
use crate::{CatalogBackend, CheckRequest, UxQuery, UxQueryError, UxService};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub bind: SocketAddr,
}

#[derive(Debug, Error)]
pub enum HttpServeError {
    #[error("bind failed: {0}")]
    Bind(std::io::Error),
    #[error("accept failed: {0}")]
    Accept(std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HttpResponse {
    status: u16,
    body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Healthz,
    Index,
    Modules(String),
    Lesson(String),
    Check(CheckRequest),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
enum RouteError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
}

type QueryParams = BTreeMap<String, Vec<String>>;

pub fn serve_lesson_api<B: CatalogBackend>(
    config: HttpServerConfig,
    service: &UxService<B>,
) -> Result<(), HttpServeError> {
    let listener = TcpListener::bind(config.bind).map_err(HttpServeError::Bind)?;
    tracing::info!(bind = %config.bind, "lesson API listening");
    serve_with_limit(&listener, service, None)
}

fn serve_with_limit<B: CatalogBackend>(
    listener: &TcpListener,
    service: &UxService<B>,
    max_requests: Option<usize>,
) -> Result<(), HttpServeError> {
    let mut served = 0usize;

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, service) {
                    tracing::warn!("request failed: {err}");
                    let _ = write_json_response(
                        &mut stream,
                        HttpResponse {
                            status: 500,
                            body: json!({ "error": format!("internal server error: {err}") }),
                        },
                    );
                }
                served += 1;
            }
            Err(err) => return Err(HttpServeError::Accept(err)),
        }

        if let Some(limit) = max_requests
            && served >= limit
        {
            break;
        }
    }

    Ok(())
}

fn handle_connection<B: CatalogBackend>(
    stream: &mut TcpStream,
    service: &UxService<B>,
) -> Result<(), String> {
    let (method, target) = match read_request_line(stream) {
        Ok(line) => line,
        Err(err) => {
            return write_json_response(stream, route_error_response(err))
                .map_err(|e| e.to_string());
        }
    };
    tracing::debug!(%method, %target, "request");

    let response = dispatch(service, &method, &target);
    write_json_response(stream, response).map_err(|e| e.to_string())
}

fn dispatch<B: CatalogBackend>(service: &UxService<B>, method: &str, target: &str) -> HttpResponse {
    if method != "GET" {
        return HttpResponse {
            status: 405,
            body: json!({ "error": "method not allowed; use GET" }),
        };
    }
    match parse_route_target(target) {
        Ok(route) => execute_route(service, route),
        Err(err) => route_error_response(err),
    }
}

fn read_request_line(stream: &mut TcpStream) -> Result<(String, String), RouteError> {
    let mut buf = [0u8; 8192];
    let n = stream
        .read(&mut buf)
        .map_err(|e| RouteError::BadRequest(format!("failed to read request: {e}")))?;
    if n == 0 {
        return Err(RouteError::BadRequest("empty request".to_string()));
    }
    let req = String::from_utf8_lossy(&buf[..n]);
    let line = req
        .lines()
        .next()
        .ok_or_else(|| RouteError::BadRequest("missing request line".to_string()))?;
    parse_request_line(line)
}

fn parse_request_line(line: &str) -> Result<(String, String), RouteError> {
    let mut parts = line.split_whitespace();
    let method = parts
        .next()
        .ok_or_else(|| RouteError::BadRequest("missing method".to_string()))?;
    let target = parts
        .next()
        .ok_or_else(|| RouteError::BadRequest("missing target".to_string()))?;
    Ok((method.to_string(), target.to_string()))
}

fn parse_route_target(target: &str) -> Result<Route, RouteError> {
    let (path, query) = split_target(target);
    let params = parse_query_params(query);

    match path {
        "/" => Ok(Route::Index),
        "/healthz" => Ok(Route::Healthz),
        "/modules" => Ok(Route::Modules(
            first_param(&params, "completed").unwrap_or_default(),
        )),
        "/lesson" => {
            let id = first_param(&params, "id").ok_or_else(|| {
                RouteError::BadRequest("missing lesson id (use /lesson?id=<lesson_id>)".to_string())
            })?;
            Ok(Route::Lesson(id))
        }
        "/check" => parse_check(&params).map(Route::Check),
        _ => Err(RouteError::NotFound(format!("unknown route: {path}"))),
    }
}

fn parse_check(params: &QueryParams) -> Result<CheckRequest, RouteError> {
    let lesson_id = first_param(params, "lesson").ok_or_else(|| {
        RouteError::BadRequest(
            "missing lesson (use /check?lesson=<id>&step=<n>&place=<item>:<category>)".to_string(),
        )
    })?;
    let step = first_param(params, "step")
        .ok_or_else(|| RouteError::BadRequest("missing step".to_string()))?;
    let step = step
        .parse::<usize>()
        .map_err(|_| RouteError::BadRequest(format!("step must be a number, got `{step}`")))?;

    let placements = params
        .get("place")
        .into_iter()
        .flatten()
        .map(|pair| {
            // Categories never contain ':'; item labels might.
            pair.rsplit_once(':')
                .map(|(item, category)| (item.to_string(), category.to_string()))
                .ok_or_else(|| {
                    RouteError::BadRequest(format!("place `{pair}` is not <item>:<category>"))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CheckRequest {
        lesson_id,
        step,
        placements,
    })
}

fn first_param(params: &QueryParams, key: &str) -> Option<String> {
    params.get(key).and_then(|values| values.first()).cloned()
}

fn split_target(target: &str) -> (&str, &str) {
    match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    }
}

fn parse_query_params(query: &str) -> QueryParams {
    let mut out = QueryParams::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (k, v) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        let key = percent_decode(k);
        if key.is_empty() {
            continue;
        }
        out.entry(key).or_default().push(percent_decode(v));
    }
    out
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                match (
                    bytes.get(i + 1).copied().and_then(hex_val),
                    bytes.get(i + 2).copied().and_then(hex_val),
                ) {
                    (Some(h), Some(l)) => {
                        out.push(h * 16 + l);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn execute_route<B: CatalogBackend>(service: &UxService<B>, route: Route) -> HttpResponse {
    let result = match route {
        Route::Healthz => {
            return HttpResponse {
                status: 200,
                body: json!({
                    "ok": true,
                    "catalogDigest": service.catalog().digest(),
                    "lessons": service.catalog().lesson_count(),
                }),
            };
        }
        Route::Index => {
            return HttpResponse {
                status: 200,
                body: json!({
                    "service": "uxlearn.lessons.v1",
                    "routes": [
                        "/healthz",
                        "/modules?completed=<id>,<id>",
                        "/lesson?id=<lesson_id>",
                        "/check?lesson=<lesson_id>&step=<n>&place=<item>:<category>"
                    ]
                }),
            };
        }
        Route::Modules(completed) => service.query_json(UxQuery::Modules {
            completed: parse_completed(&completed),
        }),
        Route::Lesson(lesson_id) => service.query_json(UxQuery::Lesson { lesson_id }),
        Route::Check(request) => service.query_json(UxQuery::Check(request)),
    };

    match result {
        Ok(body) => HttpResponse { status: 200, body },
        Err(err) => query_error_response(err),
    }
}

fn route_error_response(err: RouteError) -> HttpResponse {
    match err {
        RouteError::BadRequest(msg) => HttpResponse {
            status: 400,
            body: json!({ "error": msg }),
        },
        RouteError::NotFound(msg) => HttpResponse {
            status: 404,
            body: json!({ "error": msg }),
        },
    }
}

fn query_error_response(err: UxQueryError) -> HttpResponse {
    let status = match err {
        UxQueryError::LessonNotFound(_) => 404,
        UxQueryError::Rejected(_) => 400,
        UxQueryError::Serialization(_) => 500,
    };
    HttpResponse {
        status,
        body: json!({ "error": err.to_string() }),
    }
}

fn write_json_response(stream: &mut TcpStream, response: HttpResponse) -> std::io::Result<()> {
    let body = serde_json::to_vec_pretty(&response.body)?;
    let status_text = reason_phrase(response.status);
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\nAccess-Control-Allow-Methods: GET\r\nConnection: close\r\n\r\n",
        response.status,
        status_text,
        body.len()
    );
    stream.write_all(header.as_bytes())?;
    stream.write_all(&body)?;
    stream.flush()
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

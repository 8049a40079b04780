use anyhow::{anyhow, Result};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{ALLOW, CACHE_CONTROL, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use acmsite_core::DataProvider;

use crate::views;

pub type Body = BoxBody<Bytes, std::io::Error>;

static INTERNAL_ERROR: &[u8] = b"Internal Server Error";
static METHOD_NOT_ALLOWED: &[u8] = b"Method Not Allowed";

pub async fn handle_request(
    provider: &DataProvider,
    req: Request<hyper::body::Incoming>,
) -> Result<Response<Body>> {
    route(provider, req.method(), req.uri().path()).await
}

/// Dispatch on method and path. Page routes fetch the bundle exactly once.
pub async fn route(provider: &DataProvider, method: &Method, path: &str) -> Result<Response<Body>> {
    let path = normalize_path(path);
    debug!(%method, path, "Handling request");

    if method != Method::GET {
        return method_not_allowed();
    }

    if path == "/healthz" {
        return health(provider);
    }

    let bundle = match provider.get_current_bundle().await {
        Ok(bundle) => bundle,
        Err(e) => {
            error!(error = %e, path, "Cannot serve page without content");
            return internal_error();
        }
    };

    match path {
        "/" => json_response(StatusCode::OK, &views::home(&bundle, path)),
        "/events" => json_response(StatusCode::OK, &views::events(&bundle, path)),
        "/team" => json_response(StatusCode::OK, &views::team(&bundle, path)),
        "/about" => json_response(StatusCode::OK, &views::about(&bundle, path)),
        _ => {
            debug!(path, "Request to unknown page");
            json_response(StatusCode::NOT_FOUND, &views::not_found(&bundle, path))
        }
    }
}

/// "/events/" and "/events" are the same page.
fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn health(provider: &DataProvider) -> Result<Response<Body>> {
    let settings = provider.settings();
    json_response(
        StatusCode::OK,
        &json!({
            "status": "ok",
            "cache": provider.cache_status(),
            "fallback": provider.has_fallback(),
            "freshnessMs": settings.freshness.as_millis() as u64,
            "fetchTimeoutMs": settings.fetch_timeout.as_millis() as u64,
        }),
    )
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response<Body>> {
    let body = serde_json::to_vec(value)?;
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(CACHE_CONTROL, "no-cache")
        .body(Full::new(body.into()).map_err(|e| match e {}).boxed())
        .map_err(|e| anyhow!("Failed to build response: {}", e))
}

pub fn internal_error() -> Result<Response<Body>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .body(Full::new(INTERNAL_ERROR.into()).map_err(|e| match e {}).boxed())
        .map_err(|e| anyhow!("Failed to build internal error response: {}", e))
}

fn method_not_allowed() -> Result<Response<Body>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(ALLOW, "GET")
        .body(Full::new(METHOD_NOT_ALLOWED.into()).map_err(|e| match e {}).boxed())
        .map_err(|e| anyhow!("Failed to build method not allowed response: {}", e))
}

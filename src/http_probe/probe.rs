use std::collections::BTreeMap;
use std::time::Instant;

use reqwest::multipart::{Form, Part};
use url::Url;

use super::prelude::*;
use super::report;

fn has_http_scheme(path: &str) -> bool {
    let head = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    head.starts_with("http://") || head.starts_with("https://")
}

/// Joins `path` onto `base`, keeping any path prefix of the base but not its
/// query or fragment. An absolute `http(s)://` URL (any case) is taken as-is
/// and a scheme-relative `//host/...` inherits the base scheme.
pub fn resolve_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    if has_http_scheme(path) {
        return Url::parse(path);
    }
    if path.starts_with("//") {
        return base.join(path);
    }

    let mut base = base.clone();
    base.set_query(None);
    base.set_fragment(None);
    let prefix = base.as_str().trim_end_matches('/');
    if path.starts_with('/') {
        Url::parse(&format!("{prefix}{path}"))
    } else {
        Url::parse(&format!("{prefix}/{path}"))
    }
}

fn describe_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_builder() {
        "invalid request"
    } else {
        "request failed"
    };
    format!("{kind}: {}", report(err))
}

fn parse_body(bytes: &[u8]) -> ResponseBody {
    match serde_json::from_slice(bytes) {
        Ok(value) => ResponseBody::Json(value),
        Err(_) => ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn build_request(
    client: &reqwest::Client,
    url: Url,
    request: &ProbeRequest,
) -> Result<reqwest::RequestBuilder, reqwest::Error> {
    let mut builder = client.request(request.method().into(), url);

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder = match request.body() {
        Some(RequestBody::Json(value)) => builder.json(value),
        Some(RequestBody::Multipart(file)) => {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime)?;
            builder.multipart(Form::new().part(file.field.clone(), part))
        }
        None => builder,
    };

    if let Some(timeout) = request.timeout() {
        builder = builder.timeout(timeout);
    }

    Ok(builder)
}

/// Sends `request` against `base_url` and records what came back.
///
/// Never fails: DNS errors, refused connections, timeouts and malformed
/// URLs all end up in `ProbeResult::error` with `success == false`.
pub async fn probe(
    client: &reqwest::Client,
    base_url: &Url,
    request: &ProbeRequest,
) -> ProbeResult {
    let method = request.method().to_string();

    let url = match resolve_url(base_url, request.path()) {
        Ok(url) => url,
        Err(e) => {
            let url = format!("{}{}", base_url, request.path());
            return ProbeResult::from_error(url, method, 0.0, format!("invalid url: {e}"));
        }
    };
    let url_str = url.to_string();

    let builder = match build_request(client, url, request) {
        Ok(builder) => builder,
        Err(e) => return ProbeResult::from_error(url_str, method, 0.0, describe_error(&e)),
    };

    log::debug!("{method} {url_str}");
    let start = Instant::now();

    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
            let elapsed = start.elapsed().as_secs_f64();
            log::debug!("{method} {url_str} failed after {elapsed:.3}s: {e}");
            return ProbeResult::from_error(url_str, method, elapsed, describe_error(&e));
        }
    };

    let status = response.status().as_u16();
    let headers: BTreeMap<String, String> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            let elapsed = start.elapsed().as_secs_f64();
            return ProbeResult::from_error(url_str, method, elapsed, describe_error(&e));
        }
    };
    let elapsed = start.elapsed().as_secs_f64();
    log::debug!("{method} {url_str} -> {status} in {elapsed:.3}s ({} bytes)", bytes.len());

    ProbeResult::from_response(url_str, method, status, elapsed, headers, parse_body(&bytes))
}

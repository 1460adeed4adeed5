//! Candidate-key extraction from requests.

use actix_web::dev::ServiceRequest;

/// Header channels checked after the configured custom header.
const HEADER_CHANNELS: [&str; 3] = ["x-apikey", "x-api-key", "apikey"];

/// Query-parameter channels, checked after all header channels.
const QUERY_CHANNELS: [&str; 2] = ["api-key", "apikey"];

/// Extracts the candidate API key from a request.
///
/// The first present channel wins: the custom header (when configured), then
/// `x-apikey`, `x-api-key` and `apikey` headers, then the `api-key` and
/// `apikey` query parameters. Header lookup is case-insensitive; the
/// extracted value is not trimmed or normalized in any way.
///
/// Returns `None` when no channel carries a value. An absent key is distinct
/// from a present-but-empty one and callers must keep it that way.
pub(crate) fn extract_api_key(req: &ServiceRequest, custom_header: Option<&str>) -> Option<String> {
    if let Some(name) = custom_header {
        if let Some(value) = header_value(req, name) {
            return Some(value);
        }
    }

    for name in HEADER_CHANNELS {
        if let Some(value) = header_value(req, name) {
            return Some(value);
        }
    }

    for name in QUERY_CHANNELS {
        if let Some(value) = query_value(req, name) {
            return Some(value);
        }
    }

    None
}

/// Reads a header value as a string; non-UTF-8 values count as absent.
fn header_value(req: &ServiceRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Reads a query parameter, percent-decoding its value.
fn query_value(req: &ServiceRequest, name: &str) -> Option<String> {
    req.query_string().split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name {
            Some(urlencoding::decode(value).ok()?.into_owned())
        } else {
            None
        }
    })
}

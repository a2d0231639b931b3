//! Request builder, sender and response decoder.
//!
//! # Design
//! `RequestSpec::new` does all the merging and header work once, at
//! construction; after that the spec is immutable. `to_http_request` is the
//! pure half of sending (body vs. query selection) and `send` consumes the
//! spec, so each one is used for exactly one round-trip.

use serde_json::Value;
use url::form_urlencoded;
use url::Url;

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpVersion};
use crate::transport::Transport;
use crate::types::{Params, RequestOptions, ResponseValue};

/// Name sent in the `User-Agent` header, followed by the config's version.
pub const CLIENT_NAME: &str = "RestRequest";

const CONTENT_TYPE: &str = "Content-Type";
const USER_AGENT: &str = "User-Agent";
const APPLICATION_JSON: &str = "application/json";

/// A fully resolved description of one outgoing request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    http_version: Option<HttpVersion>,
    method: HttpMethod,
    url: Url,
    content: Option<Value>,
    params: Params,
    headers: Vec<(String, String)>,
    json: bool,
    return_transfer: bool,
}

impl RequestSpec {
    /// Apply defaults to `options`, resolve the URL through `config` and
    /// fix the headers.
    pub fn new<C>(options: RequestOptions, config: &C) -> Result<Self, RequestError>
    where
        C: ClientConfig + ?Sized,
    {
        let method = match options.method.as_deref() {
            Some(method) => method.parse()?,
            None => HttpMethod::Get,
        };
        let path = options.url.unwrap_or_default();
        let url = config
            .resolve_url(&path)
            .map_err(RequestError::UrlResolution)?;
        let json = options.json.unwrap_or(false);

        let mut headers: Vec<(String, String)> =
            options.headers.unwrap_or_default().into_iter().collect();
        if json {
            set_header(&mut headers, CONTENT_TYPE, APPLICATION_JSON.to_string());
        }
        set_header(
            &mut headers,
            USER_AGENT,
            format!("{CLIENT_NAME} ver {}", config.version_string()),
        );

        let spec = Self {
            http_version: options.version,
            method,
            url,
            content: options.content,
            params: options.params.unwrap_or_default(),
            headers,
            json,
            return_transfer: options.return_transfer.unwrap_or(true),
        };
        tracing::debug!(method = %spec.method, url = %spec.url, json = spec.json, "request built");
        Ok(spec)
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn http_version(&self) -> Option<HttpVersion> {
        self.http_version
    }

    /// Has no effect on sending; retained from the request description.
    pub fn return_transfer(&self) -> bool {
        self.return_transfer
    }

    /// `"HTTP/1.0"` or `"HTTP/1.1"` when one of those versions was
    /// requested, `None` otherwise.
    pub fn http_version_label(&self) -> Option<&'static str> {
        self.http_version.and_then(|v| v.label())
    }

    /// Build the wire request without sending it.
    ///
    /// Write-like methods carry `params` (or, failing that, `content`) in
    /// the body; all other methods append `params` to the URL.
    pub fn to_http_request(&self) -> Result<HttpRequest, RequestError> {
        let mut url = self.url.clone();
        let body = if self.method.has_body() {
            self.encode_body()?
        } else {
            if !self.params.is_empty() {
                url.query_pairs_mut().extend_pairs(self.params.iter());
            }
            None
        };

        Ok(HttpRequest {
            method: self.method,
            url: url.into(),
            headers: self.headers.clone(),
            body,
            version: self.http_version,
        })
    }

    fn encode_body(&self) -> Result<Option<String>, RequestError> {
        if !self.params.is_empty() {
            let body = if self.json {
                serde_json::to_string(&self.params).map_err(RequestError::Encode)?
            } else {
                form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(self.params.iter())
                    .finish()
            };
            return Ok(Some(body));
        }

        match &self.content {
            None => Ok(None),
            Some(content) if is_blank(content) => Ok(None),
            Some(content) if self.json => serde_json::to_string(content)
                .map(Some)
                .map_err(RequestError::Encode),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Ok(Some(other.to_string())),
        }
    }

    /// Perform the request through `transport` and decode the response.
    ///
    /// Exactly one call is made; failures are returned as-is.
    pub fn send(self, transport: &dyn Transport) -> Result<ResponseValue, RequestError> {
        let request = self.to_http_request()?;
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = transport
            .execute(request)
            .map_err(RequestError::Transport)?;
        handle_response(response)
    }
}

/// Decode a raw response: non-2xx becomes `HttpStatus`, JSON content types
/// are parsed, everything else is returned as text.
pub fn handle_response(response: HttpResponse) -> Result<ResponseValue, RequestError> {
    tracing::trace!(status = response.status, "response received");
    if !response.is_success() {
        tracing::warn!(status = response.status, "request failed");
        return Err(RequestError::HttpStatus {
            status: response.status,
        });
    }

    let is_json = response
        .header(CONTENT_TYPE)
        .is_some_and(|ct| ct.to_ascii_lowercase().contains(APPLICATION_JSON));
    if is_json {
        let value = serde_json::from_str(&response.body).map_err(RequestError::Decode)?;
        Ok(ResponseValue::Json(value))
    } else {
        Ok(ResponseValue::Text(response.body))
    }
}

/// Content that counts as absent: `null`, `false`, zero and `""`.
fn is_blank(content: &Value) -> bool {
    match content {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Replace every header named `name` (any casing) with a single entry.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value));
}

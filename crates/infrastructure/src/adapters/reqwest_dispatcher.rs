//! Dispatcher implementation using reqwest.
//!
//! This adapter implements the `Dispatcher` port with `reqwest::blocking`.
//! It owns the base URL, default headers, and timeout policy, so a request
//! only carries what is specific to itself.

use std::time::{Duration, Instant};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use tracing::{debug, warn};

use attest_application::ports::{DispatchError, Dispatcher};
use attest_domain::config::ClientConfig;
use attest_domain::request::{
    AuthScheme, Header, HttpMethod, Request, RequestBody, RequestBodyKind,
};
use attest_domain::response::Response;

/// Dispatcher implementation using a blocking reqwest client.
///
/// One dispatcher serves any number of requests against the same base URL.
/// Every call to [`Dispatcher::send`] is a single attempt: no retries and no
/// caching between calls.
pub struct ReqwestDispatcher {
    client: Client,
    base_url: Url,
    default_headers: attest_domain::request::Headers,
    timeout_ms: u64,
    redirect_limit: usize,
}

impl ReqwestDispatcher {
    /// Creates a dispatcher from a client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the underlying
    /// client cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, DispatchError> {
        config
            .validate()
            .map_err(|e| DispatchError::InvalidUrl(e.to_string()))?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| DispatchError::InvalidUrl(format!("{e}: {}", config.base_url)))?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.redirect_limit))
            .build()
            .map_err(|e| DispatchError::Connection(format!("client initialization failed: {e}")))?;

        Ok(Self {
            client,
            base_url,
            default_headers: config.default_headers.clone(),
            timeout_ms: config.timeout_ms,
            redirect_limit: config.redirect_limit,
        })
    }

    /// Returns the base URL this dispatcher resolves paths against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Joins the base URL and request path, then appends query parameters.
    fn compose_url(&self, request: &Request) -> Result<Url, DispatchError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}{}", request.path);
        let mut url =
            Url::parse(&full).map_err(|e| DispatchError::InvalidUrl(format!("{e}: {full}")))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in request.query.iter() {
                pairs.append_pair(&param.name, &param.value);
            }
        }

        Ok(url)
    }

    /// Merges default and request headers, request values winning.
    fn merged_headers(&self, request: &Request) -> Result<HeaderMap, DispatchError> {
        let defaults = self
            .default_headers
            .iter()
            .filter(|h| !request.headers.contains(&h.name));
        let merged = defaults.chain(request.headers.iter());

        let mut headers = HeaderMap::new();
        for header in merged {
            let (name, value) = encode_header(header)?;
            headers.insert(name, value);
        }

        if let Some(content_type) = request.body.content_type() {
            if !headers.contains_key(reqwest::header::CONTENT_TYPE) {
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    HeaderValue::from_str(content_type).map_err(|e| {
                        DispatchError::InvalidHeader {
                            name: "Content-Type".to_string(),
                            reason: e.to_string(),
                        }
                    })?,
                );
            }
        }

        if let Some(value) = authorization_value(&request.auth) {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                HeaderValue::from_str(&value).map_err(|e| DispatchError::InvalidHeader {
                    name: "Authorization".to_string(),
                    reason: e.to_string(),
                })?,
            );
        }

        Ok(headers)
    }

    /// Builds the request body from the domain `RequestBody`.
    fn build_body(
        builder: reqwest::blocking::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::blocking::RequestBuilder, DispatchError> {
        match &body.kind {
            RequestBodyKind::None => Ok(builder),

            RequestBodyKind::Raw { .. } => {
                if body
                    .content_type()
                    .is_some_and(|ct| ct.contains("application/json"))
                    && !body.content.is_empty()
                {
                    let _: serde_json::Value = serde_json::from_str(&body.content)
                        .map_err(|e| DispatchError::Body(format!("invalid JSON: {e}")))?;
                }
                Ok(builder.body(body.content.clone()))
            }

            RequestBodyKind::FormUrlEncoded => Ok(builder.body(body.content.clone())),
        }
    }

    /// Maps reqwest errors to `DispatchError`.
    fn map_error(&self, error: &reqwest::Error, timeout_ms: u64) -> DispatchError {
        if error.is_timeout() {
            return DispatchError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let lowered = message.to_lowercase();
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return DispatchError::Dns { host };
            }
            if lowered.contains("refused") {
                return DispatchError::ConnectionRefused(message);
            }
            return DispatchError::Connection(message);
        }

        if error.is_redirect() {
            return DispatchError::TooManyRedirects {
                max: self.redirect_limit,
            };
        }

        DispatchError::Protocol(error.to_string())
    }
}

impl Dispatcher for ReqwestDispatcher {
    fn send(&self, request: &Request) -> Result<Response, DispatchError> {
        let url = self.compose_url(request)?;
        let timeout_ms = request.timeout_ms.unwrap_or(self.timeout_ms);
        let headers = self.merged_headers(request)?;

        debug!(method = %request.method, url = %url, timeout_ms, "dispatching request");

        let builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(timeout_ms))
            .headers(headers);
        let builder = Self::build_body(builder, &request.body)?;

        let start = Instant::now();
        let response = builder.send().map_err(|e| {
            let mapped = self.map_error(&e, timeout_ms);
            warn!(error = %mapped, "dispatch failed");
            mapped
        })?;
        let duration = start.elapsed();

        let status = response.status().as_u16();
        let response_headers = headers_from_reqwest(response.headers());
        let body = response
            .bytes()
            .map_err(|e| DispatchError::Body(format!("failed to read body: {e}")))?
            .to_vec();

        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        debug!(status, duration_ms, "response received");

        Ok(Response::new(status, response_headers, body, duration))
    }
}

/// Converts a reqwest header map into domain headers.
fn headers_from_reqwest(map: &HeaderMap) -> attest_domain::request::Headers {
    map.iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or("<binary>").to_string(),
            )
        })
        .collect()
}

fn encode_header(header: &Header) -> Result<(HeaderName, HeaderValue), DispatchError> {
    let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(|e| {
        DispatchError::InvalidHeader {
            name: header.name.clone(),
            reason: e.to_string(),
        }
    })?;
    let value =
        HeaderValue::from_str(&header.value).map_err(|e| DispatchError::InvalidHeader {
            name: header.name.clone(),
            reason: e.to_string(),
        })?;
    Ok((name, value))
}

/// Resolves the authentication scheme to an Authorization header value.
fn authorization_value(auth: &AuthScheme) -> Option<String> {
    match auth {
        AuthScheme::None => None,
        AuthScheme::Basic { username, password } => {
            let credentials = STANDARD.encode(format!("{username}:{password}"));
            Some(format!("Basic {credentials}"))
        }
        AuthScheme::Bearer { token } => Some(format!("Bearer {token}")),
    }
}

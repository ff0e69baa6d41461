// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Blocking HTTP client with manual cookie management

use std::collections::HashMap;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Method;

use crate::body::{self, ChunkedReader};
use crate::cookie;
use crate::error::{Error, Result};
use crate::headers;
use crate::request::Request;
use crate::response::Response;
use crate::DEFAULT_USER_AGENT;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Overall request timeout (send plus receive)
    pub timeout: Duration,
    /// Connect timeout (name resolution plus TCP connect)
    pub connect_timeout: Duration,
    /// Follow redirects
    pub follow_redirects: bool,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Enable cookie handling
    pub handle_cookies: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(headers::ACCEPT, HeaderValue::from_static("*/*"));
        default_headers.insert(
            headers::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.5"),
        );
        // accept-encoding is left to reqwest so its gzip/brotli features
        // keep decoding bodies.

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(15),
            follow_redirects: true,
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            handle_cookies: true,
            proxy: None,
        }
    }
}

/// Blocking HTTP client with manual cookie management
///
/// Owns one `reqwest` blocking client plus the serialized cookie string
/// for the session. Methods take `&mut self`: a client serves one
/// request/response cycle at a time. Run several sessions by creating
/// several clients.
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    /// Serialized cookie string persisted across requests
    cookies: String,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let redirect_policy = if config.follow_redirects {
            Policy::limited(config.max_redirects)
        } else {
            Policy::none()
        };

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(redirect_policy)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone())
            .cookie_store(false); // We handle cookies ourselves

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            cookies: String::new(),
        })
    }

    /// Get the serialized cookie string for the session
    pub fn cookies(&self) -> &str {
        &self.cookies
    }

    /// Replace the session cookie string, e.g. one restored from storage
    pub fn set_cookies(&mut self, cookies: impl Into<String>) {
        self.cookies = cookies.into();
    }

    /// Clear all session cookies
    pub fn clear_cookies(&mut self) {
        self.cookies.clear();
    }

    /// Execute a GET request
    pub fn get(&mut self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?)
    }

    /// Execute a POST request
    pub fn post(&mut self, url: impl AsRef<str>, body: impl Into<Bytes>) -> Result<Response> {
        self.execute(Request::post(url)?.body(body))
    }

    /// Execute a request
    pub fn execute(&mut self, request: Request) -> Result<Response> {
        let start = Instant::now();

        // Build the reqwest request
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        // Add headers
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        // A POST with a body but no explicit content type defaults to form
        // encoding, matching what servers expect from form-driven clients.
        if request.method == Method::POST
            && request.body.is_some()
            && !request.headers.contains_key(headers::CONTENT_TYPE)
        {
            builder = builder.header(headers::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }

        // Send the stored cookie string if handling is enabled
        if self.config.handle_cookies && !self.cookies.is_empty() {
            builder = builder.header(headers::COOKIE, self.cookies.clone());
        }

        // Set body if present
        if let Some(body) = request.body {
            builder = builder.body(body.to_vec());
        }

        // Set timeout
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        // Execute the request
        let response = builder.send()?;
        let response_time = start.elapsed().as_millis() as u64;

        // Check if redirected
        let redirected = response.url() != &request.url;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        // Accumulate the body chunk by chunk; mid-stream transport errors
        // yield a partial body instead of failing the exchange.
        let body = body::drain(&mut ChunkedReader::new(response));

        let response = Response::new(
            status,
            headers,
            Bytes::from(body),
            final_url,
            redirected,
            response_time,
        );

        // Refresh the session cookies with whatever this response set
        if self.config.handle_cookies {
            let fresh = response.cookie_string();
            self.cookies = cookie::merge_cookies(&self.cookies, &fresh);
        }

        tracing::debug!(
            status = %response.status,
            body_len = response.body_len(),
            time_ms = response.response_time_ms,
            "response received"
        );

        Ok(response)
    }

    /// Create a request builder bound to this client
    pub fn request(&mut self, method: Method, url: impl AsRef<str>) -> Result<RequestBuilder<'_>> {
        Ok(RequestBuilder {
            client: self,
            request: Request::new(method, url)?,
        })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

/// Builder for executing requests with the client
pub struct RequestBuilder<'c> {
    client: &'c mut HttpClient,
    request: Request,
}

impl RequestBuilder<'_> {
    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Set the Referer header
    pub fn referer(mut self, referer: impl AsRef<str>) -> Self {
        self.request = self.request.referer(referer);
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request = self.request.body(body);
        self
    }

    /// Set JSON body
    pub fn json<T: serde::Serialize>(mut self, data: &T) -> Result<Self> {
        self.request = self.request.json(data)?;
        Ok(self)
    }

    /// Set form body
    pub fn form(mut self, data: &HashMap<String, String>) -> Self {
        self.request = self.request.form(data);
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request = self.request.timeout(timeout);
        self
    }

    /// Execute the request
    pub fn send(self) -> Result<Response> {
        self.client.execute(self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(client.config().handle_cookies);
        assert!(client.cookies().is_empty());
    }

    #[test]
    fn test_cookie_accessors() {
        let mut client = HttpClient::new().unwrap();
        client.set_cookies("a=1; b=2");
        assert_eq!(client.cookies(), "a=1; b=2");
        client.clear_cookies();
        assert!(client.cookies().is_empty());
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let config = HttpClientConfig {
            proxy: Some("not a proxy".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::with_config(config),
            Err(Error::Config(_))
        ));
    }

    // reqwest's blocking client refuses to run on an async runtime thread,
    // so the wiremock tests do their client work inside spawn_blocking.

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_stores_session_cookies() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
                    .set_body_string("ok"),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/account"))
            .and(header("cookie", "sid=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("authed"))
            .mount(&server)
            .await;

        let base = server.uri();
        let (cookies, body) = tokio::task::spawn_blocking(move || -> Result<(String, String)> {
            let mut client = HttpClient::new()?;
            let first = client.get(format!("{}/login", base))?;
            assert!(first.is_success());
            let cookies = client.cookies().to_string();
            let second = client.get(format!("{}/account", base))?;
            Ok((cookies, second.text()?))
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(cookies, "sid=abc123");
        assert_eq!(body, "authed");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_cookies_refresh_across_responses() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/one"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "a=1; Path=/"),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/two"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "b=2; Path=/"),
            )
            .mount(&server)
            .await;

        let base = server.uri();
        let cookies = tokio::task::spawn_blocking(move || -> Result<String> {
            let mut client = HttpClient::new()?;
            client.get(format!("{}/one", base))?;
            client.get(format!("{}/two", base))?;
            Ok(client.cookies().to_string())
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(cookies, "a=1; b=2");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_post_defaults_to_form_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("q=hello"))
            .respond_with(ResponseTemplate::new(200).set_body_string("posted"))
            .mount(&server)
            .await;

        let base = server.uri();
        let body = tokio::task::spawn_blocking(move || -> Result<String> {
            let mut client = HttpClient::new()?;
            let response = client.post(format!("{}/submit", base), "q=hello")?;
            response.text()
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(body, "posted");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_request_builder_sends_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("referer", "https://example.com/prev"))
            .and(header("x-probe", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("seen"))
            .mount(&server)
            .await;

        let base = server.uri();
        let body = tokio::task::spawn_blocking(move || -> Result<String> {
            let mut client = HttpClient::new()?;
            let response = client
                .request(Method::GET, format!("{}/page", base))?
                .referer("https://example.com/prev")
                .header("x-probe", "1")
                .send()?;
            response.text()
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(body, "seen");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_cleared_cookie_not_stored() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/clear"))
            .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "tmp=-"))
            .mount(&server)
            .await;

        let base = server.uri();
        let cookies = tokio::task::spawn_blocking(move || -> Result<String> {
            let mut client = HttpClient::new()?;
            client.get(format!("{}/clear", base))?;
            Ok(client.cookies().to_string())
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(cookies, "");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_body_accumulated_fully() {
        let server = MockServer::start().await;

        let payload = "x".repeat(64 * 1024);
        Mock::given(method("GET"))
            .and(path("/large"))
            .respond_with(ResponseTemplate::new(200).set_body_string(payload.clone()))
            .mount(&server)
            .await;

        let base = server.uri();
        let body = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let mut client = HttpClient::new()?;
            let response = client.get(format!("{}/large", base))?;
            Ok(response.body.to_vec())
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(body.len(), payload.len());
        assert_eq!(body, payload.into_bytes());
    }
}

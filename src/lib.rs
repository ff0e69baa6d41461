// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Silakka - Minimal Blocking HTTP Client
//!
//! A small, fully synchronous HTTP client for security tooling that needs
//! exact control over its cookies. No async runtime, no hidden cookie jar:
//! cookies live as plain `name=value; name=value` strings the caller can
//! read, store, and replay.
//!
//! ## Features
//!
//! - Blocking API: one call, one response, no executor to carry around
//! - Manual cookie handling: Set-Cookie extraction and last-write-wins
//!   merging over serialized cookie strings
//! - Session refresh: every response's cookies are merged into the
//!   client's stored string automatically
//! - Chunked body accumulation: mid-stream failures yield partial bodies
//!   instead of hard errors
//! - rustls TLS, gzip/brotli decompression, proxy support via reqwest
//!
//! ## Example
//!
//! ```rust,no_run
//! use silakka::HttpClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = HttpClient::new()?;
//!
//!     let response = client.get("https://example.com/login")?;
//!     println!("status: {}", response.status);
//!     println!("cookies: {}", client.cookies());
//!
//!     // Stored cookies ride along on every later request.
//!     let response = client.get("https://example.com/account")?;
//!     println!("{}", response.text_lossy());
//!
//!     Ok(())
//! }
//! ```

pub mod body;
pub mod client;
pub mod cookie;
pub mod error;
pub mod request;
pub mod response;
pub mod scan;

// Re-exports for convenience

// Client
pub use client::{HttpClient, HttpClientConfig, RequestBuilder};

// Cookie engine
pub use cookie::{extract_cookies, merge_cookies, CookieJar};

// Body accumulation
pub use body::{BodySource, ChunkedReader};

// Requests and responses
pub use request::Request;
pub use response::Response;

// Errors
pub use error::{Error, Result};

/// Silakka version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
    pub const REFERER: &str = "referer";
    pub const LOCATION: &str = "location";
}

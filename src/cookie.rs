// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Manual cookie handling: Set-Cookie extraction and cookie-string merging
//!
//! Cookies live as plain serialized `name=value; name=value` strings between
//! requests. Each call rebuilds a [`CookieJar`] from scratch, deduplicates by
//! name, and serializes the survivors back out, so there is no hidden jar
//! state to drift out of sync with what actually goes on the wire.
//!
//! Cookie attributes (`Path`, `Expires`, `HttpOnly`, ...) are metadata for
//! the pair that precedes them, not cookies. They are discarded: only bare
//! pairs travel back to servers.

use std::collections::BTreeMap;

use crate::scan;

/// Marker for a Set-Cookie response header, after normalization.
const SET_COOKIE: &str = "Set-Cookie:";
/// Spaced variant some servers emit; normalized away before scanning.
const SET_COOKIE_SPACED: &str = "Set-Cookie: ";
/// Header line terminator in a raw header blob.
const CRLF: &str = "\r\n";

/// Values some servers use to signal an explicitly cleared cookie.
/// Pairs carrying one of these are dropped at serialization time.
const CLEARED_VALUES: [&str; 2] = ["-", "''"];

/// Cookie attribute names per RFC 6265, matched case-insensitively.
const ATTRIBUTE_NAMES: [&str; 8] = [
    "path",
    "domain",
    "expires",
    "max-age",
    "samesite",
    "secure",
    "httponly",
    "partitioned",
];

/// Deduplicated name-to-value cookie mapping, ordered by name.
///
/// Built for a single extract or merge call and discarded after
/// serialization; callers keep the serialized string instead.
#[derive(Debug, Clone)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// Create an empty cookie jar
    pub fn new() -> Self {
        Self {
            cookies: BTreeMap::new(),
        }
    }

    /// Parse one `name=value` token and insert it. Later inserts of the
    /// same name overwrite earlier ones.
    ///
    /// The name is trimmed; the value is kept byte-for-byte, leading
    /// whitespace included, because servers compare values exactly as they
    /// set them. Tokens without `=` (flag attributes like `HttpOnly`),
    /// tokens with an empty name or value, and tokens named like a cookie
    /// attribute are all discarded.
    pub fn insert_token(&mut self, token: &str) {
        let (name, value) = match token.split_once('=') {
            Some(pair) => pair,
            None => return,
        };

        let name = name.trim();
        if name.is_empty() || value.is_empty() {
            return;
        }
        if ATTRIBUTE_NAMES
            .iter()
            .any(|attr| name.eq_ignore_ascii_case(attr))
        {
            return;
        }

        self.cookies.insert(name.to_string(), value.to_string());
    }

    /// Insert every `;`-separated token of a serialized cookie string.
    pub fn insert_list(&mut self, cookies: &str) {
        for token in scan::split_list(cookies, ";") {
            self.insert_token(token);
        }
    }

    /// Insert every pair carried by the `Set-Cookie` lines of a raw
    /// CRLF-joined header blob.
    pub fn insert_headers(&mut self, raw_headers: &str) {
        // Servers emit both "Set-Cookie: " and "Set-Cookie:"; collapse to
        // the no-space form so a single marker matches every line.
        let normalized = raw_headers.replace(SET_COOKIE_SPACED, SET_COOKIE);
        for header in scan::between_all(&normalized, SET_COOKIE, CRLF) {
            self.insert_list(header);
        }
    }

    /// Look up a cookie value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Number of pairs in the jar, cleared ones included
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Check if the jar holds no pairs
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Serialize surviving pairs as `name=value; name=value`, in name order.
    ///
    /// Pairs whose value marks a cleared cookie are skipped. Returns the
    /// empty string when nothing survives.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.cookies {
            if CLEARED_VALUES.contains(&value.as_str()) {
                continue;
            }
            if !out.is_empty() {
                out.push_str("; ");
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

/// Extract every cookie a response sets into one serialized cookie string,
/// ready to send back in a `cookie` request header.
///
/// `raw_headers` is the CRLF-joined header blob of a single response.
/// Returns the empty string when no pair survives.
pub fn extract_cookies(raw_headers: &str) -> String {
    let mut jar = CookieJar::new();
    jar.insert_headers(raw_headers);
    jar.serialize()
}

/// Merge two serialized cookie strings. Pairs in `now` override pairs in
/// `old` with the same name; names unique to either side survive.
///
/// This is the refresh step of a cookie session: `old` is what the client
/// has stored, `now` is what the latest response just set.
pub fn merge_cookies(old: &str, now: &str) -> String {
    let mut jar = CookieJar::new();
    jar.insert_list(old);
    jar.insert_list(now);
    jar.serialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_empty_blob() {
        assert_eq!(extract_cookies(""), "");
    }

    #[test]
    fn test_extract_no_set_cookie_lines() {
        let headers = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n";
        assert_eq!(extract_cookies(headers), "");
    }

    #[test]
    fn test_extract_drops_attributes() {
        let headers = "Set-Cookie: a=1; Path=/\r\nSet-Cookie: b=2\r\n";
        assert_eq!(extract_cookies(headers), "a=1; b=2");
    }

    #[test]
    fn test_extract_last_write_wins() {
        let headers = "Set-Cookie: a=1\r\nSet-Cookie: a=2\r\n";
        assert_eq!(extract_cookies(headers), "a=2");
    }

    #[test]
    fn test_extract_cleared_values_skipped() {
        let headers = "Set-Cookie: a=-\r\nSet-Cookie: b=''\r\n";
        assert_eq!(extract_cookies(headers), "");
    }

    #[test]
    fn test_extract_value_keeps_leading_whitespace() {
        let headers = "Set-Cookie: a= 1\r\n";
        assert_eq!(extract_cookies(headers), "a= 1");
    }

    #[test]
    fn test_extract_value_may_contain_equals() {
        let headers = "Set-Cookie: token=a=b\r\n";
        assert_eq!(extract_cookies(headers), "token=a=b");
    }

    #[test]
    fn test_extract_marker_without_space() {
        let headers = "Set-Cookie:session=xyz\r\n";
        assert_eq!(extract_cookies(headers), "session=xyz");
    }

    #[test]
    fn test_extract_flag_attributes_ignored() {
        let headers = "Set-Cookie: sid=abc; Secure; HttpOnly\r\n";
        assert_eq!(extract_cookies(headers), "sid=abc");
    }

    #[test]
    fn test_extract_attribute_names_case_insensitive() {
        let headers = "Set-Cookie: sid=abc; PATH=/login; Max-Age=3600\r\n";
        assert_eq!(extract_cookies(headers), "sid=abc");
    }

    #[test]
    fn test_extract_serializes_in_name_order() {
        let headers = "Set-Cookie: zeta=9\r\nSet-Cookie: alpha=1\r\n";
        assert_eq!(extract_cookies(headers), "alpha=1; zeta=9");
    }

    #[test]
    fn test_extract_ignores_line_without_terminator() {
        assert_eq!(extract_cookies("Set-Cookie: a=1"), "");
    }

    #[test]
    fn test_merge_now_overrides_old() {
        assert_eq!(merge_cookies("a=1; b=2", "b=3; c=4"), "a=1; b=3; c=4");
    }

    #[test]
    fn test_merge_empty_old() {
        assert_eq!(merge_cookies("", "a=1"), "a=1");
    }

    #[test]
    fn test_merge_empty_now_is_identity() {
        assert_eq!(merge_cookies("a=1; b=2", ""), "a=1; b=2");
    }

    #[test]
    fn test_merge_both_empty() {
        assert_eq!(merge_cookies("", ""), "");
    }

    #[test]
    fn test_merge_reserialize_is_stable() {
        let once = merge_cookies("b=2; a=1", "");
        let twice = merge_cookies(&once, "");
        assert_eq!(once, "a=1; b=2");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_cleared_value_drops_pair() {
        // A pair cleared in the fresh set disappears from the output but
        // does not erase other names.
        assert_eq!(merge_cookies("a=1; b=2", "b=-"), "a=1");
    }

    #[test]
    fn test_jar_token_without_equals_ignored() {
        let mut jar = CookieJar::new();
        jar.insert_token("HttpOnly");
        assert!(jar.is_empty());
    }

    #[test]
    fn test_jar_empty_name_or_value_ignored() {
        let mut jar = CookieJar::new();
        jar.insert_token("=orphan");
        jar.insert_token("name=");
        jar.insert_token("  =  ");
        assert!(jar.is_empty());
    }

    #[test]
    fn test_jar_lookup_and_len() {
        let mut jar = CookieJar::new();
        jar.insert_list("a=1; b=2");
        assert_eq!(jar.len(), 2);
        assert_eq!(jar.get("a"), Some("1"));
        assert_eq!(jar.get("missing"), None);
    }
}

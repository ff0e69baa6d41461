// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! String scanning helpers for manual header parsing
//!
//! Pure functions over string slices, shared by the cookie engine.
//! Results borrow from the input; nothing here allocates.

/// Split `s` on a literal delimiter, dropping empty tokens.
pub fn split_list<'a>(s: &'a str, delim: &str) -> Vec<&'a str> {
    s.split(delim).filter(|token| !token.is_empty()).collect()
}

/// Collect every substring strictly between a `left` marker and the next
/// `right` marker, scanning left to right.
///
/// Empty matches are dropped. A final `left` marker with no `right` marker
/// after it contributes nothing.
pub fn between_all<'a>(s: &'a str, left: &str, right: &str) -> Vec<&'a str> {
    let mut matches = Vec::new();
    let mut rest = s;

    while let Some(start) = rest.find(left) {
        let tail = &rest[start + left.len()..];
        let end = match tail.find(right) {
            Some(end) => end,
            None => break,
        };
        if end > 0 {
            matches.push(&tail[..end]);
        }
        rest = &tail[end + right.len()..];
    }

    matches
}

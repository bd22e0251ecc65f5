// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content window selection
//!
//! Positions and lengths count Unicode scalar values, so a window never
//! splits a multi-byte character.

/// Select `max_length` characters of `content` starting at `start_index`
///
/// A negative `start_index` is treated as 0. A `max_length` of zero or less
/// means "no upper bound". Never fails; out-of-range windows are empty.
pub fn select(content: &str, start_index: i64, max_length: i64) -> &str {
    let start = usize::try_from(start_index).unwrap_or(0);
    let Some(begin) = char_offset(content, start) else {
        return "";
    };
    let rest = &content[begin..];
    if max_length <= 0 {
        return rest;
    }
    let max = usize::try_from(max_length).unwrap_or(usize::MAX);
    match char_offset(rest, max) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// First `len` characters of `content`; zero means none
pub fn prefix(content: &str, len: usize) -> &str {
    match char_offset(content, len) {
        Some(end) => &content[..end],
        None => content,
    }
}

/// Number of characters in `content`
pub fn char_len(content: &str) -> usize {
    content.chars().count()
}

/// Byte offset of the `n`th character, or `None` if `content` is shorter
fn char_offset(content: &str, n: usize) -> Option<usize> {
    if n == 0 {
        return (!content.is_empty()).then_some(0);
    }
    content.char_indices().nth(n).map(|(i, _)| i)
}

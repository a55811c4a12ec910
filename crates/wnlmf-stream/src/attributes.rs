// WNLMF - Streaming WordNet LMF Reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Permissive attribute scanning over a raw tag span.
//!
//! The scanner looks for `name = "value"` pairs anywhere in the span. Names
//! consist of word characters, colons, dots and hyphens; values are the
//! shortest double-quoted run. Anything that does not fit is skipped, so a
//! malformed tag produces a partial or empty map instead of an error.

use memchr::memchr;
use quick_xml::escape::unescape;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Attribute map of a single node, ordered by name.
pub type Attributes = BTreeMap<String, String>;

/// Scan `raw` for attribute pairs.
///
/// Later duplicates overwrite earlier ones.
pub(crate) fn scan(raw: &str) -> Attributes {
    let bytes = raw.as_bytes();
    let mut attributes = Attributes::new();
    let mut i = 0;

    while i < bytes.len() {
        if !is_name_byte(bytes[i]) {
            i += 1;
            continue;
        }

        let name_start = i;
        while i < bytes.len() && is_name_byte(bytes[i]) {
            i += 1;
        }
        let name_end = i;

        let eq = skip_whitespace(bytes, name_end);
        if bytes.get(eq) != Some(&b'=') {
            continue;
        }
        let quote = skip_whitespace(bytes, eq + 1);
        if bytes.get(quote) != Some(&b'"') {
            continue;
        }

        let value_start = quote + 1;
        let Some(len) = memchr(b'"', &bytes[value_start..]) else {
            continue;
        };
        let value_end = value_start + len;

        // All structural bytes are ASCII, so these are char boundaries.
        let name = &raw[name_start..name_end];
        let value = decode(&raw[value_start..value_end]);
        attributes.insert(name.to_string(), value.into_owned());

        i = value_end + 1;
    }

    attributes
}

/// Decode predefined and numeric character references, keeping the input
/// verbatim when it contains an escape quick-xml cannot resolve.
pub(crate) fn decode(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }
    unescape(value).unwrap_or(Cow::Borrowed(value))
}

/// Bytes allowed in an attribute name. Non-ASCII bytes belong to multi-byte
/// characters and are accepted as word characters.
#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'.' | b'-') || b >= 0x80
}

#[inline]
fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

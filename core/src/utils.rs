// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Utility functions and types.

use std::fmt;

/// Values shorter than this are masked entirely.
const REVEAL_THRESHOLD: usize = 12;

/// Number of leading and trailing characters revealed for long values.
const REVEAL_LEN: usize = 3;

/// Redact wraps a secret-bearing string so that it can be passed to `log` or `Debug`.
///
/// Long values keep their first and last three characters (`AKI***PLE`) so that two
/// different access keys can still be told apart in logs. Anything shorter is fully masked.
#[derive(Clone, Copy)]
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl fmt::Debug for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        if s.is_empty() {
            return f.write_str("EMPTY");
        }
        // Slicing by bytes would split multi-byte characters.
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < REVEAL_THRESHOLD {
            return f.write_str("***");
        }

        let head: String = chars[..REVEAL_LEN].iter().collect();
        let tail: String = chars[chars.len() - REVEAL_LEN..].iter().collect();
        write!(f, "{head}***{tail}")
    }
}

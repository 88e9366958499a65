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

//! Time related utils.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use chrono::Utc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format: "20220313"
const DATE: &str = "%Y%m%d";

/// Time format for ISO 8601 basic: "20220313T072004Z"
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Sample the system clock.
///
/// Fails with a clock error when system time cannot be represented,
/// for example when it reads earlier than the unix epoch.
pub fn now() -> Result<DateTime> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::clock("time went backwards").with_source(e))?;

    let secs = i64::try_from(since_epoch.as_secs())
        .map_err(|_| Error::clock("system time is out of range"))?;

    DateTime::from_timestamp(secs, since_epoch.subsec_nanos())
        .ok_or_else(|| Error::clock("system time is out of range"))
}

/// Format time into date: "20220301"
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format time into ISO 8601 basic: "20220313T072004Z"
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse ISO 8601 basic time: "20220313T072004Z"
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    NaiveDateTime::parse_from_str(s, ISO8601)
        .map(|t| t.and_utc())
        .map_err(|e| {
            Error::invalid_input("failed to parse iso8601 basic time")
                .with_source(anyhow::Error::from(e))
                .with_context(format!("value: {s}"))
        })
}

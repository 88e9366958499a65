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

use crate::constants::{AWS_DEFAULT_REGION, AWS_REGION, DEFAULT_DOMAIN, EC2_SERVICE};
use ec2sign_core::{Context, Error, Result};

/// Config for the EC2 request signer.
///
/// Values set explicitly always win over values loaded by [`Config::from_env`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Region to sign for, e.g. `us-east-1`.
    ///
    /// - this field if it's `is_some`
    /// - env value: `AWS_REGION`
    /// - env value: `AWS_DEFAULT_REGION`
    pub region: Option<String>,
    /// Service name used in the endpoint and the credential scope, `ec2` by default.
    pub service: String,
    /// Provider domain used to build the endpoint host, `amazonaws.com` by default.
    pub domain: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            service: EC2_SERVICE.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.region.is_none() {
            self.region = [AWS_REGION, AWS_DEFAULT_REGION]
                .into_iter()
                .filter_map(|k| ctx.env_var(k))
                .find(|v| !v.is_empty());
        }

        self
    }
}

/// Derive the region from an availability zone such as `us-east-1a`.
///
/// Zones are the region name followed by a single zone letter.
pub fn region_from_availability_zone(zone: &str) -> Result<&str> {
    let zone = zone.trim();
    let mut chars = zone.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(digit)) if letter.is_ascii_lowercase() && digit.is_ascii_digit() => {
            Ok(&zone[..zone.len() - 1])
        }
        _ => Err(Error::invalid_input("malformed availability zone")
            .with_context(format!("availability_zone: {zone}"))),
    }
}

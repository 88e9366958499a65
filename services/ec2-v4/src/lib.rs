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

//! AWS SigV4 signing for the EC2 query API.
//!
//! Given temporary credentials, a region and a canonical query string, this crate produces
//! the `Authorization`, `x-amz-date` and `X-Amz-Security-Token` headers of a GET request
//! to `https://ec2.<region>.amazonaws.com/?<query>`.
//!
//! ## Example
//!
//! ```
//! use ec2sign_core::time::parse_iso8601;
//! use ec2sign_v4::{canonical_query_string, Credential, RequestSigner};
//! use http::Method;
//!
//! # fn main() -> ec2sign_core::Result<()> {
//! let cred = Credential::new(
//!     "AKIDEXAMPLE",
//!     "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
//!     "session-token",
//! );
//! let signer = RequestSigner::new("ec2", "us-east-1");
//! let query = canonical_query_string([
//!     ("Action", "DescribeRouteTables"),
//!     ("Version", "2016-11-15"),
//! ]);
//!
//! let result = signer.sign(
//!     &cred,
//!     &Method::GET,
//!     "/",
//!     &query,
//!     parse_iso8601("20150830T123600Z")?,
//! )?;
//! assert_eq!(result.x_amz_date, "20150830T123600Z");
//! assert!(result.authorization.starts_with(
//!     "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/ec2/aws4_request"
//! ));
//! # Ok(())
//! # }
//! ```
//!
//! Use [`ec2sign_core::Signer`] together with a credential provider to sign
//! `http::request::Parts` at the current time instead.

#![warn(missing_docs)]

mod constants;
pub use constants::{DEFAULT_DOMAIN, EC2_SERVICE, EMPTY_STRING_SHA256};

mod config;
pub use config::{region_from_availability_zone, Config};

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{
    canonical_query_string, credential_scope, sign, CanonicalRequest, RequestSigner,
    SignatureResult, SigningKey,
};

mod provide_credential;
pub use provide_credential::{EnvCredentialProvider, StaticCredentialProvider};

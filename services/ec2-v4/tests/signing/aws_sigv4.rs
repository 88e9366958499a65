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

use super::{init_logger, signature_of, test_time};
use anyhow::Result;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use ec2sign_core::time::DateTime;
use ec2sign_v4::{canonical_query_string, Credential, RequestSigner};
use http::Method;
use pretty_assertions::assert_eq;
use std::time::SystemTime;
use test_case::test_case;

/// Sign the same GET request with the aws-sigv4 crate and return its signature.
fn expected_signature(region: &str, query: &str, now: DateTime) -> Result<String> {
    let id = Credentials::new(
        "access_key_id",
        "secret_access_key",
        None,
        None,
        "hardcoded-credentials",
    )
    .into();
    let sp = v4::SigningParams::builder()
        .identity(&id)
        .region(region)
        .name("ec2")
        .time(SystemTime::from(now))
        .settings(SigningSettings::default())
        .build()?;

    let output = aws_sigv4::http_request::sign(
        SignableRequest::new(
            "GET",
            format!("https://ec2.{region}.amazonaws.com/?{query}"),
            std::iter::empty::<(&str, &str)>(),
            SignableBody::Bytes(b""),
        )?,
        &sp.into(),
    )?;
    let (_, signature) = output.into_parts();
    Ok(signature)
}

#[test_case("us-east-1", &[("Action", "DescribeRouteTables"), ("Version", "2016-11-15")] ; "describe route tables")]
#[test_case("eu-west-1", &[("Action", "DescribeRegions"), ("Version", "2016-11-15")] ; "describe regions")]
#[test_case(
    "ap-southeast-2",
    &[
        ("Action", "DescribeNetworkInterfaces"),
        ("Version", "2016-11-15"),
        ("Filter.1.Name", "vpc-id"),
        ("Filter.1.Value.1", "vpc-1a2b3c4d"),
    ] ;
    "filtered"
)]
#[test_case("us-west-2", &[("Action", "DescribeTags"), ("Filter.1.Value.1", "web server")] ; "value with space")]
fn test_matches_aws_sigv4(region: &str, params: &[(&str, &str)]) -> Result<()> {
    init_logger();

    let query = canonical_query_string(params.iter().copied());
    let now = test_time();

    let cred = Credential::new("access_key_id", "secret_access_key", "unused-token");
    let signer = RequestSigner::new("ec2", region);
    let result = signer.sign(&cred, &Method::GET, "/", &query, now)?;

    assert_eq!(
        signature_of(&result),
        expected_signature(region, &query, now)?,
        "signature mismatch for {query}"
    );
    Ok(())
}

#[test]
fn test_matches_aws_sigv4_at_current_time() -> Result<()> {
    init_logger();

    let now = ec2sign_core::time::now()?;
    let query = "Action=DescribeRouteTables&Version=2016-11-15";
    let cred = Credential::new("access_key_id", "secret_access_key", "unused-token");
    let signer = RequestSigner::new("ec2", "us-east-1");
    let result = signer.sign(&cred, &Method::GET, "/", query, now)?;

    assert_eq!(
        signature_of(&result),
        expected_signature("us-east-1", query, now)?
    );
    Ok(())
}

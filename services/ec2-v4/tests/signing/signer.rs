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

use super::{init_logger, signature_of, test_credential, QUERY};
use anyhow::Result;
use ec2sign_core::time::parse_iso8601;
use ec2sign_core::{Context, ErrorKind, Signer, StaticEnv};
use ec2sign_v4::{Config, EnvCredentialProvider, RequestSigner, StaticCredentialProvider};
use http::header::AUTHORIZATION;
use http::{Method, Request};
use log::debug;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn parts(uri: &str) -> http::request::Parts {
    Request::get(uri)
        .body(())
        .expect("request must be valid")
        .into_parts()
        .0
}

#[tokio::test]
async fn test_signer_with_static_provider() -> Result<()> {
    init_logger();

    let cred = test_credential();
    let builder = RequestSigner::new("ec2", "us-east-1");
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::from(cred.clone()),
        builder.clone(),
    );

    let mut req = parts(&builder.endpoint(QUERY));
    signer.sign(&mut req).await?;
    debug!("signed request: {req:?}");

    // Re-signing at the stamped instant must reproduce the same header.
    let amz_date = req.headers["x-amz-date"].to_str()?;
    let signed_at = parse_iso8601(amz_date)?;
    let expected = builder.sign(&cred, &Method::GET, "/", QUERY, signed_at)?;

    assert_eq!(req.headers[AUTHORIZATION], expected.authorization);
    assert_eq!(req.headers["x-amz-security-token"], "session-token");
    assert_eq!(signature_of(&expected).len(), 64);
    Ok(())
}

#[tokio::test]
async fn test_signer_with_env() -> Result<()> {
    init_logger();

    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([
            ("AWS_REGION".to_string(), "eu-west-1".to_string()),
            ("AWS_ACCESS_KEY_ID".to_string(), "ak".to_string()),
            ("AWS_SECRET_ACCESS_KEY".to_string(), "sk".to_string()),
            ("AWS_SESSION_TOKEN".to_string(), "token".to_string()),
        ]),
    });

    let cfg = Config::default().from_env(&ctx);
    let builder = RequestSigner::from_config(&cfg)?;
    let signer = Signer::new(ctx, EnvCredentialProvider::new(), builder);

    let mut req = parts(&format!("/?{QUERY}"));
    signer.sign(&mut req).await?;

    assert_eq!(
        req.uri.to_string(),
        format!("https://ec2.eu-west-1.amazonaws.com/?{QUERY}")
    );
    assert!(req.headers[AUTHORIZATION]
        .to_str()?
        .starts_with("AWS4-HMAC-SHA256 Credential=ak/"));
    Ok(())
}

#[tokio::test]
async fn test_signer_without_env_credential() -> Result<()> {
    init_logger();

    let signer = Signer::new(
        Context::new().with_env(StaticEnv::default()),
        EnvCredentialProvider::new(),
        RequestSigner::new("ec2", "us-east-1"),
    );

    let mut req = parts(&format!("https://ec2.us-east-1.amazonaws.com/?{QUERY}"));
    let err = signer.sign(&mut req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(req.headers.get(AUTHORIZATION).is_none());
    Ok(())
}

#[tokio::test]
async fn test_signer_rejects_empty_region() -> Result<()> {
    init_logger();

    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::from(test_credential()),
        RequestSigner::new("ec2", ""),
    );

    let mut req = parts(&format!("/?{QUERY}"));
    let err = signer.sign(&mut req).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(req.headers.is_empty());
    assert_eq!(req.uri.to_string(), format!("/?{QUERY}"));
    Ok(())
}

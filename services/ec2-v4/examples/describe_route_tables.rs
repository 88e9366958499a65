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

//! Sign an EC2 `DescribeRouteTables` request without sending it.
//!
//! Credentials come from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
//! `AWS_SESSION_TOKEN`; the region from `AWS_REGION` or `AWS_DEFAULT_REGION`.
//! Falls back to demo values when the environment is empty.

use ec2sign_core::{Context, OsEnv, ProvideCredential, Signer};
use ec2sign_v4::{
    canonical_query_string, Config, EnvCredentialProvider, RequestSigner, StaticCredentialProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let ctx = Context::new().with_env(OsEnv);

    let mut cfg = Config::default().from_env(&ctx);
    cfg.region.get_or_insert_with(|| "us-east-1".to_string());
    let builder = RequestSigner::from_config(&cfg)?;

    let action = ("Action", "DescribeRouteTables");
    let version = ("Version", "2016-11-15");
    let query = canonical_query_string([action, version]);
    let req = http::Request::get(builder.endpoint(&query)).body(())?;
    let (mut parts, _) = req.into_parts();

    let env_provider = EnvCredentialProvider::new();
    if env_provider.provide_credential(&ctx).await?.is_some() {
        println!("Using credentials from environment");
        Signer::new(ctx, env_provider, builder)
            .sign(&mut parts)
            .await?;
    } else {
        println!("No credentials in environment, using demo credentials");
        let demo = StaticCredentialProvider::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "demo-session-token",
        );
        Signer::new(ctx, demo, builder).sign(&mut parts).await?;
    }

    println!("GET {}", parts.uri);
    for (name, value) in &parts.headers {
        if value.is_sensitive() {
            println!("{name}: <redacted>");
        } else {
            println!("{name}: {}", value.to_str()?);
        }
    }

    Ok(())
}

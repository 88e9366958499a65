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

use crate::constants::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN};
use crate::Credential;
use async_trait::async_trait;
use ec2sign_core::{Context, ProvideCredential, Result};
use log::debug;

/// EnvCredentialProvider loads temporary credentials from environment variables.
///
/// This provider looks for the following environment variables, all of them required:
/// - `AWS_ACCESS_KEY_ID`: The access key ID
/// - `AWS_SECRET_ACCESS_KEY`: The secret access key
/// - `AWS_SESSION_TOKEN`: The session token
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let lookup = |key: &str| envs.get(key).filter(|v| !v.is_empty());
        match (
            lookup(AWS_ACCESS_KEY_ID),
            lookup(AWS_SECRET_ACCESS_KEY),
            lookup(AWS_SESSION_TOKEN),
        ) {
            (Some(ak), Some(sk), Some(token)) => Ok(Some(Credential::new(ak, sk, token))),
            _ => {
                debug!("incomplete credential in env, skipped");
                Ok(None)
            }
        }
    }
}

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

use crate::{time, Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use log::debug;
use std::sync::Arc;

/// Signer ties a credential supplier to a request signer.
///
/// Every call loads a fresh credential and samples the clock exactly once. Nothing is
/// cached between calls, so a `Signer` can be shared across threads freely.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            provider: Arc::new(provider),
            builder: Arc::new(builder),
        }
    }

    /// Sign the request, leaving it untouched on error.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        let cred = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| {
                Error::invalid_input("no credential available")
                    .with_context(format!("provider: {:?}", self.provider))
            })?;
        if !cred.is_valid() {
            return Err(Error::invalid_input("credential is incomplete")
                .with_context(format!("credential: {cred:?}")));
        }
        debug!("loaded credential: {cred:?}");

        let now = time::now()?;
        self.builder.sign_request(req, &cred, now)
    }
}

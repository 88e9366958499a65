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

use crate::constants::{
    ALGORITHM, AWS_QUERY_ENCODE_SET, DEFAULT_DOMAIN, SCOPE_TERMINATOR, SECRET_KEY_PREFIX,
    X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
use crate::{Config, Credential};
use ec2sign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use ec2sign_core::time::{format_date, format_iso8601, DateTime};
use ec2sign_core::utils::Redact;
use ec2sign_core::{Error, Result, SignRequest};
use http::header::{self, HeaderMap, HeaderValue};
use http::request::Parts;
use http::{Method, Uri};
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::fmt::{self, Debug, Display, Formatter, Write};

/// RequestSigner implements AWS SigV4 in its header form for GET requests to the EC2
/// query API.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer holds no key material and no clock. Every call takes the credential and the
/// signing instant explicitly, so signing is a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSigner {
    service: String,
    region: String,
    domain: String,
}

impl RequestSigner {
    /// Create a new signer for `service` in `region`.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
            domain: DEFAULT_DOMAIN.into(),
        }
    }

    /// Create a signer from config, failing if no region is configured.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let region = cfg.region.as_deref().ok_or_else(|| {
            Error::invalid_input("region is not configured")
                .with_context("hint: set AWS_REGION or Config::region")
        })?;

        Ok(Self::new(&cfg.service, region).with_domain(&cfg.domain))
    }

    /// Use another provider domain, e.g. `amazonaws.com.cn`.
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = domain.into();
        self
    }

    /// Service name in the credential scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region in the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Endpoint hostname: `<service>.<region>.<domain>`.
    pub fn host(&self) -> String {
        format!("{}.{}.{}", self.service, self.region, self.domain)
    }

    /// URL the signed request must be sent to.
    pub fn endpoint(&self, query: &str) -> String {
        format!("https://{}/?{query}", self.host())
    }

    /// Sign a request and return the headers to send along with it.
    ///
    /// `query` is used verbatim, so it must already be percent-encoded and sorted by
    /// parameter name (see [`canonical_query_string`]).
    pub fn sign(
        &self,
        cred: &Credential,
        method: &Method,
        canonical_uri: &str,
        query: &str,
        now: DateTime,
    ) -> Result<SignatureResult> {
        self.validate(cred, method, canonical_uri, query)?;

        // Both stamps come from the same instant.
        let amz_date = format_iso8601(now);
        let date_stamp = format_date(now);

        let creq = CanonicalRequest::new(
            method.clone(),
            canonical_uri,
            query,
            [
                (X_AMZ_DATE, amz_date.as_str()),
                (header::HOST.as_str(), self.host().as_str()),
            ],
        );
        debug!("calculated canonical request: {creq}");

        let scope = credential_scope(&date_stamp, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20150830T123600Z
        // 20150830/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::with_capacity(128);
            writeln!(f, "{ALGORITHM}")?;
            writeln!(f, "{amz_date}")?;
            writeln!(f, "{scope}")?;
            write!(f, "{}", hex_sha256(creq.to_string().as_bytes()))?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = SigningKey::derive(
            &cred.secret_access_key,
            &date_stamp,
            &self.region,
            &self.service,
        )?;
        let signature = signing_key.sign(&string_to_sign)?;

        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
            cred.access_key_id,
            creq.signed_headers(),
        );

        Ok(SignatureResult {
            authorization,
            x_amz_date: amz_date,
            security_token: cred.session_token.clone(),
        })
    }

    fn validate(
        &self,
        cred: &Credential,
        method: &Method,
        canonical_uri: &str,
        query: &str,
    ) -> Result<()> {
        for (field, value) in [
            ("region", self.region.as_str()),
            ("service", self.service.as_str()),
            ("domain", self.domain.as_str()),
            ("query", query),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_input(format!("{field} must not be empty"))
                    .with_context(format!("field: {field}")));
            }
        }
        cred.validate()?;

        if *method != Method::GET {
            return Err(Error::invalid_input("only GET requests can be signed")
                .with_context(format!("method: {method}")));
        }
        if !canonical_uri.starts_with('/') {
            return Err(Error::invalid_input("canonical uri must start with '/'")
                .with_context(format!("uri: {canonical_uri}")));
        }

        Ok(())
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(&self, req: &mut Parts, cred: &Credential, now: DateTime) -> Result<()> {
        let host = self.host();
        if let Some(authority) = req.uri.authority() {
            if authority.as_str() != host {
                return Err(Error::invalid_input("request authority does not match endpoint")
                    .with_context(format!("authority: {authority}"))
                    .with_context(format!("endpoint: {host}")));
            }
        }

        let result = self.sign(
            cred,
            &req.method,
            req.uri.path(),
            req.uri.query().unwrap_or_default(),
            now,
        )?;

        // Requests built from a bare path get pointed at the endpoint.
        let uri = if req.uri.authority().is_none() {
            let paq = req.uri.path_and_query().map_or("/", |v| v.as_str());
            Some(format!("https://{host}{paq}").parse::<Uri>()?)
        } else {
            None
        };

        result.apply(&mut req.headers)?;
        if let Some(uri) = uri {
            req.uri = uri;
        }
        Ok(())
    }
}

/// Credential scope: `<date>/<region>/<service>/aws4_request`.
pub fn credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{date_stamp}/{region}/{service}/{SCOPE_TERMINATOR}")
}

/// Build a canonical query string from raw parameters.
///
/// Names and values are percent-encoded with the SigV4 unreserved set and sorted by name
/// and then by value.
pub fn canonical_query_string<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut params = params
        .into_iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    params.sort();

    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// CanonicalRequest is the exact byte sequence that gets hashed and signed.
///
/// ```text
/// GET
/// /
/// Action=DescribeRouteTables&Version=2016-11-15
/// host:ec2.us-east-1.amazonaws.com
/// x-amz-date:20150830T123600Z
///
/// host;x-amz-date
/// e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: Method,
    uri: String,
    query: String,
    headers: Vec<(String, String)>,
    payload_hash: String,
}

impl CanonicalRequest {
    /// Build a canonical request for a request without body.
    ///
    /// Header names are lower-cased and sorted by code point, whatever order they come in.
    pub fn new<'a>(
        method: Method,
        uri: &str,
        query: &str,
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect::<Vec<_>>();
        headers.sort();

        Self {
            method,
            uri: uri.to_string(),
            query: query.to_string(),
            headers,
            payload_hash: hex_sha256(b""),
        }
    }

    /// Lower-cased header names joined by `;`.
    pub fn signed_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }

    /// The canonical headers block, one `name:value\n` per header.
    pub fn canonical_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(k, v)| format!("{k}:{v}\n"))
            .collect()
    }

    /// Hex encoded SHA-256 of the (empty) payload.
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.uri)?;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "{}", self.canonical_headers())?;
        writeln!(f, "{}", self.signed_headers())?;
        write!(f, "{}", self.payload_hash)
    }
}

/// SigningKey is the key derived from the secret key and the credential scope.
///
/// It lives only for the duration of one signing call. It is never logged and its bytes
/// are not exposed outside this crate.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Derive the signing key by chaining HMAC-SHA256 over the scope segments.
    ///
    /// The chain starts from `AWS4<secret>`; each stage's raw output keys the next one.
    pub fn derive(secret: &str, date_stamp: &str, region: &str, service: &str) -> Result<Self> {
        let segments = [date_stamp, region, service, SCOPE_TERMINATOR];

        let mut key = format!("{SECRET_KEY_PREFIX}{secret}").into_bytes();
        for segment in segments {
            key = hmac_sha256(&key, segment.as_bytes())?;
        }

        Ok(Self(key))
    }

    /// Hex encoded HMAC-SHA256 of `string_to_sign`.
    pub fn sign(&self, string_to_sign: &str) -> Result<String> {
        hex_hmac_sha256(&self.0, string_to_sign.as_bytes())
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

/// SignatureResult carries the three headers that authenticate a request.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureResult {
    /// Value of the `Authorization` header.
    pub authorization: String,
    /// Value of the `x-amz-date` header.
    pub x_amz_date: String,
    /// Value of the `X-Amz-Security-Token` header.
    pub security_token: String,
}

impl SignatureResult {
    /// Insert the signature headers into `headers`.
    ///
    /// Nothing is inserted unless every value is a valid header value.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        let date = HeaderValue::from_str(&self.x_amz_date)?;
        let mut authorization = HeaderValue::from_str(&self.authorization)?;
        authorization.set_sensitive(true);
        // Set token value sensitive to avoid leaking.
        let mut token = HeaderValue::from_str(&self.security_token)?;
        token.set_sensitive(true);

        headers.insert(X_AMZ_DATE, date);
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(X_AMZ_SECURITY_TOKEN, token);
        Ok(())
    }
}

impl Debug for SignatureResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureResult")
            .field("authorization", &self.authorization)
            .field("x_amz_date", &self.x_amz_date)
            .field("security_token", &Redact::from(&self.security_token))
            .finish()
    }
}

/// Sign a GET request to `<service>.<region>.amazonaws.com`.
///
/// Shorthand for [`RequestSigner::new`] followed by [`RequestSigner::sign`].
pub fn sign(
    cred: &Credential,
    region: &str,
    service: &str,
    method: &Method,
    canonical_uri: &str,
    query: &str,
    now: DateTime,
) -> Result<SignatureResult> {
    RequestSigner::new(service, region).sign(cred, method, canonical_uri, query, now)
}

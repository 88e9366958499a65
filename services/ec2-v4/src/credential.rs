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

use ec2sign_core::utils::Redact;
use ec2sign_core::{Error, Result, SigningCredential};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Credential that holds the access key, secret key and session token.
///
/// All three are required: the signer only deals with temporary credentials.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key, only ever used to derive the signing key.
    pub secret_access_key: String,
    /// Session token, sent back verbatim in `x-amz-security-token`.
    pub session_token: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
        }
    }

    /// Check every field is present, naming the first one that is not.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
            ("session_token", &self.session_token),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_input(format!("{field} must not be empty"))
                    .with_context(format!("field: {field}")));
            }
        }
        Ok(())
    }

    /// Parse the security credentials document served by the instance metadata service
    /// under `iam/security-credentials/<role>`.
    ///
    /// Fetching the document is up to the caller.
    pub fn from_metadata_document(content: &str) -> Result<Self> {
        let doc: SecurityCredentialsDocument = serde_json::from_str(content).map_err(|e| {
            Error::invalid_input("failed to parse security credentials document")
                .with_source(e)
                .with_context(format!("content_length: {}", content.len()))
        })?;

        if let Some(code) = doc.code.filter(|code| code != "Success") {
            return Err(Error::invalid_input(format!(
                "security credentials document reports [{code}] {}",
                doc.message
            ))
            .with_context(format!("code: {code}")));
        }

        let cred = Credential::new(doc.access_key_id, doc.secret_access_key, doc.token);
        cred.validate()?;
        Ok(cred)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SecurityCredentialsDocument {
    code: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    access_key_id: String,
    #[serde(default)]
    secret_access_key: String,
    #[serde(default)]
    token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec2sign_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_debug_is_redacted() {
        let cred = Credential::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "session-token-value",
        );
        let output = format!("{cred:?}");

        assert!(!output.contains(&cred.secret_access_key));
        assert!(!output.contains("session-token-value"));
        assert!(output.contains("wJa***KEY"));
    }

    #[test_case("", "secret", "token", "access_key_id" ; "missing access key")]
    #[test_case("ak", "", "token", "secret_access_key" ; "missing secret key")]
    #[test_case("ak", "secret", "", "session_token" ; "missing session token")]
    fn test_validate_rejects_empty_field(ak: &str, sk: &str, token: &str, field: &str) {
        let cred = Credential::new(ak, sk, token);
        let err = cred.validate().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.context().to_vec(), vec![format!("field: {field}")]);
        assert!(!cred.is_valid());
    }

    #[test]
    fn test_validate() {
        assert!(Credential::new("ak", "sk", "token").is_valid());
    }

    #[test]
    fn test_from_metadata_document() -> Result<()> {
        let content = r#"{
            "Code" : "Success",
            "LastUpdated" : "2017-05-17T15:09:54Z",
            "Type" : "AWS-HMAC",
            "AccessKeyId" : "ASIAEXAMPLE",
            "SecretAccessKey" : "secret/example+key",
            "Token" : "token==",
            "Expiration" : "2017-05-17T21:09:54Z"
        }"#;

        let cred = Credential::from_metadata_document(content)?;
        assert_eq!(
            cred,
            Credential::new("ASIAEXAMPLE", "secret/example+key", "token==")
        );
        Ok(())
    }

    #[test]
    fn test_from_metadata_document_without_code() -> Result<()> {
        let content = r#"{"AccessKeyId": "ak", "SecretAccessKey": "sk", "Token": "t"}"#;
        assert_eq!(
            Credential::from_metadata_document(content)?,
            Credential::new("ak", "sk", "t")
        );
        Ok(())
    }

    #[test_case("not json" ; "malformed")]
    #[test_case(r#"{"Code": "AssumeRoleUnauthorizedAccess", "Message": "denied"}"# ; "error code")]
    #[test_case(r#"{"Code": "Success", "AccessKeyId": "ak", "SecretAccessKey": "sk"}"# ; "missing token")]
    fn test_from_metadata_document_rejects(content: &str) {
        let err = Credential::from_metadata_document(content).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}

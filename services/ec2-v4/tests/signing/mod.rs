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

mod aws_sigv4;
mod concurrency;
mod signer;

use ec2sign_core::time::{parse_iso8601, DateTime};
use ec2sign_v4::{Credential, SignatureResult};

pub const QUERY: &str = "Action=DescribeRouteTables&Version=2016-11-15";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_credential() -> Credential {
    Credential::new(
        "AKIDEXAMPLE",
        "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
        "session-token",
    )
}

pub fn test_time() -> DateTime {
    parse_iso8601("20150830T123600Z").expect("time must be valid")
}

/// Extract the hex signature from an authorization header value.
pub fn signature_of(result: &SignatureResult) -> &str {
    result
        .authorization
        .rsplit_once("Signature=")
        .map(|(_, sig)| sig)
        .expect("authorization must carry a signature")
}

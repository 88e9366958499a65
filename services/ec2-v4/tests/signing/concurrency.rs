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

use super::{test_credential, test_time, QUERY};
use ec2sign_core::Signer;
use ec2sign_v4::{Credential, RequestSigner, SignatureResult};
use http::Method;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_types_are_thread_safe() {
    assert_send_sync::<RequestSigner>();
    assert_send_sync::<Credential>();
    assert_send_sync::<SignatureResult>();
    assert_send_sync::<Signer<Credential>>();
}

#[test]
fn test_concurrent_signing_is_identical() {
    let signer = RequestSigner::new("ec2", "us-east-1");
    let cred = test_credential();
    let expected = signer
        .sign(&cred, &Method::GET, "/", QUERY, test_time())
        .expect("sign must succeed");

    let results = thread::scope(|s| {
        let handles = (0..8)
            .map(|_| {
                s.spawn(|| {
                    (0..64)
                        .map(|_| {
                            signer
                                .sign(&cred, &Method::GET, "/", QUERY, test_time())
                                .expect("sign must succeed")
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread must not panic"))
            .collect::<Vec<_>>()
    });

    assert_eq!(results.len(), 8 * 64);
    assert!(results.iter().all(|r| *r == expected));
}

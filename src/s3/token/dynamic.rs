// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::s3::creds::{Credentials, Provider};
use crate::s3::token::S3DelegationTokenReceiver;
use std::sync::Arc;

/// Credential provider backed by the session credentials a
/// [`S3DelegationTokenReceiver`] received last.
///
/// Returns `None` until the first token with credentials arrives, so a
/// provider chain moves on to its next provider.
#[derive(Debug, Clone)]
pub struct DynamicTemporaryCredentialsProvider {
    receiver: Arc<S3DelegationTokenReceiver>,
}

impl DynamicTemporaryCredentialsProvider {
    pub fn new(receiver: Arc<S3DelegationTokenReceiver>) -> Self {
        Self { receiver }
    }
}

impl Default for DynamicTemporaryCredentialsProvider {
    fn default() -> Self {
        Self::new(S3DelegationTokenReceiver::global())
    }
}

impl Provider for DynamicTemporaryCredentialsProvider {
    fn fetch(&self) -> Option<Credentials> {
        let credentials = self.receiver.credentials();
        if credentials.is_none() {
            log::debug!("No session credentials received yet");
        }
        credentials.map(|c| Credentials::from(c.as_ref()))
    }
}

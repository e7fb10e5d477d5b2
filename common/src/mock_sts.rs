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

use chrono::{Duration, Utc};
use s3_delegation::s3::error::Error;
use s3_delegation::s3::sts::{SecurityTokenService, SessionCredentials};
use std::sync::Mutex;

/// Security token service returning fixed session credentials and recording
/// every request.
#[derive(Debug)]
pub struct MockSecurityTokenService {
    credentials: SessionCredentials,
    requests: Mutex<Vec<StsRequest>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StsRequest {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

impl Default for MockSecurityTokenService {
    fn default() -> Self {
        Self::new(
            "ASIAMOCKACCESSKEY",
            "mock-secret-access-key",
            "mock-session-token",
        )
    }
}

impl MockSecurityTokenService {
    /// Returns the given credentials, valid for one hour from now.
    pub fn new(access_key_id: &str, secret_access_key: &str, session_token: &str) -> Self {
        let expiration = Utc::now() + Duration::hours(1);
        Self {
            credentials: SessionCredentials {
                access_key_id: access_key_id.to_string(),
                secret_access_key: secret_access_key.to_string(),
                session_token: session_token.to_string(),
                expiration: expiration.timestamp_millis(),
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn credentials(&self) -> &SessionCredentials {
        &self.credentials
    }

    pub fn requests(&self) -> Vec<StsRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SecurityTokenService for MockSecurityTokenService {
    fn get_session_token(
        &self,
        access_key: &str,
        secret_key: &str,
        region: &str,
    ) -> Result<SessionCredentials, Error> {
        self.requests.lock().unwrap().push(StsRequest {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            region: region.to_string(),
        });
        Ok(self.credentials.clone())
    }
}

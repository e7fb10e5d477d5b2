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

//! Credential providers

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
/// Credentials contain access key, secret key and session token optionally
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Provider trait to fetch credentials
///
/// `None` means the provider has no credentials to offer right now; a
/// [`ProviderChain`](crate::s3::chain::ProviderChain) then asks the next one.
pub trait Provider: Send + Sync + fmt::Debug {
    fn fetch(&self) -> Option<Credentials>;
}

#[derive(Clone, Debug)]
/// Static credential provider
pub struct StaticProvider {
    creds: Credentials,
}

impl StaticProvider {
    /// Returns a static provider with given access key, secret key and optional session token
    ///
    /// # Examples
    ///
    /// ```
    /// use s3_delegation::s3::creds::StaticProvider;
    /// let provider = StaticProvider::new("minioadmin", "minio123", None);
    /// ```
    pub fn new(access_key: &str, secret_key: &str, session_token: Option<&str>) -> StaticProvider {
        StaticProvider {
            creds: Credentials {
                access_key: access_key.to_string(),
                secret_key: secret_key.to_string(),
                session_token: session_token.map(|v| v.to_string()),
            },
        }
    }
}

impl Provider for StaticProvider {
    fn fetch(&self) -> Option<Credentials> {
        Some(self.creds.clone())
    }
}

pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

#[derive(Clone, Debug, Default)]
/// Credential provider reading `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
/// and the optional `AWS_SESSION_TOKEN` on every fetch
pub struct EnvironmentProvider;

impl EnvironmentProvider {
    fn read(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

impl Provider for EnvironmentProvider {
    fn fetch(&self) -> Option<Credentials> {
        Some(Credentials {
            access_key: Self::read(AWS_ACCESS_KEY_ID)?,
            secret_key: Self::read(AWS_SECRET_ACCESS_KEY)?,
            session_token: Self::read(AWS_SESSION_TOKEN),
        })
    }
}

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

//! Delegation tokens: value types, provider, receiver and dispatch
//!
//! Servers hold long-term secrets and mint tokens with a
//! [`S3DelegationTokenProvider`]. Tokens are distributed to clients, where a
//! [`SecurityTokenReceiver`] caches them and exposes the embedded credentials
//! through [`DynamicTemporaryCredentialsProvider`].

pub mod credentials;
mod dynamic;
pub mod provider;
pub mod receiver;
pub mod registry;

pub use credentials::Credentials;
pub use dynamic::DynamicTemporaryCredentialsProvider;
pub use provider::{S3DelegationTokenProvider, TokenType};
pub use receiver::S3DelegationTokenReceiver;
pub use registry::TokenReceiverRegistry;

use crate::s3::error::Error;
use bytes::Bytes;
use std::collections::BTreeMap;

/// A token obtained from a file system, ready to be distributed to clients.
///
/// The token bytes are either empty, meaning the token only carries
/// informational configuration in `additional_infos`, or a JSON encoded
/// [`Credentials`]. An empty token never has an expiry and a non-empty one
/// always has.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObtainedSecurityToken {
    scheme: String,
    token: Bytes,
    valid_until: Option<i64>,
    additional_infos: BTreeMap<String, String>,
}

impl ObtainedSecurityToken {
    /// Token carrying no credentials, only informational configuration.
    pub fn empty(scheme: impl Into<String>, additional_infos: BTreeMap<String, String>) -> Self {
        ObtainedSecurityToken {
            scheme: scheme.into(),
            token: Bytes::new(),
            valid_until: None,
            additional_infos,
        }
    }

    /// Token carrying encoded credentials that expire at `valid_until`
    /// (epoch milliseconds).
    ///
    /// Encoded credentials are never empty, so the empty/expiry invariant
    /// holds for every token built here.
    pub fn with_credentials(
        scheme: impl Into<String>,
        credentials: &Credentials,
        valid_until: i64,
        additional_infos: BTreeMap<String, String>,
    ) -> Result<Self, Error> {
        Ok(ObtainedSecurityToken {
            scheme: scheme.into(),
            token: Bytes::from(credentials.to_json()?),
            valid_until: Some(valid_until),
            additional_infos,
        })
    }

    /// Rebuilds a token from its parts, e.g. after receiving it over the wire.
    pub fn from_parts(
        scheme: impl Into<String>,
        token: Bytes,
        valid_until: Option<i64>,
        additional_infos: BTreeMap<String, String>,
    ) -> Result<Self, Error> {
        if token.is_empty() != valid_until.is_none() {
            return Err(Error::InvalidToken(
                "a token carries an expiry if and only if it carries credentials".to_string(),
            ));
        }
        Ok(ObtainedSecurityToken {
            scheme: scheme.into(),
            token,
            valid_until,
            additional_infos,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn token(&self) -> &Bytes {
        &self.token
    }

    /// Expiry in epoch milliseconds; `None` for empty tokens.
    pub fn valid_until(&self) -> Option<i64> {
        self.valid_until
    }

    pub fn additional_infos(&self) -> &BTreeMap<String, String> {
        &self.additional_infos
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

/// Sink for tokens distributed to this process.
pub trait SecurityTokenReceiver: Send + Sync + std::fmt::Debug {
    /// Scheme of the file systems whose tokens this receiver accepts.
    fn scheme(&self) -> &str;

    /// Called whenever a new token for [`scheme`](Self::scheme) is available.
    fn on_new_tokens_obtained(&self, token: &ObtainedSecurityToken) -> Result<(), Error>;
}

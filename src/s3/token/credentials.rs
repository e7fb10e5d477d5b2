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

//! Session credentials carried inside delegation tokens and their JSON codec

use crate::s3::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

const CODEC_VERSION: u32 = 1;

/// Short-lived session credentials obtained from the security token service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "access_key_id")]
    access_key_id: String,
    #[serde(rename = "access_key_secret")]
    secret_access_key: String,
    #[serde(rename = "security_token")]
    session_token: String,
}

#[derive(Serialize, Deserialize)]
struct Envelope<C> {
    version: u32,
    #[serde(flatten)]
    credentials: C,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Credentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    /// Encodes the credentials as a versioned JSON document.
    pub fn to_json(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(&Envelope {
            version: CODEC_VERSION,
            credentials: self,
        })?)
    }

    /// Decodes credentials produced by [`to_json`](Self::to_json).
    pub fn from_json(bytes: &[u8]) -> Result<Credentials, Error> {
        let envelope: Envelope<Credentials> = serde_json::from_slice(bytes)?;
        if envelope.version != CODEC_VERSION {
            return Err(Error::InvalidToken(format!(
                "unsupported credentials version {}, expected {CODEC_VERSION}",
                envelope.version
            )));
        }
        Ok(envelope.credentials)
    }
}

impl From<&Credentials> for crate::s3::creds::Credentials {
    fn from(c: &Credentials) -> Self {
        crate::s3::creds::Credentials {
            access_key: c.access_key_id.clone(),
            secret_key: c.secret_access_key.clone(),
            session_token: Some(c.session_token.clone()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("session_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Credentials {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Credentials::new(
            String::arbitrary(g),
            String::arbitrary(g),
            String::arbitrary(g),
        )
    }
}

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

//! Configuration snapshots and the keys recognized by token delegation
//!
//! Two kinds of configuration flow through this crate: the user-facing
//! configuration handed to [`S3FileSystemPlugin`](crate::s3::plugin::S3FileSystemPlugin),
//! and the store configuration derived from it, whose keys all live under
//! [`STORE_CONFIG_PREFIX`]. Both are represented by [`Configuration`].

use crate::s3::error::Error;
use std::collections::BTreeMap;
use std::fmt;

/// Prefix of every key in a store configuration.
pub const STORE_CONFIG_PREFIX: &str = "fs.s3a.";

/// Long-term access key.
pub const ACCESS_KEY: &str = "fs.s3a.access.key";
/// Long-term secret key.
pub const SECRET_KEY: &str = "fs.s3a.secret.key";
pub const REGION: &str = "fs.s3a.region";
pub const ENDPOINT: &str = "fs.s3a.endpoint";
pub const PATH_STYLE_ACCESS: &str = "fs.s3a.path.style.access";
/// Comma separated credential provider chain.
pub const CREDENTIALS_PROVIDER: &str = "fs.s3a.aws.credentials.provider";

/// User-facing flag enabling token delegation on the server side.
pub const ENABLE_TOKEN_DELEGATION: &str = "fs.s3.enable-token-delegation";
pub const DEFAULT_ENABLE_TOKEN_DELEGATION: bool = true;

/// Prefix of every option a client passes in.
pub const CLIENT_PREFIX: &str = "client.fs.";

/// Default file system URI, used to complete URIs lacking an authority.
pub const DEFAULT_FS: &str = "fs.defaultFS";

/// String key/value configuration snapshot, ordered by key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    entries: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parses a boolean value; accepts `true` and `false` in any case.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, Error> {
        match self.get(key) {
            None => Ok(None),
            Some(v) if v.trim().eq_ignore_ascii_case("true") => Ok(Some(true)),
            Some(v) if v.trim().eq_ignore_ascii_case("false") => Ok(Some(false)),
            Some(v) => Err(Error::InvalidBoolean {
                key: key.to_string(),
                value: v.to_string(),
            }),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Configuration {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            if is_secret(k) {
                map.entry(&k, &"[REDACTED]");
            } else {
                map.entry(&k, &v);
            }
        }
        map.finish()
    }
}

fn is_secret(key: &str) -> bool {
    key.ends_with("secret.key") || key.ends_with("secret-key")
}

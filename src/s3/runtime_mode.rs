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

//! Deciding whether a file system is created by a client or a server

use crate::s3::config::{CLIENT_PREFIX, Configuration};
use crate::s3::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeMode {
    Client,
    Server,
}

/// Classifies the process creating a file system from its configuration.
///
/// A client passes every option with the [`CLIENT_PREFIX`], or no option at
/// all when the server delegates tokens. A server always has at least one
/// option: long-term credentials when delegating, a credential provider
/// otherwise. Mixing prefixed and plain keys is rejected.
pub fn resolve_runtime_mode(conf: &Configuration) -> Result<RuntimeMode, Error> {
    let prefixed = conf.keys().filter(|k| k.starts_with(CLIENT_PREFIX)).count();

    if prefixed == conf.len() {
        log::debug!("File system is initialized by a client with configuration {conf:?}");
        Ok(RuntimeMode::Client)
    } else if prefixed == 0 {
        log::debug!("File system is initialized by a server with configuration {conf:?}");
        Ok(RuntimeMode::Server)
    } else {
        log::error!("Detected invalid configuration: {conf:?}");
        Err(Error::InvalidConfiguration(format!(
            "{prefixed} of {} options carry the client prefix {CLIENT_PREFIX}",
            conf.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::config::ENABLE_TOKEN_DELEGATION;

    fn conf(entries: &[(&str, &str)]) -> Configuration {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_empty_configuration_is_client() {
        // Token delegation is active on the server side.
        assert_eq!(
            resolve_runtime_mode(&Configuration::new()).unwrap(),
            RuntimeMode::Client
        );
    }

    #[test]
    fn test_client_prefixed_configuration_is_client() {
        // S3-compatible store with token delegation disabled on the server.
        let c = conf(&[
            ("client.fs.s3.access-key", "minioadmin"),
            ("client.fs.s3.secret-key", "12345678"),
            (
                "client.fs.s3.aws.credentials.provider",
                "SimpleCredentialsProvider",
            ),
        ]);
        assert_eq!(resolve_runtime_mode(&c).unwrap(), RuntimeMode::Client);
    }

    #[test]
    fn test_plain_configuration_is_server() {
        let c = conf(&[
            (ENABLE_TOKEN_DELEGATION, "true"),
            ("s3.access-key", "minioadmin"),
            ("s3.secret-key", "12345678"),
            ("s3.endpoint", "s3://data/"),
            ("s3.region", "us-east-1"),
        ]);
        assert_eq!(resolve_runtime_mode(&c).unwrap(), RuntimeMode::Server);

        let c = conf(&[
            ("s3.access-key", "minioadmin"),
            ("s3.secret-key", "12345678"),
            ("s3.endpoint", "http://minio:9000"),
            ("s3.path-style-access", "true"),
            ("s3.aws.credentials.provider", "SimpleCredentialsProvider"),
        ]);
        assert_eq!(resolve_runtime_mode(&c).unwrap(), RuntimeMode::Server);
    }

    #[test]
    fn test_mixed_configuration_is_invalid() {
        let c = conf(&[
            ("s3.access-key", "minioadmin"),
            ("client.fs.s3.secret-key", "12345678"),
        ]);
        assert!(matches!(
            resolve_runtime_mode(&c),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_prefix_must_lead_the_key() {
        let c = conf(&[("s3.client.fs.access-key", "minioadmin")]);
        assert_eq!(resolve_runtime_mode(&c).unwrap(), RuntimeMode::Server);
    }
}

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

//! File system handle produced by [`S3FileSystemPlugin`](crate::s3::plugin::S3FileSystemPlugin)

use crate::s3::chain::ProviderChain;
use crate::s3::config::Configuration;
use crate::s3::creds::{Credentials, Provider};
use crate::s3::error::Error;
use crate::s3::token::{ObtainedSecurityToken, S3DelegationTokenProvider, TokenType};
use once_cell::sync::OnceCell;
use std::fmt;
use url::Url;

pub(crate) type TokenProviderFactory =
    Box<dyn Fn() -> Result<S3DelegationTokenProvider, Error> + Send + Sync>;

/// An S3 file system with its resolved store configuration, credential chain
/// and a lazily built delegation token provider.
pub struct S3FileSystem {
    uri: Url,
    store_conf: Configuration,
    credentials: ProviderChain,
    token_provider_factory: TokenProviderFactory,
    token_provider: OnceCell<S3DelegationTokenProvider>,
}

impl S3FileSystem {
    pub(crate) fn new(
        uri: Url,
        store_conf: Configuration,
        credentials: ProviderChain,
        token_provider_factory: TokenProviderFactory,
    ) -> Self {
        S3FileSystem {
            uri,
            store_conf,
            credentials,
            token_provider_factory,
            token_provider: OnceCell::new(),
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn store_configuration(&self) -> &Configuration {
        &self.store_conf
    }

    /// Credentials for signing the next request, from the first provider of
    /// the chain that has any.
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials.fetch()
    }

    pub fn credential_providers(&self) -> Vec<&str> {
        self.credentials.names()
    }

    /// Token provider of this file system, built on first use.
    ///
    /// Concurrent first calls build it once; a failed build is not cached.
    pub fn token_provider(&self) -> Result<&S3DelegationTokenProvider, Error> {
        self.token_provider
            .get_or_try_init(|| (self.token_provider_factory)())
    }

    pub fn token_type(&self) -> Result<TokenType, Error> {
        Ok(self.token_provider()?.token_type())
    }

    pub fn obtain_security_token(&self) -> Result<ObtainedSecurityToken, Error> {
        self.token_provider()?.obtain_security_token()
    }
}

impl fmt::Debug for S3FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3FileSystem")
            .field("uri", &self.uri.as_str())
            .field("store_conf", &self.store_conf)
            .field("credentials", &self.credentials)
            .field("token_provider", &self.token_provider.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn file_system(factory: TokenProviderFactory) -> S3FileSystem {
        S3FileSystem::new(
            Url::parse("s3://bucket/path").unwrap(),
            Configuration::new(),
            ProviderChain::new(),
            factory,
        )
    }

    #[test]
    fn test_token_provider_built_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let fs = {
            let builds = Arc::clone(&builds);
            Arc::new(file_system(Box::new(move || {
                builds.fetch_add(1, Ordering::SeqCst);
                S3DelegationTokenProvider::new("s3", &Configuration::new(), TokenType::NoToken)
            })))
        };

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let fs = Arc::clone(&fs);
                thread::spawn(move || {
                    let provider: *const S3DelegationTokenProvider = fs.token_provider().unwrap();
                    provider as usize
                })
            })
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert!(fs.obtain_security_token().unwrap().is_empty());
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_build_is_retried() {
        let builds = Arc::new(AtomicUsize::new(0));
        let fs = {
            let builds = Arc::clone(&builds);
            file_system(Box::new(move || {
                if builds.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(Error::RegionNotSet)
                } else {
                    S3DelegationTokenProvider::new("s3", &Configuration::new(), TokenType::NoToken)
                }
            }))
        };

        assert!(matches!(fs.token_type(), Err(Error::RegionNotSet)));
        assert_eq!(fs.token_type().unwrap(), TokenType::NoToken);
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }
}

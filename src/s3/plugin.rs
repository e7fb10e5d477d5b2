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

//! Construction of [`S3FileSystem`]s from user configuration
//!
//! The plugin translates the user configuration into a store configuration,
//! decides whether it runs in a client or a server and seeds the credential
//! provider chain accordingly:
//!
//! - a client always consults the [`DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER`]
//!   first and takes region and endpoint from the last received token;
//! - a server delegating tokens authenticates with its long-term keys through
//!   the [`SIMPLE_CREDENTIALS_PROVIDER`] and mints STS session tokens; a
//!   server not delegating hands out tokens without credentials.

use crate::s3::chain::{
    DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER, ProviderChain, SIMPLE_CREDENTIALS_PROVIDER,
    update_credential_providers,
};
use crate::s3::config::{
    CLIENT_PREFIX, CREDENTIALS_PROVIDER, Configuration, DEFAULT_ENABLE_TOKEN_DELEGATION,
    DEFAULT_FS, ENABLE_TOKEN_DELEGATION, STORE_CONFIG_PREFIX,
};
use crate::s3::error::Error;
use crate::s3::filesystem::{S3FileSystem, TokenProviderFactory};
use crate::s3::runtime_mode::{RuntimeMode, resolve_runtime_mode};
use crate::s3::sts::{SecurityTokenService, StsClient};
use crate::s3::token::{S3DelegationTokenProvider, S3DelegationTokenReceiver, TokenType};
use std::sync::Arc;
use url::Url;

/// User configuration prefixes mapped onto [`STORE_CONFIG_PREFIX`].
const CONFIG_PREFIXES: [&str; 3] = ["s3.", "s3a.", "fs.s3a."];

/// Keys copied onto their canonical spelling.
const MIRRORED_CONFIG_KEYS: [(&str, &str); 3] = [
    ("fs.s3a.access-key", "fs.s3a.access.key"),
    ("fs.s3a.secret-key", "fs.s3a.secret.key"),
    ("fs.s3a.path-style-access", "fs.s3a.path.style.access"),
];

/// The only options a client may set; anything else could break the file
/// system and is dropped.
const CLIENT_ALLOWED_OPTIONS: [&str; 5] = [
    "access-key",
    "access.key",
    "secret-key",
    "secret.key",
    "aws.credentials.provider",
];

const SUPPORTED_SCHEMES: [&str; 2] = ["s3", "s3a"];

#[derive(Clone, Debug)]
pub struct S3FileSystemPlugin {
    scheme: String,
    receiver: Arc<S3DelegationTokenReceiver>,
    sts: Arc<dyn SecurityTokenService>,
}

impl Default for S3FileSystemPlugin {
    fn default() -> Self {
        S3FileSystemPlugin {
            scheme: "s3".to_string(),
            receiver: S3DelegationTokenReceiver::global(),
            sts: Arc::new(StsClient::new()),
        }
    }
}

impl S3FileSystemPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Uses `receiver` instead of the process-wide one.
    pub fn with_receiver(mut self, receiver: Arc<S3DelegationTokenReceiver>) -> Self {
        self.receiver = receiver;
        self
    }

    pub fn with_security_token_service(mut self, sts: Arc<dyn SecurityTokenService>) -> Self {
        self.sts = sts;
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn create(&self, uri: &str, conf: &Configuration) -> Result<S3FileSystem, Error> {
        let mut store_conf = self.store_configuration(conf);

        let mode = resolve_runtime_mode(conf)?;
        let use_token_delegation = match mode {
            RuntimeMode::Client => {
                // Whether the server delegates tokens is unknown here, so the
                // dynamic provider always goes first and falls through when
                // no credentials were received.
                self.set_credential_providers(
                    &mut store_conf,
                    &[DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER],
                )?;
                self.receiver.update_additional_infos(&mut store_conf)?;
                false
            }
            RuntimeMode::Server => {
                let enabled = conf
                    .get_bool(ENABLE_TOKEN_DELEGATION)?
                    .unwrap_or(DEFAULT_ENABLE_TOKEN_DELEGATION);
                if enabled {
                    // The long-term keys used to obtain session tokens also
                    // authenticate the server itself.
                    self.set_credential_providers(
                        &mut store_conf,
                        &[SIMPLE_CREDENTIALS_PROVIDER],
                    )?;
                }
                enabled
            }
        };

        log::info!("Store configuration: {store_conf:?}");

        let uri = init_uri(uri, conf)?;
        let credentials = ProviderChain::from_configuration(&store_conf, Arc::clone(&self.receiver))?;
        let factory = self.token_provider_factory(mode, use_token_delegation, &store_conf);

        Ok(S3FileSystem::new(uri, store_conf, credentials, factory))
    }

    /// Translates the user configuration into a store configuration.
    ///
    /// Keys under any of the `s3.`, `s3a.` and `fs.s3a.` prefixes are moved
    /// under `fs.s3a.`. Client options additionally carry
    /// [`CLIENT_PREFIX`]; only the allowed ones are kept.
    pub fn store_configuration(&self, conf: &Configuration) -> Configuration {
        let mut store_conf = Configuration::new();
        store_conf.set(CREDENTIALS_PROVIDER, "");

        for (key, value) in conf.iter() {
            for prefix in CONFIG_PREFIXES {
                if let Some(rest) = key.strip_prefix(prefix) {
                    let store_key = format!("{STORE_CONFIG_PREFIX}{rest}");
                    log::debug!("Adding config entry for {key} as {store_key} to store config");
                    store_conf.set(store_key, value);
                }

                let client_option = key
                    .strip_prefix(CLIENT_PREFIX)
                    .and_then(|k| k.strip_prefix(prefix));
                if let Some(option) = client_option {
                    if CLIENT_ALLOWED_OPTIONS.contains(&option) {
                        let store_key = format!("{STORE_CONFIG_PREFIX}{option}");
                        log::debug!(
                            "Adding config entry for allowed client option {key} as {store_key} to store config"
                        );
                        store_conf.set(store_key, value);
                    } else {
                        log::warn!("Client passed non-allowed config option {option}. Ignoring it");
                    }
                }
            }
        }

        for (from, to) in MIRRORED_CONFIG_KEYS {
            if let Some(value) = store_conf.get(from).map(String::from) {
                store_conf.set(to, value);
            }
        }
        store_conf
    }

    fn set_credential_providers(
        &self,
        store_conf: &mut Configuration,
        providers: &[&str],
    ) -> Result<(), Error> {
        if !SUPPORTED_SCHEMES.contains(&self.scheme.as_str()) {
            return Err(Error::UnsupportedScheme(self.scheme.clone()));
        }
        update_credential_providers(store_conf, providers);
        Ok(())
    }

    fn token_provider_factory(
        &self,
        mode: RuntimeMode,
        use_token_delegation: bool,
        store_conf: &Configuration,
    ) -> TokenProviderFactory {
        match mode {
            RuntimeMode::Client => Box::new(|| Err(Error::TokenProviderOnClient)),
            RuntimeMode::Server => {
                let scheme = self.scheme.clone();
                let store_conf = store_conf.clone();
                let sts = Arc::clone(&self.sts);
                let token_type = if use_token_delegation {
                    TokenType::StsSessionToken
                } else {
                    TokenType::NoToken
                };
                Box::new(move || {
                    S3DelegationTokenProvider::with_security_token_service(
                        &scheme,
                        &store_conf,
                        token_type,
                        Arc::clone(&sts),
                    )
                })
            }
        }
    }
}

/// Resolves the URI a file system is created for.
///
/// A bare path is replaced by [`DEFAULT_FS`]. A URI without authority is
/// completed from [`DEFAULT_FS`] when both share the scheme.
fn init_uri(uri: &str, conf: &Configuration) -> Result<Url, Error> {
    let default_fs = conf.get(DEFAULT_FS);
    let uri = match (Url::parse(uri), default_fs) {
        (Ok(uri), _) => uri,
        (Err(url::ParseError::RelativeUrlWithoutBase), Some(default_fs)) => {
            log::debug!("Using {default_fs} for {uri} without scheme");
            return Ok(Url::parse(default_fs)?);
        }
        (Err(e), _) => return Err(e.into()),
    };

    if has_authority(&uri) {
        return Ok(uri);
    }
    let Some(default_fs) = default_fs else {
        return Ok(uri);
    };

    let default_uri = Url::parse(default_fs)?;
    if default_uri.scheme() == uri.scheme() && has_authority(&default_uri) {
        Ok(default_uri)
    } else {
        Ok(uri)
    }
}

fn has_authority(uri: &Url) -> bool {
    uri.host_str().is_some_and(|host| !host.is_empty())
}

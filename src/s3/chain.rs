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

//! Credential provider chains
//!
//! A chain is stored in the store configuration under
//! [`CREDENTIALS_PROVIDER`] as a comma separated list of provider
//! identifiers. [`update_credential_providers`] seeds identifiers into that
//! value and [`ProviderChain::from_configuration`] turns it into providers.

use crate::s3::config::{ACCESS_KEY, CREDENTIALS_PROVIDER, Configuration, SECRET_KEY};
use crate::s3::creds::{Credentials, EnvironmentProvider, Provider, StaticProvider};
use crate::s3::error::Error;
use crate::s3::token::{DynamicTemporaryCredentialsProvider, S3DelegationTokenReceiver};
use std::sync::Arc;

/// Static access and secret key from the store configuration.
pub const SIMPLE_CREDENTIALS_PROVIDER: &str = "SimpleCredentialsProvider";
/// Credentials from the `AWS_*` environment variables.
pub const ENVIRONMENT_CREDENTIALS_PROVIDER: &str = "EnvironmentCredentialsProvider";
/// Session credentials received through token delegation.
pub const DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER: &str = "DynamicTemporaryCredentialsProvider";

const SEPARATOR: char = ',';

fn identifiers(chain: &str) -> impl Iterator<Item = &str> {
    chain
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Prepends `providers` to the chain in `conf`, keeping their order and
/// skipping the ones already in the chain.
///
/// Presence is checked against whole comma separated identifiers, so
/// `Simple` is still added to a chain holding only `SimpleV2`.
pub fn update_credential_providers<S: AsRef<str>>(conf: &mut Configuration, providers: &[S]) {
    log::info!("Updating credential providers in store configuration");

    let mut chain = conf.get_or(CREDENTIALS_PROVIDER, "").to_string();

    for provider in providers.iter().rev().map(AsRef::as_ref) {
        if identifiers(&chain).any(|id| id == provider) {
            log::debug!("Provider {provider} already exists in chain");
            continue;
        }

        if chain.trim().is_empty() {
            log::debug!("Setting provider {provider}");
            chain = provider.to_string();
        } else {
            chain = format!("{provider}{SEPARATOR}{chain}");
            log::debug!("Prepending provider, new providers value: {chain}");
        }
        conf.set(CREDENTIALS_PROVIDER, chain.clone());
    }

    log::info!("Updated credential providers in store configuration successfully");
}

/// Ordered list of providers; the first one returning credentials wins.
#[derive(Debug, Default)]
pub struct ProviderChain {
    providers: Vec<(String, Box<dyn Provider>)>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, name: impl Into<String>, provider: Box<dyn Provider>) -> Self {
        self.providers.push((name.into(), provider));
        self
    }

    /// Builds the chain configured under [`CREDENTIALS_PROVIDER`].
    ///
    /// An empty value falls back to the simple and environment providers.
    pub fn from_configuration(
        conf: &Configuration,
        receiver: Arc<S3DelegationTokenReceiver>,
    ) -> Result<ProviderChain, Error> {
        let configured: Vec<&str> = identifiers(conf.get_or(CREDENTIALS_PROVIDER, "")).collect();
        let names = if configured.is_empty() {
            vec![SIMPLE_CREDENTIALS_PROVIDER, ENVIRONMENT_CREDENTIALS_PROVIDER]
        } else {
            configured
        };

        let mut chain = ProviderChain::new();
        for name in names {
            let provider: Box<dyn Provider> = match name {
                SIMPLE_CREDENTIALS_PROVIDER => match (conf.get(ACCESS_KEY), conf.get(SECRET_KEY)) {
                    (Some(access_key), Some(secret_key)) => {
                        Box::new(StaticProvider::new(access_key, secret_key, None))
                    }
                    _ => {
                        log::debug!("Skipping {name}: access key or secret key is not set");
                        continue;
                    }
                },
                ENVIRONMENT_CREDENTIALS_PROVIDER => Box::new(EnvironmentProvider),
                DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER => Box::new(
                    DynamicTemporaryCredentialsProvider::new(Arc::clone(&receiver)),
                ),
                other => return Err(Error::UnknownCredentialsProvider(other.to_string())),
            };
            chain = chain.with_provider(name, provider);
        }
        Ok(chain)
    }

    /// Names of the providers, in the order they are consulted.
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Provider for ProviderChain {
    fn fetch(&self) -> Option<Credentials> {
        self.providers.iter().find_map(|(name, provider)| {
            let creds = provider.fetch();
            if creds.is_some() {
                log::debug!("Using credentials from {name}");
            }
            creds
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::token::{
        Credentials as SessionCredentials, ObtainedSecurityToken, SecurityTokenReceiver,
    };
    use std::collections::BTreeMap;

    fn chain_after(initial: Option<&str>, providers: &[&str]) -> String {
        let mut conf = Configuration::new();
        if let Some(v) = initial {
            conf.set(CREDENTIALS_PROVIDER, v);
        }
        update_credential_providers(&mut conf, providers);
        conf.get_or(CREDENTIALS_PROVIDER, "").to_string()
    }

    #[test]
    fn test_update_credential_providers() {
        assert_eq!(chain_after(Some(""), &[]), "");
        assert_eq!(chain_after(None, &[]), "");
        assert_eq!(chain_after(Some("Env"), &[]), "Env");

        assert_eq!(chain_after(Some(""), &["A", "B"]), "A,B");
        assert_eq!(chain_after(Some("A,B"), &["B"]), "A,B");
        assert_eq!(chain_after(Some("A,B"), &["C"]), "C,A,B");
        assert_eq!(chain_after(Some("Env"), &["A", "B"]), "A,B,Env");
        assert_eq!(chain_after(Some("A,B,Env"), &["B", "A"]), "A,B,Env");
        assert_eq!(chain_after(Some("A,Env"), &["B", "A", "C"]), "B,C,A,Env");
    }

    #[test]
    fn test_update_credential_providers_matches_whole_identifiers() {
        // A provider whose name is a substring of another one is still added.
        assert_eq!(
            chain_after(Some("SimpleCredentialsProviderV2"), &["SimpleCredentialsProvider"]),
            "SimpleCredentialsProvider,SimpleCredentialsProviderV2"
        );
        assert_eq!(
            chain_after(Some("com.example.AB"), &["A", "B"]),
            "A,B,com.example.AB"
        );
        // Whitespace around separators does not hide an existing identifier.
        assert_eq!(chain_after(Some("A , B"), &["B"]), "A , B");
    }

    quickcheck! {
        fn prop_requested_providers_lead_once(existing: Vec<u8>, requested: Vec<u8>) -> bool {
            let existing: Vec<String> = existing.iter().map(|i| format!("P{i}")).collect();
            let mut wanted: Vec<String> = Vec::new();
            for id in requested.iter().map(|i| format!("P{i}")) {
                if !wanted.contains(&id) {
                    wanted.push(id);
                }
            }

            let mut conf = Configuration::new();
            conf.set(CREDENTIALS_PROVIDER, existing.join(","));
            update_credential_providers(&mut conf, wanted.as_slice());
            let chain: Vec<String> = identifiers(conf.get_or(CREDENTIALS_PROVIDER, ""))
                .map(String::from)
                .collect();

            let new: Vec<&String> = wanted.iter().filter(|id| !existing.contains(id)).collect();
            let every_wanted_present = wanted.iter().all(|id| chain.contains(id));
            let new_lead = chain.iter().take(new.len()).eq(new.iter().copied());
            let existing_kept = chain[new.len()..] == existing[..];
            every_wanted_present && new_lead && existing_kept
        }
    }

    #[test]
    fn test_chain_from_configuration() {
        let receiver = Arc::new(S3DelegationTokenReceiver::new());
        let mut conf = Configuration::new();
        conf.set(ACCESS_KEY, "AK").set(SECRET_KEY, "SK");
        update_credential_providers(
            &mut conf,
            &[DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER, SIMPLE_CREDENTIALS_PROVIDER],
        );

        let chain = ProviderChain::from_configuration(&conf, Arc::clone(&receiver)).unwrap();
        assert_eq!(
            chain.names(),
            vec![DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER, SIMPLE_CREDENTIALS_PROVIDER]
        );

        // Nothing received yet: falls through to the static keys.
        let creds = chain.fetch().unwrap();
        assert_eq!(creds.access_key, "AK");
        assert_eq!(creds.session_token, None);

        let token = ObtainedSecurityToken::with_credentials(
            "s3",
            &SessionCredentials::new("ASIA", "session-secret", "session-token"),
            1_700_000_000_000,
            BTreeMap::new(),
        )
        .unwrap();
        receiver.on_new_tokens_obtained(&token).unwrap();

        let creds = chain.fetch().unwrap();
        assert_eq!(creds.access_key, "ASIA");
        assert_eq!(creds.session_token.as_deref(), Some("session-token"));
    }

    #[test]
    fn test_chain_defaults_and_unknown_providers() {
        let receiver = Arc::new(S3DelegationTokenReceiver::new());

        let mut conf = Configuration::new();
        conf.set(ACCESS_KEY, "AK").set(SECRET_KEY, "SK");
        let chain = ProviderChain::from_configuration(&conf, Arc::clone(&receiver)).unwrap();
        assert_eq!(
            chain.names(),
            vec![SIMPLE_CREDENTIALS_PROVIDER, ENVIRONMENT_CREDENTIALS_PROVIDER]
        );

        conf.set(CREDENTIALS_PROVIDER, "NoSuchProvider");
        assert!(matches!(
            ProviderChain::from_configuration(&conf, receiver),
            Err(Error::UnknownCredentialsProvider(name)) if name == "NoSuchProvider"
        ));
    }
}

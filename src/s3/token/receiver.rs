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

//! Client side cache of the most recently distributed token

use crate::s3::config::{Configuration, ENABLE_TOKEN_DELEGATION};
use crate::s3::error::Error;
use crate::s3::token::{Credentials, ObtainedSecurityToken, SecurityTokenReceiver};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

pub const S3_SCHEME: &str = "s3";

static GLOBAL_RECEIVER: Lazy<Arc<S3DelegationTokenReceiver>> =
    Lazy::new(|| Arc::new(S3DelegationTokenReceiver::new()));

/// Keeps the last received credentials and additional infos.
///
/// Both slots are replaced wholesale; readers get either the previous or the
/// current value. They are independent: an empty token replaces the infos but
/// keeps the credentials.
#[derive(Debug, Default)]
pub struct S3DelegationTokenReceiver {
    credentials: RwLock<Option<Arc<Credentials>>>,
    additional_infos: RwLock<Option<Arc<BTreeMap<String, String>>>>,
}

impl S3DelegationTokenReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide receiver.
    pub fn global() -> Arc<S3DelegationTokenReceiver> {
        Arc::clone(&GLOBAL_RECEIVER)
    }

    /// Last received credentials, if any.
    pub fn credentials(&self) -> Option<Arc<Credentials>> {
        read(&self.credentials)
    }

    pub fn additional_infos(&self) -> Option<Arc<BTreeMap<String, String>>> {
        read(&self.additional_infos)
    }

    /// Copies the received additional infos into `conf`.
    ///
    /// Fails if no token was ever received, which means the store
    /// configuration is being built before tokens were distributed.
    pub fn update_additional_infos(&self, conf: &mut Configuration) -> Result<(), Error> {
        log::info!("Updating additional infos in store configuration");

        let Some(infos) = self.additional_infos() else {
            log::error!("{S3_SCHEME} token receiver has not received any additional infos");
            return Err(Error::AdditionalInfosNotReceived);
        };
        for (key, value) in infos.iter() {
            log::debug!("Setting configuration '{key}' = '{value}'");
            conf.set(key.as_str(), value.as_str());
        }

        log::info!("Updated additional infos in store configuration successfully");
        Ok(())
    }
}

impl SecurityTokenReceiver for S3DelegationTokenReceiver {
    fn scheme(&self) -> &str {
        S3_SCHEME
    }

    fn on_new_tokens_obtained(&self, token: &ObtainedSecurityToken) -> Result<(), Error> {
        log::info!("Trying to update session credentials and additional infos");

        let infos = Arc::new(token.additional_infos().clone());
        if token.is_empty() {
            replace(&self.additional_infos, infos);
            log::info!(
                "Received an empty token. This usually indicates that {ENABLE_TOKEN_DELEGATION} \
                 has been disabled. Updated additional infos only: {:?}",
                token.additional_infos()
            );
        } else {
            let credentials = Credentials::from_json(token.token())?;
            let access_key_id = credentials.access_key_id().to_string();
            replace(&self.credentials, Arc::new(credentials));
            replace(&self.additional_infos, infos);
            log::info!(
                "Session credentials updated successfully with access key: {access_key_id}. \
                 Updated additional infos: {:?}",
                token.additional_infos()
            );
        }
        Ok(())
    }
}

// The slots hold plain values, so a writer that panicked cannot leave them
// half written; recover from poisoning instead of propagating it.
fn read<T>(slot: &RwLock<Option<Arc<T>>>) -> Option<Arc<T>> {
    slot.read().unwrap_or_else(|e| e.into_inner()).clone()
}

fn replace<T>(slot: &RwLock<Option<Arc<T>>>, value: Arc<T>) {
    *slot.write().unwrap_or_else(|e| e.into_inner()) = Some(value);
}

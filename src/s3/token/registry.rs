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

//! Dispatch of distributed tokens to the receiver of their scheme

use crate::s3::error::Error;
use crate::s3::token::{ObtainedSecurityToken, SecurityTokenReceiver};
use dashmap::DashMap;
use std::sync::Arc;

/// Receivers keyed by file system scheme.
///
/// The same receiver may be registered under several schemes, e.g. `s3` and
/// `s3a` share one cache.
#[derive(Debug, Default)]
pub struct TokenReceiverRegistry {
    receivers: DashMap<String, Arc<dyn SecurityTokenReceiver>>,
}

impl TokenReceiverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `receiver` under its own scheme.
    pub fn register(&self, receiver: Arc<dyn SecurityTokenReceiver>) {
        let scheme = receiver.scheme().to_string();
        self.register_for_scheme(scheme, receiver);
    }

    /// Registers `receiver` under `scheme`, replacing any previous receiver.
    pub fn register_for_scheme(
        &self,
        scheme: impl Into<String>,
        receiver: Arc<dyn SecurityTokenReceiver>,
    ) {
        let scheme = scheme.into();
        if self.receivers.insert(scheme.clone(), receiver).is_some() {
            log::warn!("Replacing token receiver registered for scheme {scheme}");
        }
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.receivers.contains_key(scheme)
    }

    /// Hands `token` to the receiver of its scheme.
    ///
    /// Returns `Ok(false)` when no receiver is registered for the scheme.
    pub fn on_new_tokens_obtained(&self, token: &ObtainedSecurityToken) -> Result<bool, Error> {
        // Clone the receiver out so the map shard is not locked while it runs.
        let receiver = self
            .receivers
            .get(token.scheme())
            .map(|entry| Arc::clone(entry.value()));

        match receiver {
            Some(receiver) => {
                receiver.on_new_tokens_obtained(token)?;
                Ok(true)
            }
            None => {
                log::warn!(
                    "Token receiver for scheme {} not found, ignoring the received token",
                    token.scheme()
                );
                Ok(false)
            }
        }
    }
}

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

//! Server side minting of delegation tokens

use crate::s3::config::{ACCESS_KEY, Configuration, ENDPOINT, PATH_STYLE_ACCESS, REGION, SECRET_KEY};
use crate::s3::error::Error;
use crate::s3::sts::{SecurityTokenService, StsClient};
use crate::s3::token::{Credentials, ObtainedSecurityToken};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Store configuration keys forwarded to clients with every token. None of
/// them is secret.
const ADDITIONAL_INFO_KEYS: [&str; 3] = [REGION, ENDPOINT, PATH_STYLE_ACCESS];

/// Type of token that should be provided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
    /// Only informational configuration; for S3-compatible stores without STS.
    NoToken,
    /// Session credentials from the security token service.
    StsSessionToken,
}

#[derive(Debug)]
enum Mode {
    NoToken(ObtainedSecurityToken),
    StsSessionToken,
}

#[derive(Debug)]
pub struct S3DelegationTokenProvider {
    scheme: String,
    mode: Mode,
    region: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    additional_infos: BTreeMap<String, String>,
    sts: Arc<dyn SecurityTokenService>,
}

impl S3DelegationTokenProvider {
    /// Creates a provider talking to the regional AWS security token service.
    pub fn new(scheme: &str, conf: &Configuration, token_type: TokenType) -> Result<Self, Error> {
        Self::with_security_token_service(scheme, conf, token_type, Arc::new(StsClient::new()))
    }

    pub fn with_security_token_service(
        scheme: &str,
        conf: &Configuration,
        token_type: TokenType,
        sts: Arc<dyn SecurityTokenService>,
    ) -> Result<Self, Error> {
        let region = conf.get(REGION).map(String::from);
        if token_type == TokenType::StsSessionToken && region.is_none() {
            return Err(Error::RegionNotSet);
        }

        let additional_infos: BTreeMap<String, String> = ADDITIONAL_INFO_KEYS
            .iter()
            .filter_map(|key| conf.get(key).map(|v| (key.to_string(), v.to_string())))
            .collect();

        let mode = match token_type {
            TokenType::NoToken => {
                Mode::NoToken(ObtainedSecurityToken::empty(scheme, additional_infos.clone()))
            }
            TokenType::StsSessionToken => Mode::StsSessionToken,
        };

        Ok(S3DelegationTokenProvider {
            scheme: scheme.to_string(),
            mode,
            region,
            access_key: conf.get(ACCESS_KEY).map(String::from),
            secret_key: conf.get(SECRET_KEY).map(String::from),
            additional_infos,
            sts,
        })
    }

    pub fn token_type(&self) -> TokenType {
        match self.mode {
            Mode::NoToken(_) => TokenType::NoToken,
            Mode::StsSessionToken => TokenType::StsSessionToken,
        }
    }

    /// Returns a token for distribution to clients.
    ///
    /// [`TokenType::StsSessionToken`] calls the security token service on
    /// every invocation; caching and refresh scheduling are up to the caller.
    pub fn obtain_security_token(&self) -> Result<ObtainedSecurityToken, Error> {
        match &self.mode {
            Mode::NoToken(token) => Ok(token.clone()),
            Mode::StsSessionToken => self.obtain_sts_session_token(),
        }
    }

    fn obtain_sts_session_token(&self) -> Result<ObtainedSecurityToken, Error> {
        let (Some(access_key), Some(secret_key)) = (&self.access_key, &self.secret_key) else {
            return Err(Error::MissingLongTermCredentials);
        };
        let region = self.region.as_deref().ok_or(Error::RegionNotSet)?;

        log::info!("Obtaining session credentials token with access key: {access_key}");
        let session = self.sts.get_session_token(access_key, secret_key, region)?;
        log::info!(
            "Session credentials obtained successfully with access key: {} expiration: {}",
            session.access_key_id,
            session.expiration
        );

        ObtainedSecurityToken::with_credentials(
            &self.scheme,
            &Credentials::new(
                session.access_key_id,
                session.secret_access_key,
                session.session_token,
            ),
            session.expiration,
            self.additional_infos.clone(),
        )
    }
}

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

use crate::mock_sts::MockSecurityTokenService;
use s3_delegation::s3::S3FileSystemPlugin;
use s3_delegation::s3::config::{Configuration, ENABLE_TOKEN_DELEGATION};
use s3_delegation::s3::token::S3DelegationTokenReceiver;
use std::sync::Arc;

/// A server and a client sharing nothing but the tokens passed between them.
#[derive(Clone, Debug)]
pub struct TestContext {
    pub server: S3FileSystemPlugin,
    pub client: S3FileSystemPlugin,
    pub receiver: Arc<S3DelegationTokenReceiver>,
    pub sts: Arc<MockSecurityTokenService>,
    pub region: String,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
}

impl TestContext {
    pub fn new_from_env() -> Self {
        const DEFAULT_SERVER_REGION: &str = "us-east-1";
        const DEFAULT_SERVER_ENDPOINT: &str = "http://localhost:9000";
        const DEFAULT_ACCESS_KEY: &str = "minioadmin";
        const DEFAULT_SECRET_KEY: &str = "minioadmin";

        crate::init_logger();

        let region = std::env::var("SERVER_REGION").unwrap_or(DEFAULT_SERVER_REGION.to_string());
        let endpoint =
            std::env::var("SERVER_ENDPOINT").unwrap_or(DEFAULT_SERVER_ENDPOINT.to_string());
        let access_key = std::env::var("ACCESS_KEY").unwrap_or(DEFAULT_ACCESS_KEY.to_string());
        let secret_key = std::env::var("SECRET_KEY").unwrap_or(DEFAULT_SECRET_KEY.to_string());

        let receiver = Arc::new(S3DelegationTokenReceiver::new());
        let sts = Arc::new(MockSecurityTokenService::default());
        let server = S3FileSystemPlugin::new()
            .with_receiver(Arc::new(S3DelegationTokenReceiver::new()))
            .with_security_token_service(sts.clone());
        let client = S3FileSystemPlugin::new().with_receiver(Arc::clone(&receiver));

        Self {
            server,
            client,
            receiver,
            sts,
            region,
            endpoint,
            access_key,
            secret_key,
        }
    }

    /// Server configuration with long-term credentials and the given token
    /// delegation setting.
    pub fn server_configuration(&self, token_delegation: bool) -> Configuration {
        let mut conf = Configuration::new();
        conf.set("s3.region", self.region.as_str())
            .set("s3.endpoint", self.endpoint.as_str())
            .set("s3.access-key", self.access_key.as_str())
            .set("s3.secret-key", self.secret_key.as_str())
            .set(ENABLE_TOKEN_DELEGATION, token_delegation.to_string());
        conf
    }
}

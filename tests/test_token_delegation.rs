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

use s3_delegation::s3::chain::{
    DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER, SIMPLE_CREDENTIALS_PROVIDER,
};
use s3_delegation::s3::config::{ACCESS_KEY, Configuration, ENDPOINT, REGION, SECRET_KEY};
use s3_delegation::s3::creds::Credentials;
use s3_delegation::s3::error::Error;
use s3_delegation::s3::token::{SecurityTokenReceiver, TokenReceiverRegistry, TokenType};
use s3_delegation_common::mock_sts::StsRequest;
use s3_delegation_common::test_context::TestContext;

#[test]
fn server_delegates_session_credentials_to_client() {
    let ctx = TestContext::new_from_env();

    let server_fs = ctx
        .server
        .create("s3://bucket/", &ctx.server_configuration(true))
        .unwrap();
    assert_eq!(server_fs.credential_providers(), [SIMPLE_CREDENTIALS_PROVIDER]);
    assert_eq!(server_fs.token_type().unwrap(), TokenType::StsSessionToken);

    let token = server_fs.obtain_security_token().unwrap();
    assert_eq!(token.scheme(), "s3");
    assert!(!token.is_empty());
    assert_eq!(token.valid_until(), Some(ctx.sts.credentials().expiration));
    assert_eq!(
        ctx.sts.requests(),
        [StsRequest {
            access_key: ctx.access_key.clone(),
            secret_key: ctx.secret_key.clone(),
            region: ctx.region.clone(),
        }]
    );

    ctx.receiver.on_new_tokens_obtained(&token).unwrap();

    let client_fs = ctx
        .client
        .create("s3://bucket/", &Configuration::new())
        .unwrap();
    assert_eq!(
        client_fs.credential_providers(),
        [DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER]
    );
    let store_conf = client_fs.store_configuration();
    assert_eq!(store_conf.get(REGION), Some(ctx.region.as_str()));
    assert_eq!(store_conf.get(ENDPOINT), Some(ctx.endpoint.as_str()));
    assert_eq!(store_conf.get(ACCESS_KEY), None);
    assert_eq!(store_conf.get(SECRET_KEY), None);

    let session = ctx.sts.credentials();
    assert_eq!(
        client_fs.credentials(),
        Some(Credentials {
            access_key: session.access_key_id.clone(),
            secret_key: session.secret_access_key.clone(),
            session_token: Some(session.session_token.clone()),
        })
    );
    assert!(matches!(
        client_fs.obtain_security_token(),
        Err(Error::TokenProviderOnClient)
    ));
}

#[test]
fn server_without_delegation_forwards_configuration_only() {
    let ctx = TestContext::new_from_env();

    let server_fs = ctx
        .server
        .create("s3://bucket/", &ctx.server_configuration(false))
        .unwrap();
    assert_eq!(server_fs.token_type().unwrap(), TokenType::NoToken);

    let token = server_fs.obtain_security_token().unwrap();
    assert!(token.is_empty());
    assert_eq!(token.valid_until(), None);
    assert_eq!(
        token.additional_infos().get(ENDPOINT).map(String::as_str),
        Some(ctx.endpoint.as_str())
    );
    assert!(ctx.sts.requests().is_empty());

    ctx.receiver.on_new_tokens_obtained(&token).unwrap();
    assert!(ctx.receiver.credentials().is_none());

    // The client brings its own keys and provider.
    let conf: Configuration = [
        ("client.fs.s3.access-key", "client-access-key"),
        ("client.fs.s3.secret-key", "client-secret-key"),
        (
            "client.fs.s3.aws.credentials.provider",
            SIMPLE_CREDENTIALS_PROVIDER,
        ),
    ]
    .into_iter()
    .collect();
    let client_fs = ctx.client.create("s3://bucket/", &conf).unwrap();
    assert_eq!(
        client_fs.credential_providers(),
        [
            DYNAMIC_TEMPORARY_CREDENTIALS_PROVIDER,
            SIMPLE_CREDENTIALS_PROVIDER
        ]
    );
    assert_eq!(
        client_fs.credentials(),
        Some(Credentials {
            access_key: "client-access-key".to_string(),
            secret_key: "client-secret-key".to_string(),
            session_token: None,
        })
    );
}

#[test]
fn client_before_first_token_fails() {
    let ctx = TestContext::new_from_env();

    assert!(matches!(
        ctx.client.create("s3://bucket/", &Configuration::new()),
        Err(Error::AdditionalInfosNotReceived)
    ));
}

#[test]
fn registry_dispatches_tokens_by_scheme() {
    let ctx = TestContext::new_from_env();
    let registry = TokenReceiverRegistry::new();
    registry.register(ctx.receiver.clone());
    assert!(registry.contains("s3"));

    let token = ctx
        .server
        .create("s3://bucket/", &ctx.server_configuration(true))
        .unwrap()
        .obtain_security_token()
        .unwrap();

    assert!(registry.on_new_tokens_obtained(&token).unwrap());
    let credentials = ctx.receiver.credentials().unwrap();
    assert_eq!(
        credentials.access_key_id(),
        ctx.sts.credentials().access_key_id
    );
}

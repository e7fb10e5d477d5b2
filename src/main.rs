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

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use s3_delegation::s3::S3FileSystemPlugin;
use s3_delegation::s3::config::{ACCESS_KEY, Configuration, ENDPOINT, REGION, SECRET_KEY};
use s3_delegation::s3::runtime_mode::resolve_runtime_mode;
use s3_delegation::s3::sts::StsClient;
use s3_delegation::s3::token::{S3DelegationTokenProvider, TokenType};
use s3_delegation::s3::token::receiver::S3_SCHEME;
use std::sync::Arc;

/// Obtain S3 delegation tokens and inspect file system configurations.
#[derive(Parser)]
#[command(name = "s3-token", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Obtain a delegation token and print it as JSON.
    Obtain {
        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,
        #[arg(long, env = "AWS_ACCESS_KEY_ID")]
        access_key: Option<String>,
        #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
        secret_key: Option<String>,
        /// S3 endpoint forwarded to clients with the token.
        #[arg(long)]
        endpoint: Option<String>,
        /// Security token service endpoint, instead of the regional AWS one.
        #[arg(long)]
        sts_endpoint: Option<String>,
        /// Only forward configuration, without session credentials.
        #[arg(long)]
        no_token: bool,
    },
    /// Print the runtime mode and store configuration for KEY=VALUE options.
    Classify {
        #[arg(value_parser = parse_key_value)]
        options: Vec<(String, String)>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Obtain {
            region,
            access_key,
            secret_key,
            endpoint,
            sts_endpoint,
            no_token,
        } => {
            let mut conf = Configuration::new();
            for (key, value) in [
                (REGION, region),
                (ACCESS_KEY, access_key),
                (SECRET_KEY, secret_key),
                (ENDPOINT, endpoint),
            ] {
                if let Some(value) = value {
                    conf.set(key, value);
                }
            }

            let sts = match sts_endpoint {
                Some(sts_endpoint) => StsClient::builder().endpoint(sts_endpoint).build(),
                None => StsClient::new(),
            };
            let token_type = if no_token {
                TokenType::NoToken
            } else {
                TokenType::StsSessionToken
            };

            let provider = S3DelegationTokenProvider::with_security_token_service(
                S3_SCHEME,
                &conf,
                token_type,
                Arc::new(sts),
            )?;
            let token = provider.obtain_security_token()?;

            let json = serde_json::json!({
                "scheme": token.scheme(),
                "token": STANDARD.encode(token.token()),
                "valid_until": token.valid_until(),
                "additional_infos": token.additional_infos(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Command::Classify { options } => {
            let conf: Configuration = options.into_iter().collect();
            let mode = resolve_runtime_mode(&conf)?;
            println!("mode: {mode:?}");
            let store_conf = S3FileSystemPlugin::new().store_configuration(&conf);
            println!("store configuration: {store_conf:#?}");
        }
    }

    Ok(())
}

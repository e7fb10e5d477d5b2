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

//! Error definitions for token delegation

use crate::s3::utils::get_default_text;
use thiserror::Error;
use xmltree::Element;

#[derive(Clone, Debug, Default, PartialEq)]
/// Error response returned by the security token service
pub struct ErrorResponse {
    pub kind: String,
    pub code: String,
    pub message: String,
    pub request_id: String,
}

impl ErrorResponse {
    /// Parses an STS error document of the form
    /// `<ErrorResponse><Error><Type/><Code/><Message/></Error><RequestId/></ErrorResponse>`.
    pub fn parse(body: &[u8]) -> Result<ErrorResponse, Error> {
        let root = Element::parse(body)?;
        let error = root.get_child("Error").unwrap_or(&root);

        Ok(ErrorResponse {
            kind: get_default_text(error, "Type"),
            code: get_default_text(error, "Code"),
            message: get_default_text(error, "Message"),
            request_id: get_default_text(&root, "RequestId"),
        })
    }
}

/// Error definitions
#[derive(Debug, Error)]
pub enum Error {
    #[error("Region is not set")]
    RegionNotSet,

    #[error("long-term access key and secret key are required to obtain a session token")]
    MissingLongTermCredentials,

    #[error("cannot initialize file system due to invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("expected additional infos to be received before configuring the client")]
    AdditionalInfosNotReceived,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("unknown credentials provider: {0}")]
    UnknownCredentialsProvider(String),

    #[error("invalid boolean value {value:?} for configuration key {key}")]
    InvalidBoolean { key: String, value: String },

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error(
        "unexpected usage of delegation token provider; it must only be used on the server side"
    )]
    TokenProviderOnClient,

    #[error("invalid uri: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error(
        "sts operation failed; status: {status}, code: {}, message: {}, request_id: {}",
        .response.code, .response.message, .response.request_id
    )]
    StsError { status: u16, response: ErrorResponse },

    #[error("{0}")]
    XmlParse(#[from] xmltree::ParseError),

    #[error("{0}")]
    Xml(String),

    #[error("{0}")]
    TimeParse(#[from] chrono::ParseError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sts_error_response() {
        let body = br#"<ErrorResponse xmlns="https://sts.amazonaws.com/doc/2011-06-15/">
  <Error>
    <Type>Sender</Type>
    <Code>InvalidClientTokenId</Code>
    <Message>The security token included in the request is invalid.</Message>
  </Error>
  <RequestId>4f8f0b5c-1c1f-4b5e-9d7a-000000000000</RequestId>
</ErrorResponse>"#;

        let response = ErrorResponse::parse(body).unwrap();
        assert_eq!(response.kind, "Sender");
        assert_eq!(response.code, "InvalidClientTokenId");
        assert_eq!(
            response.message,
            "The security token included in the request is invalid."
        );
        assert_eq!(response.request_id, "4f8f0b5c-1c1f-4b5e-9d7a-000000000000");
    }

    #[test]
    fn test_parse_malformed_error_response() {
        assert!(matches!(
            ErrorResponse::parse(b"not xml"),
            Err(Error::XmlParse(_))
        ));
    }

    #[test]
    fn test_region_error_message() {
        assert_eq!(Error::RegionNotSet.to_string(), "Region is not set");
    }
}

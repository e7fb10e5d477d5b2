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

//! Various utility and helper functions

use chrono::{DateTime, NaiveDateTime, ParseError, Utc};
use sha2::{Digest, Sha256};
use xmltree::Element;

use crate::s3::error::Error;

/// Date and time with UTC timezone
pub type UtcTime = DateTime<Utc>;

/// Encodes data using URL encoding
pub fn url_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Gets hex encoded SHA256 hash of given data
pub fn sha256_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Gets current UTC time
pub fn utc_now() -> UtcTime {
    chrono::offset::Utc::now()
}

/// Gets signer date value of given time
pub fn to_signer_date(time: UtcTime) -> String {
    time.format("%Y%m%d").to_string()
}

/// Gets AMZ date value of given time
pub fn to_amz_date(time: UtcTime) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parses ISO8601 UTC formatted value to time
pub fn from_iso8601utc(s: &str) -> Result<UtcTime, ParseError> {
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(
        match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ") {
            Ok(d) => d,
            _ => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")?,
        },
        Utc,
    ))
}

/// Gets text value of given XML element for given tag.
pub fn get_text(element: &Element, tag: &str) -> Result<String, Error> {
    Ok(element
        .get_child(tag)
        .ok_or(Error::Xml(format!("<{tag}> tag not found")))?
        .get_text()
        .ok_or(Error::Xml(format!("text of <{tag}> tag not found")))?
        .to_string())
}

/// Gets default text value of given XML element for given tag.
pub fn get_default_text(element: &Element, tag: &str) -> String {
    element.get_child(tag).map_or(String::new(), |v| {
        v.get_text().unwrap_or_default().to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_sha256_of_empty_payload() {
        assert_eq!(
            sha256_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_signer_dates() {
        let date = Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap();
        assert_eq!(to_signer_date(date), "20130524");
        assert_eq!(to_amz_date(date), "20130524T000000Z");
    }

    #[test]
    fn test_from_iso8601utc() {
        let t = from_iso8601utc("2011-07-11T19:55:29.611Z").unwrap();
        assert_eq!(t.timestamp_millis(), 1310414129611);

        let t = from_iso8601utc("2011-07-11T19:55:29Z").unwrap();
        assert_eq!(t.second(), 29);
        assert_eq!(t.timestamp_subsec_millis(), 0);

        assert!(from_iso8601utc("yesterday").is_err());
    }

    #[test]
    fn test_url_encode() {
        assert_eq!(url_encode("2011-06-15"), "2011-06-15");
        assert_eq!(url_encode("a b/c"), "a%20b%2Fc");
    }
}

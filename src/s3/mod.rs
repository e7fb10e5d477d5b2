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

//! Delegation of S3 session credentials from servers to clients

pub mod chain;
pub mod config;
pub mod creds;
pub mod error;
mod filesystem;
pub mod header_constants;
pub mod multimap_ext;
mod plugin;
pub mod runtime_mode;
pub mod signer;
pub mod sts;
pub mod token;
pub mod utils;

pub use filesystem::S3FileSystem;
pub use plugin::S3FileSystemPlugin;

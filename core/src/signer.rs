// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;

use crate::{Error, HmacSigner, Result, RsaSigner, Secret};

/// Signer is the strategy used to sign and verify arbitrary payloads.
///
/// Implementations hold no mutable state, a single instance can be shared
/// across threads.
pub trait Signer: Debug + Send + Sync + 'static {
    /// The signing family, for example `hmac` or `rsa`.
    fn method(&self) -> &'static str;

    /// The digest algorithm, for example `sha256`.
    fn algorithm(&self) -> &'static str;

    /// Sign the payload with given key, returning the raw signature bytes.
    fn sign(&self, payload: &[u8], key: &Secret) -> Result<Vec<u8>>;

    /// Verify that `expected` is a valid signature of `payload`.
    ///
    /// A mismatch is reported as `Ok(false)`, errors are reserved for bad
    /// key material or backend failures.
    fn verify(&self, expected: &[u8], payload: &[u8], key: &Secret) -> Result<bool>;
}

/// Digest algorithm used by a signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl Algorithm {
    /// The lower-case algorithm identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SignerKind is the closed set of generic signers.
///
/// It can be parsed from (and deserialized as) names like `hmac-sha256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SignerKind {
    /// HMAC with SHA-1
    HmacSha1,
    /// HMAC with SHA-256
    HmacSha256,
    /// HMAC with SHA-384
    HmacSha384,
    /// HMAC with SHA-512
    HmacSha512,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RsaSha384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RsaSha512,
}

impl SignerKind {
    /// All supported kinds.
    pub const ALL: [SignerKind; 6] = [
        SignerKind::HmacSha1,
        SignerKind::HmacSha256,
        SignerKind::HmacSha384,
        SignerKind::HmacSha512,
        SignerKind::RsaSha384,
        SignerKind::RsaSha512,
    ];

    /// The signing family.
    pub fn method(&self) -> &'static str {
        match self {
            SignerKind::HmacSha1
            | SignerKind::HmacSha256
            | SignerKind::HmacSha384
            | SignerKind::HmacSha512 => HmacSigner::METHOD,
            SignerKind::RsaSha384 | SignerKind::RsaSha512 => RsaSigner::METHOD,
        }
    }

    /// The digest algorithm.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            SignerKind::HmacSha1 => Algorithm::Sha1,
            SignerKind::HmacSha256 => Algorithm::Sha256,
            SignerKind::HmacSha384 | SignerKind::RsaSha384 => Algorithm::Sha384,
            SignerKind::HmacSha512 | SignerKind::RsaSha512 => Algorithm::Sha512,
        }
    }

    /// The name of this kind, like `hmac-sha256`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignerKind::HmacSha1 => "hmac-sha1",
            SignerKind::HmacSha256 => "hmac-sha256",
            SignerKind::HmacSha384 => "hmac-sha384",
            SignerKind::HmacSha512 => "hmac-sha512",
            SignerKind::RsaSha384 => "rsa-sha384",
            SignerKind::RsaSha512 => "rsa-sha512",
        }
    }

    /// Build the signer for this kind.
    pub fn build(&self) -> Box<dyn Signer> {
        match self {
            SignerKind::RsaSha384 | SignerKind::RsaSha512 => {
                Box::new(RsaSigner::new(self.algorithm()))
            }
            _ => Box::new(HmacSigner::new(self.algorithm())),
        }
    }
}

impl Display for SignerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        SignerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| Error::malformed_input(format!("unsupported signer: {s}")))
    }
}

impl TryFrom<String> for SignerKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

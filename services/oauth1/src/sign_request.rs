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

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use credsign_core::hash::{
    base64_decode, base64_encode, base64_hmac_sha1, constant_time_eq, verify_hmac_sha1,
};
use credsign_core::key::{load_private_key, public_key_from_pem};
use credsign_core::{
    Algorithm, ClientCredentials, Credentials, Error, HmacSigner, Result, RsaSigner, Secret,
};
use log::{debug, warn};
use serde::Deserialize;

use crate::base_string::{base_string, percent_encode, signing_key};
use crate::constants::OAUTH_SIGNATURE_METHOD;
use crate::SigningRequest;

/// Signature methods defined by OAuth 1.0a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SignatureMethod {
    /// `PLAINTEXT`: the derived key itself.
    Plaintext,
    /// `HMAC-SHA1`
    HmacSha1,
    /// `RSA-SHA1`: PKCS#1 v1.5 with the client's private key.
    RsaSha1,
}

impl SignatureMethod {
    /// The value of `oauth_signature_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::Plaintext => "PLAINTEXT",
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::RsaSha1 => "RSA-SHA1",
        }
    }

    /// The signer family, as reported by the generic signers.
    pub fn family(&self) -> &'static str {
        match self {
            SignatureMethod::Plaintext => "plaintext",
            SignatureMethod::HmacSha1 => HmacSigner::METHOD,
            SignatureMethod::RsaSha1 => RsaSigner::METHOD,
        }
    }

    /// The digest algorithm, `None` for `PLAINTEXT`.
    pub fn algorithm(&self) -> Option<Algorithm> {
        match self {
            SignatureMethod::Plaintext => None,
            SignatureMethod::HmacSha1 | SignatureMethod::RsaSha1 => Some(Algorithm::Sha1),
        }
    }
}

impl Display for SignatureMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLAINTEXT" => Ok(SignatureMethod::Plaintext),
            "HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
            "RSA-SHA1" => Ok(SignatureMethod::RsaSha1),
            _ => Err(Error::malformed_input(format!(
                "unknown oauth signature method: {s}"
            ))),
        }
    }
}

impl TryFrom<String> for SignatureMethod {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// RequestSigner computes and checks `oauth_signature` values.
///
/// The signer is stateless. Nonce and timestamp are part of the protocol
/// parameters handed in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSigner {
    method: SignatureMethod,
}

impl RequestSigner {
    /// Create a new signer for given signature method.
    pub fn new(method: SignatureMethod) -> Self {
        Self { method }
    }

    /// The signature method of this signer.
    pub fn signature_method(&self) -> SignatureMethod {
        self.method
    }

    /// Build the signature base string for this request.
    pub fn base_string(
        &self,
        req: &SigningRequest,
        protocol_params: &BTreeMap<String, String>,
    ) -> String {
        if let Some(declared) = protocol_params.get(OAUTH_SIGNATURE_METHOD) {
            if declared != self.method.as_str() {
                warn!(
                    "protocol parameters declare {declared} but request is signed with {}",
                    self.method
                );
            }
        }

        let s = base_string(req, protocol_params);
        debug!("calculated base string: {s}");
        s
    }

    /// Compute the signature of the request.
    ///
    /// The token is optional for `PLAINTEXT` and `HMAC-SHA1`, and ignored by
    /// `RSA-SHA1`.
    pub fn sign(
        &self,
        req: &SigningRequest,
        protocol_params: &BTreeMap<String, String>,
        client: &ClientCredentials,
        token: Option<&Credentials>,
    ) -> Result<String> {
        debug!(
            "signing request with {} for consumer {}",
            self.method,
            client.id()
        );

        match self.method {
            SignatureMethod::Plaintext => Ok(percent_encode(&signing_key(client, token)?)),
            SignatureMethod::HmacSha1 => {
                let key = signing_key(client, token)?;
                let s = self.base_string(req, protocol_params);
                Ok(base64_hmac_sha1(key.as_bytes(), s.as_bytes()))
            }
            SignatureMethod::RsaSha1 => {
                let s = self.base_string(req, protocol_params);
                let private_key = load_private_key(client.secret())?;
                let signature =
                    RsaSigner::new(Algorithm::Sha1).sign_with_key(s.as_bytes(), private_key)?;
                Ok(base64_encode(&signature))
            }
        }
    }

    /// Check a received `oauth_signature` against the request.
    ///
    /// A signature that does not decode is a mismatch. For `RSA-SHA1` the
    /// client secret may be the consumer's public key PEM.
    pub fn verify(
        &self,
        signature: &str,
        req: &SigningRequest,
        protocol_params: &BTreeMap<String, String>,
        client: &ClientCredentials,
        token: Option<&Credentials>,
    ) -> Result<bool> {
        match self.method {
            SignatureMethod::Plaintext => {
                let expected = self.sign(req, protocol_params, client, token)?;
                Ok(constant_time_eq(expected.as_bytes(), signature.as_bytes()))
            }
            SignatureMethod::HmacSha1 => {
                let key = signing_key(client, token)?;
                let Ok(received) = base64_decode(signature) else {
                    return Ok(false);
                };
                let s = self.base_string(req, protocol_params);
                Ok(verify_hmac_sha1(key.as_bytes(), s.as_bytes(), &received))
            }
            SignatureMethod::RsaSha1 => {
                let public_key = match client.secret() {
                    Secret::Raw(pem) => public_key_from_pem(pem)?,
                    nested => load_private_key(nested)?.to_public_key(),
                };
                let Ok(received) = base64_decode(signature) else {
                    return Ok(false);
                };
                let s = self.base_string(req, protocol_params);
                RsaSigner::new(Algorithm::Sha1).verify_with_key(&received, s.as_bytes(), public_key)
            }
        }
    }
}

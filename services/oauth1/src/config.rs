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

use std::fmt::{Debug, Formatter};

use credsign_core::utils::Redact;
use credsign_core::{ClientCredentials, Credentials, Error, Result, Secret};
use serde::Deserialize;

use crate::constants::OUT_OF_BAND;
use crate::{RequestSigner, SignatureMethod};

/// Config carries all the configuration for an OAuth1 consumer.
///
/// ```toml
/// signature_method = "HMAC-SHA1"
/// consumer_key = "dpf43f3p2l4k3l03"
/// consumer_secret = "kd94hf93k423kf44"
/// token = "nnch734d00sl2jdk"
/// token_secret = "pfkkdhi9sl3r4s00"
/// redirect_uri = "https://printer.example.com/ready"
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Signature method, defaults to `HMAC-SHA1`.
    pub signature_method: Option<SignatureMethod>,
    /// Consumer key, also known as client id.
    pub consumer_key: Option<String>,
    /// Consumer secret, used by `PLAINTEXT` and `HMAC-SHA1`.
    pub consumer_secret: Option<String>,
    /// PEM encoded RSA private key, used by `RSA-SHA1`.
    pub private_key: Option<String>,
    /// Passphrase of an encrypted PKCS#8 private key.
    pub private_key_passphrase: Option<String>,
    /// Token identifier.
    pub token: Option<String>,
    /// Token secret.
    pub token_secret: Option<String>,
    /// Callback uri, defaults to `oob`.
    pub redirect_uri: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("signature_method", &self.signature_method)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("private_key", &Redact::from(&self.private_key))
            .field(
                "private_key_passphrase",
                &Redact::from(&self.private_key_passphrase),
            )
            .field("token", &self.token)
            .field("token_secret", &Redact::from(&self.token_secret))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl Config {
    /// Parse config from toml content.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::malformed_input("invalid oauth1 config").with_source(e))
    }

    /// Set the signature method.
    pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = Some(method);
        self
    }

    /// Set the consumer key and secret.
    pub fn with_consumer(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.consumer_key = Some(key.into());
        self.consumer_secret = Some(secret.into());
        self
    }

    /// Set the private key and its optional passphrase.
    pub fn with_private_key(mut self, pem: impl Into<String>, passphrase: Option<String>) -> Self {
        self.private_key = Some(pem.into());
        self.private_key_passphrase = passphrase;
        self
    }

    /// Set the token and its secret.
    pub fn with_token(mut self, token: impl Into<String>, secret: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.token_secret = Some(secret.into());
        self
    }

    /// Set the redirect uri.
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// The signature method in use.
    pub fn method(&self) -> SignatureMethod {
        self.signature_method.unwrap_or(SignatureMethod::HmacSha1)
    }

    /// Build the request signer.
    pub fn signer(&self) -> RequestSigner {
        RequestSigner::new(self.method())
    }

    /// Build the client credentials.
    ///
    /// With `RSA-SHA1` the secret is the private key, nested with its
    /// passphrase when one is set.
    pub fn client_credentials(&self) -> Result<ClientCredentials> {
        let key = match self.consumer_key.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Error::malformed_input("consumer_key is required")),
        };

        let secret = match self.method() {
            SignatureMethod::RsaSha1 => {
                let pem = match self.private_key.as_deref() {
                    Some(v) if !v.trim().is_empty() => v,
                    _ => {
                        return Err(Error::malformed_input(
                            "private_key is required for RSA-SHA1",
                        ))
                    }
                };
                match &self.private_key_passphrase {
                    Some(passphrase) => Secret::from(Credentials::new(pem, passphrase.as_str())),
                    None => Secret::from(pem),
                }
            }
            _ => Secret::from(self.consumer_secret.clone().unwrap_or_default()),
        };

        Ok(ClientCredentials::new(
            key,
            secret,
            self.redirect_uri.as_deref().unwrap_or(OUT_OF_BAND),
        ))
    }

    /// Build the token credentials, if a token is configured.
    pub fn token_credentials(&self) -> Option<Credentials> {
        self.token.as_ref().map(|token| {
            Credentials::new(token.as_str(), self.token_secret.clone().unwrap_or_default())
        })
    }
}

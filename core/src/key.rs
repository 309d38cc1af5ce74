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

//! RSA key loading.
//!
//! Loaded keys are plain owned values: they are dropped (and private keys
//! zeroized) as soon as the calling `sign` or `verify` returns.

use log::debug;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::{Error, Result, Secret};

/// Load a private key from private key material.
///
/// - `Raw(pem)`: an unencrypted PKCS#8 or PKCS#1 PEM.
/// - `Nested(Credentials(pem, passphrase))`: an encrypted PKCS#8 PEM and its
///   passphrase. An empty passphrase means the PEM is not encrypted.
pub fn load_private_key(material: &Secret) -> Result<RsaPrivateKey> {
    match material {
        Secret::Raw(pem) => private_key_from_pem(pem, None),
        Secret::Nested(creds) => {
            let passphrase = creds.secret().as_raw().ok_or_else(|| {
                Error::invalid_key("private key passphrase must be a raw secret")
            })?;
            let passphrase = (!passphrase.is_empty()).then_some(passphrase);
            private_key_from_pem(creds.id(), passphrase)
        }
    }
}

/// Parse a private key from PEM, auto-detecting PKCS#8 and PKCS#1.
pub fn private_key_from_pem(pem: &str, passphrase: Option<&str>) -> Result<RsaPrivateKey> {
    if pem.trim().is_empty() {
        return Err(Error::invalid_key("private key is empty"));
    }
    debug!(
        "loading rsa private key, encrypted: {}",
        passphrase.is_some()
    );

    let key = match passphrase {
        Some(passphrase) => RsaPrivateKey::from_pkcs8_encrypted_pem(pem, passphrase.as_bytes())
            .map_err(|e| {
                Error::invalid_key("failed to decrypt pkcs8 private key").with_source(e)
            })?,
        // Try PKCS#8 first, then fall back to PKCS#1.
        None => match RsaPrivateKey::from_pkcs8_pem(pem) {
            Ok(key) => key,
            Err(_) => RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| {
                Error::invalid_key("private key is not a valid RSA key").with_source(e)
            })?,
        },
    };

    key.validate()
        .map_err(|e| Error::invalid_key("private key failed validation").with_source(e))?;
    Ok(key)
}

/// Parse a public key from PEM.
///
/// SPKI (`BEGIN PUBLIC KEY`) and PKCS#1 (`BEGIN RSA PUBLIC KEY`) are
/// accepted. A private key PEM is accepted too and reduced to its public half.
pub fn public_key_from_pem(pem: &str) -> Result<RsaPublicKey> {
    if pem.trim().is_empty() {
        return Err(Error::invalid_key("public key is empty"));
    }

    if let Ok(key) = RsaPublicKey::from_public_key_pem(pem) {
        return Ok(key);
    }
    if let Ok(key) = RsaPublicKey::from_pkcs1_pem(pem) {
        return Ok(key);
    }

    match private_key_from_pem(pem, None) {
        Ok(key) => Ok(key.to_public_key()),
        Err(_) => Err(Error::invalid_key("public key is not a valid RSA key")),
    }
}

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

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use log::debug;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::{Algorithm, Error, Result, Secret, Signer};

/// HmacSigner signs payloads with a shared secret.
///
/// The key is either a raw secret or credentials whose secret is raw; it must
/// not be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmacSigner {
    algorithm: Algorithm,
}

impl HmacSigner {
    /// The family identifier of all hmac signers.
    pub const METHOD: &'static str = "hmac";

    /// Create a new hmac signer with given digest algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    fn resolve_key(key: &Secret) -> Result<&[u8]> {
        let key = match key {
            Secret::Raw(v) => v.as_str(),
            Secret::Nested(creds) => creds.secret().as_raw().ok_or_else(|| {
                Error::invalid_key("hmac key must be a raw secret, got nested credentials")
            })?,
        };
        if key.is_empty() {
            return Err(Error::invalid_key("hmac key is empty"));
        }

        Ok(key.as_bytes())
    }
}

impl Signer for HmacSigner {
    fn method(&self) -> &'static str {
        Self::METHOD
    }

    fn algorithm(&self) -> &'static str {
        self.algorithm.as_str()
    }

    fn sign(&self, payload: &[u8], key: &Secret) -> Result<Vec<u8>> {
        let key = Self::resolve_key(key)?;
        debug!(
            "signing {} bytes payload with hmac-{}",
            payload.len(),
            self.algorithm
        );

        match self.algorithm {
            Algorithm::Sha1 => mac_sign::<Hmac<Sha1>>(key, payload),
            Algorithm::Sha256 => mac_sign::<Hmac<Sha256>>(key, payload),
            Algorithm::Sha384 => mac_sign::<Hmac<Sha384>>(key, payload),
            Algorithm::Sha512 => mac_sign::<Hmac<Sha512>>(key, payload),
        }
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &Secret) -> Result<bool> {
        let key = Self::resolve_key(key)?;

        match self.algorithm {
            Algorithm::Sha1 => mac_verify::<Hmac<Sha1>>(key, payload, expected),
            Algorithm::Sha256 => mac_verify::<Hmac<Sha256>>(key, payload, expected),
            Algorithm::Sha384 => mac_verify::<Hmac<Sha384>>(key, payload, expected),
            Algorithm::Sha512 => mac_verify::<Hmac<Sha512>>(key, payload, expected),
        }
    }
}

fn new_mac<M: Mac + KeyInit>(key: &[u8], payload: &[u8]) -> Result<M> {
    let mut mac = <M as KeyInit>::new_from_slice(key)
        .map_err(|e| Error::invalid_key(format!("hmac key rejected: {e}")))?;
    mac.update(payload);

    Ok(mac)
}

fn mac_sign<M: Mac + KeyInit>(key: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    Ok(new_mac::<M>(key, payload)?.finalize().into_bytes().to_vec())
}

// verify_slice compares in constant time.
fn mac_verify<M: Mac + KeyInit>(key: &[u8], payload: &[u8], expected: &[u8]) -> Result<bool> {
    Ok(new_mac::<M>(key, payload)?.verify_slice(expected).is_ok())
}

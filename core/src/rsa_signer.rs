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

use std::error::Error as _;

use log::debug;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::AssociatedOid;
use rsa::signature::{SignatureEncoding, Signer as _, Verifier as _};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::Digest;
use sha2::{Sha256, Sha384, Sha512};

use crate::key::{load_private_key, public_key_from_pem};
use crate::{Algorithm, Error, Result, Secret, Signer};

/// RsaSigner signs payloads with RSASSA-PKCS1-v1_5.
///
/// For `sign` the key is either a private key PEM, or credentials whose
/// secret is the private key material:
///
/// - `Credentials(id, pem)`
/// - `Credentials(id, Credentials(pem, passphrase))` for encrypted PKCS#8.
///
/// For `verify` the key is either a public key PEM, or credentials whose id
/// is the public key PEM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaSigner {
    algorithm: Algorithm,
}

impl RsaSigner {
    /// The family identifier of all rsa signers.
    pub const METHOD: &'static str = "rsa";

    /// Create a new rsa signer with given digest algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    /// Sign with an already loaded private key.
    pub fn sign_with_key(&self, payload: &[u8], key: RsaPrivateKey) -> Result<Vec<u8>> {
        match self.algorithm {
            Algorithm::Sha1 => pkcs1v15_sign::<Sha1>(payload, key),
            Algorithm::Sha256 => pkcs1v15_sign::<Sha256>(payload, key),
            Algorithm::Sha384 => pkcs1v15_sign::<Sha384>(payload, key),
            Algorithm::Sha512 => pkcs1v15_sign::<Sha512>(payload, key),
        }
    }

    /// Verify with an already loaded public key.
    pub fn verify_with_key(
        &self,
        expected: &[u8],
        payload: &[u8],
        key: RsaPublicKey,
    ) -> Result<bool> {
        match self.algorithm {
            Algorithm::Sha1 => pkcs1v15_verify::<Sha1>(expected, payload, key),
            Algorithm::Sha256 => pkcs1v15_verify::<Sha256>(expected, payload, key),
            Algorithm::Sha384 => pkcs1v15_verify::<Sha384>(expected, payload, key),
            Algorithm::Sha512 => pkcs1v15_verify::<Sha512>(expected, payload, key),
        }
    }
}

impl Signer for RsaSigner {
    fn method(&self) -> &'static str {
        Self::METHOD
    }

    fn algorithm(&self) -> &'static str {
        self.algorithm.as_str()
    }

    fn sign(&self, payload: &[u8], key: &Secret) -> Result<Vec<u8>> {
        let material = match key {
            Secret::Raw(_) => key,
            Secret::Nested(creds) => creds.secret(),
        };
        let private_key = load_private_key(material)?;
        debug!(
            "signing {} bytes payload with rsa-{}",
            payload.len(),
            self.algorithm
        );

        self.sign_with_key(payload, private_key)
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &Secret) -> Result<bool> {
        let pem = match key {
            Secret::Raw(pem) => pem.as_str(),
            Secret::Nested(creds) => creds.id(),
        };
        let public_key = public_key_from_pem(pem)?;

        self.verify_with_key(expected, payload, public_key)
    }
}

fn pkcs1v15_sign<D>(payload: &[u8], key: RsaPrivateKey) -> Result<Vec<u8>>
where
    D: Digest + AssociatedOid,
{
    let signing_key = SigningKey::<D>::new(key);
    let signature = signing_key
        .try_sign(payload)
        .map_err(|e| Error::signing_failed(format!("rsa backend refused to sign: {e}")))?;

    Ok(signature.to_vec())
}

fn pkcs1v15_verify<D>(expected: &[u8], payload: &[u8], key: RsaPublicKey) -> Result<bool>
where
    D: Digest + AssociatedOid,
{
    let verifying_key = VerifyingKey::<D>::new(key);
    let Ok(signature) = Signature::try_from(expected) else {
        return Ok(false);
    };

    match verifying_key.verify(payload, &signature) {
        Ok(()) => Ok(true),
        Err(e) => classify_verify_error(&e),
    }
}

/// The backend reports a plain mismatch as `rsa::Error::Verification`,
/// anything else is a hard failure.
fn classify_verify_error(e: &rsa::signature::Error) -> Result<bool> {
    match e.source().and_then(|s| s.downcast_ref::<rsa::Error>()) {
        Some(rsa::Error::Verification) => Ok(false),
        Some(err) => Err(Error::verification_error(format!(
            "rsa backend failed to verify: {err}"
        ))),
        None => Err(Error::verification_error(format!(
            "rsa backend failed to verify: {e}"
        ))),
    }
}

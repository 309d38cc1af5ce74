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

//! Core components for credentials and payload signing.
//!
//! This crate provides the identity value model and the generic signers of
//! the credsign ecosystem.
//!
//! ## Overview
//!
//! - **Identities**: [`Token`] (id only), [`Credentials`] (id + [`Secret`],
//!   where the secret may itself be credentials) and [`ClientCredentials`]
//!   (credentials + redirect uri). All implement [`Identity`].
//! - **Signers**: the [`Signer`] strategy with [`HmacSigner`] and
//!   [`RsaSigner`], selected by [`SignerKind`].
//!
//! ## Example
//!
//! ```
//! use credsign_core::{Credentials, Secret, SignerKind};
//!
//! # fn main() -> credsign_core::Result<()> {
//! let signer = "hmac-sha256".parse::<SignerKind>()?.build();
//! let key = Secret::from(Credentials::new("webhook", "shared-secret"));
//!
//! let signature = signer.sign(b"payload", &key)?;
//! assert!(signer.verify(&signature, b"payload", &key)?);
//! assert!(!signer.verify(&signature, b"tampered", &key)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Base64 and HMAC-SHA1 helpers shared with protocol signers
//! - [`key`]: RSA key loading
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod key;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod credential;
pub use credential::{ClientCredentials, Credentials, Identity, Secret, Token};

mod signer;
pub use signer::{Algorithm, Signer, SignerKind};
mod hmac_signer;
pub use hmac_signer::HmacSigner;
mod rsa_signer;
pub use rsa_signer::RsaSigner;

#[cfg(test)]
mod test_keys;

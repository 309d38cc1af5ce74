//! OAuth 1.0a Request Signer
//!
//! Builds the signature base string of a request and signs it with
//! `PLAINTEXT`, `HMAC-SHA1` or `RSA-SHA1`.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use credsign_oauth1::{Config, SigningRequest};
//! use http::Method;
//!
//! # fn main() -> credsign_core::Result<()> {
//! let cfg = Config::default()
//!     .with_consumer("dpf43f3p2l4k3l03", "kd94hf93k423kf44")
//!     .with_token("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00");
//!
//! let req = SigningRequest::new(
//!     Method::GET,
//!     "http://photos.example.net/photos?file=vacation.jpg&size=original",
//! )?;
//! let params = BTreeMap::from_iter(
//!     [
//!         ("oauth_consumer_key", "dpf43f3p2l4k3l03"),
//!         ("oauth_token", "nnch734d00sl2jdk"),
//!         ("oauth_signature_method", "HMAC-SHA1"),
//!         ("oauth_timestamp", "1191242096"),
//!         ("oauth_nonce", "kllo9940pd9333jh"),
//!         ("oauth_version", "1.0"),
//!     ]
//!     .map(|(k, v)| (k.to_string(), v.to_string())),
//! );
//!
//! let client = cfg.client_credentials()?;
//! let token = cfg.token_credentials();
//! let signature = cfg.signer().sign(&req, &params, &client, token.as_ref())?;
//! assert_eq!(signature, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
//! # Ok(())
//! # }
//! ```

pub mod base_string;
pub mod constants;

mod config;
pub use config::Config;

mod request;
pub use request::SigningRequest;

mod sign_request;
pub use sign_request::{RequestSigner, SignatureMethod};

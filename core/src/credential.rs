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

use std::any::Any;
use std::fmt::{Debug, Formatter};

use serde::Deserialize;

use crate::utils::{Redact, RedactSecret};
use crate::{Error, Result};

/// Identity is the trait shared by every identifier-bearing value.
///
/// `matches` takes a trait object so that values of different concrete types
/// can be compared without panicking: a [`Credentials`] never matches a bare
/// [`Token`], and a [`ClientCredentials`] only matches another
/// [`ClientCredentials`].
pub trait Identity: Debug + Send + Sync + 'static {
    /// The opaque identifier of this value.
    fn id(&self) -> &str;

    /// View this value as an id + secret pair, if it carries a secret.
    fn as_credentials(&self) -> Option<&Credentials> {
        None
    }

    /// Upcast for concrete type checks.
    fn as_any(&self) -> &dyn Any;

    /// Check whether `other` denotes the same identity.
    fn matches(&self, other: &dyn Identity) -> bool;
}

/// Token is an identifier-only value.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Token {
    id: String,
}

impl Token {
    /// Create a new token.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Get the token id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token").field("id", &self.id).finish()
    }
}

impl Identity for Token {
    fn id(&self) -> &str {
        &self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn matches(&self, other: &dyn Identity) -> bool {
        self.id == other.id()
    }
}

/// Secret carried by [`Credentials`].
///
/// A secret is either raw material or another credentials pair, for example
/// an RSA private key (id) protected by a passphrase (secret).
///
/// The same type is accepted as the key argument of [`crate::Signer`]:
/// `Nested` there means "the key is a credentials pair".
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Secret {
    /// Raw secret material.
    Raw(String),
    /// A nested credentials pair.
    Nested(Box<Credentials>),
}

impl Secret {
    /// Get the raw secret, `None` if nested.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Secret::Raw(v) => Some(v),
            Secret::Nested(_) => None,
        }
    }

    /// Get the nested credentials, `None` if raw.
    pub fn as_nested(&self) -> Option<&Credentials> {
        match self {
            Secret::Raw(_) => None,
            Secret::Nested(c) => Some(c),
        }
    }

    /// Compare two secrets.
    ///
    /// Nested secrets are compared recursively, a raw secret never matches a
    /// nested one.
    pub fn matches(&self, other: &Secret) -> bool {
        match (self, other) {
            (Secret::Raw(l), Secret::Raw(r)) => l == r,
            (Secret::Nested(l), Secret::Nested(r)) => l.matches(r.as_ref()),
            _ => false,
        }
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        RedactSecret::from(self).fmt(f)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret::Raw(value.to_string())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret::Raw(value)
    }
}

impl From<Credentials> for Secret {
    fn from(value: Credentials) -> Self {
        Secret::Nested(Box::new(value))
    }
}

/// Credentials is an identifier + secret pair.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    id: String,
    secret: Secret,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(id: impl Into<String>, secret: impl Into<Secret>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    /// Parse credentials from JSON like `{"id": "...", "secret": "..."}`.
    ///
    /// `secret` must be a string or another `{id, secret}` object, anything
    /// else is rejected with [`crate::ErrorKind::MalformedInput`].
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            Error::malformed_input("credentials secret must be a string or an {id, secret} object")
                .with_source(e)
        })
    }

    /// Get the credentials id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the secret.
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// The identifier-only part of these credentials.
    pub fn token(&self) -> Token {
        Token::new(self.id.clone())
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &self.secret)
            .finish()
    }
}

impl Identity for Credentials {
    fn id(&self) -> &str {
        &self.id
    }

    fn as_credentials(&self) -> Option<&Credentials> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn matches(&self, other: &dyn Identity) -> bool {
        let Some(other) = other.as_credentials() else {
            return false;
        };

        self.secret.matches(&other.secret) && self.id == other.id
    }
}

/// ClientCredentials is the application (consumer) identity.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientCredentials {
    #[serde(flatten)]
    credentials: Credentials,
    redirect_uri: String,
}

impl ClientCredentials {
    /// Create new client credentials.
    pub fn new(
        id: impl Into<String>,
        secret: impl Into<Secret>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(id, secret),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Get the client id, also known as consumer key.
    pub fn id(&self) -> &str {
        self.credentials.id()
    }

    /// Get the client secret.
    pub fn secret(&self) -> &Secret {
        self.credentials.secret()
    }

    /// Get the redirect uri.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Get the underlying credentials pair.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl Debug for ClientCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("id", &self.credentials.id)
            .field("secret", &self.credentials.secret)
            .field("redirect_uri", &Redact::from(&self.redirect_uri))
            .finish()
    }
}

impl Identity for ClientCredentials {
    fn id(&self) -> &str {
        self.credentials.id()
    }

    fn as_credentials(&self) -> Option<&Credentials> {
        Some(&self.credentials)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn matches(&self, other: &dyn Identity) -> bool {
        let Some(other) = other.as_any().downcast_ref::<ClientCredentials>() else {
            return false;
        };

        self.redirect_uri == other.redirect_uri && self.credentials.matches(&other.credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_matches() {
        let token = Token::new("abc");
        assert!(token.matches(&Token::new("abc")));
        assert!(!token.matches(&Token::new("abd")));
        // Tokens only look at the id.
        assert!(token.matches(&Credentials::new("abc", "secret")));
    }

    #[test]
    fn test_credentials_matches() {
        let creds = Credentials::new("id", "secret");

        assert!(creds.matches(&Credentials::new("id", "secret")));
        assert!(!creds.matches(&Credentials::new("other", "secret")));
        assert!(!creds.matches(&Credentials::new("id", "other")));
        assert!(!creds.matches(&Token::new("id")));
    }

    #[test]
    fn test_nested_credentials_matches() {
        let nested = Credentials::new("k", Credentials::new("a", "b"));

        assert!(nested.matches(&Credentials::new("k", Credentials::new("a", "b"))));
        assert!(!nested.matches(&Credentials::new("k", Credentials::new("a", "c"))));
        assert!(!nested.matches(&Credentials::new("k", Credentials::new("x", "b"))));
        assert!(!nested.matches(&Credentials::new("k", "ab")));
        assert!(!Credentials::new("k", "ab").matches(&nested));
    }

    #[test]
    fn test_deeply_nested_credentials_matches() {
        let build = |leaf: &str| {
            Credentials::new(
                "outer",
                Credentials::new("middle", Credentials::new("inner", leaf)),
            )
        };

        assert!(build("leaf").matches(&build("leaf")));
        assert!(!build("leaf").matches(&build("other")));
    }

    #[test]
    fn test_client_credentials_matches() {
        let client = ClientCredentials::new("id", "secret", "https://example.com/cb");

        assert!(client.matches(&ClientCredentials::new(
            "id",
            "secret",
            "https://example.com/cb"
        )));
        assert!(!client.matches(&ClientCredentials::new(
            "id",
            "secret",
            "https://example.com/other"
        )));
        assert!(!client.matches(&ClientCredentials::new(
            "id",
            "other",
            "https://example.com/cb"
        )));
        // Concrete type must be the same.
        assert!(!client.matches(&Credentials::new("id", "secret")));
        assert!(!client.matches(&Token::new("id")));
        // Plain credentials only look at the pair.
        assert!(Credentials::new("id", "secret").matches(&client));
    }

    #[test]
    fn test_credentials_from_json() {
        let creds = Credentials::from_json(r#"{"id": "k", "secret": "s"}"#).unwrap();
        assert_eq!(creds, Credentials::new("k", "s"));

        let creds =
            Credentials::from_json(r#"{"id": "k", "secret": {"id": "a", "secret": "b"}}"#)
                .unwrap();
        assert_eq!(creds, Credentials::new("k", Credentials::new("a", "b")));
    }

    #[test]
    fn test_credentials_from_json_rejects_other_secret_types() {
        for input in [
            r#"{"id": "k", "secret": 42}"#,
            r#"{"id": "k", "secret": ["a", "b"]}"#,
            r#"{"id": "k", "secret": null}"#,
            r#"{"id": "k", "secret": {"id": "a"}}"#,
            r#"{"id": "k"}"#,
        ] {
            let err = Credentials::from_json(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedInput, "input: {input}");
        }
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::new("id", "a-very-secret-value");
        assert_eq!(
            format!("{creds:?}"),
            r#"Credentials { id: "id", secret: a-v***lue }"#
        );
    }
}

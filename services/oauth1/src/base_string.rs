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

//! Base string construction and key derivation shared by all OAuth1
//! signature methods.

use std::collections::BTreeMap;

use credsign_core::{ClientCredentials, Credentials, Error, Result, Secret};
use percent_encoding::utf8_percent_encode;

use crate::constants::{OAUTH_ENCODE_SET, OAUTH_SIGNATURE, REALM};
use crate::SigningRequest;

/// Percent encode a value with the OAuth unreserved set.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, &OAUTH_ENCODE_SET).to_string()
}

/// Normalize parameters into `k=v&k=v`.
///
/// Every key and value is encoded first, then pairs are sorted by key and
/// then by value.
pub fn normalize_parameters<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort();

    let mut s = String::with_capacity(pairs.iter().map(|(k, v)| k.len() + v.len() + 2).sum());
    for (idx, (k, v)) in pairs.into_iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }
        s.push_str(&k);
        s.push('=');
        s.push_str(&v);
    }

    s
}

/// Build the signature base string of a request.
///
/// `oauth_signature` is never part of the base string, `realm` is dropped
/// from the protocol parameters.
pub fn base_string(req: &SigningRequest, protocol_params: &BTreeMap<String, String>) -> String {
    let params = req
        .params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .filter(|(k, _)| *k != OAUTH_SIGNATURE)
        .chain(
            protocol_params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .filter(|(k, _)| *k != OAUTH_SIGNATURE && *k != REALM),
        );

    format!(
        "{}&{}&{}",
        req.method.as_str().to_ascii_uppercase(),
        percent_encode(&req.base_uri()),
        percent_encode(&normalize_parameters(params))
    )
}

/// Derive the signing key `enc(client_secret)&enc(token_secret)`.
///
/// The token secret is empty when no token is given.
pub fn signing_key(client: &ClientCredentials, token: Option<&Credentials>) -> Result<String> {
    let client_secret = match client.secret() {
        Secret::Raw(v) => v.as_str(),
        Secret::Nested(_) => {
            return Err(Error::invalid_key(
                "client secret carrying a private key can only sign with RSA-SHA1",
            ))
        }
    };

    let token_secret = match token.map(|t| t.secret()) {
        None => "",
        Some(Secret::Raw(v)) => v.as_str(),
        Some(Secret::Nested(_)) => {
            return Err(Error::invalid_key("token secret must be a raw secret"))
        }
    };

    Ok(format!(
        "{}&{}",
        percent_encode(client_secret),
        percent_encode(token_secret)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use credsign_core::ErrorKind;
    use http::Method;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percent_encode() {
        let cases = [
            ("abcABC123", "abcABC123"),
            ("-._~", "-._~"),
            ("%", "%25"),
            ("+", "%2B"),
            (" ", "%20"),
            ("&=*", "%26%3D%2A"),
            ("\u{000A}", "%0A"),
            ("\u{2001}", "%E2%80%81"),
            ("\u{3001}", "%E3%80%81"),
            ("\u{1F600}", "%F0%9F%98%80"),
            ("", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(percent_encode(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_normalize_parameters() {
        // RFC 5849 section 3.4.1.3.2
        let params = [
            ("b5", "=%3D"),
            ("a3", "a"),
            ("c@", ""),
            ("a2", "r b"),
            ("oauth_consumer_key", "9djdj82h48djs9d2"),
            ("oauth_token", "kkk9d7dh3k39sjv7"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "137131201"),
            ("oauth_nonce", "7d8f3e4a"),
            ("c2", ""),
            ("a3", "2 q"),
        ];

        assert_eq!(
            normalize_parameters(params),
            "a2=r%20b&a3=2%20q&a3=a&b5=%3D%253D&c%40=&c2=&oauth_consumer_key=9djdj82h48djs9d2\
             &oauth_nonce=7d8f3e4a&oauth_signature_method=HMAC-SHA1&oauth_timestamp=137131201\
             &oauth_token=kkk9d7dh3k39sjv7"
        );
    }

    #[test]
    fn test_normalize_parameters_is_order_independent() {
        let mut params = vec![("z", "1"), ("a", "2"), ("a", "1"), ("m", ""), ("é", "x")];
        let expected = normalize_parameters(params.clone());

        for _ in 0..params.len() {
            params.rotate_left(1);
            assert_eq!(normalize_parameters(params.clone()), expected);
            params.reverse();
            assert_eq!(normalize_parameters(params.clone()), expected);
        }
    }

    #[test]
    fn test_base_string_ignores_signature_and_realm() {
        let mut req = SigningRequest::new(Method::GET, "http://example.com").unwrap();
        req.param_push(OAUTH_SIGNATURE, "forged");

        let protocol = BTreeMap::from([
            ("oauth_version".to_string(), "1.0".to_string()),
            (OAUTH_SIGNATURE.to_string(), "forged".to_string()),
            (REALM.to_string(), "Photos".to_string()),
        ]);

        assert_eq!(
            base_string(&req, &protocol),
            "GET&http%3A%2F%2Fexample.com%2F&oauth_version%3D1.0"
        );
    }

    #[test]
    fn test_base_string_uppercases_method() {
        let req = SigningRequest::new(Method::from_bytes(b"patch").unwrap(), "http://a.test/x")
            .unwrap();

        assert_eq!(
            base_string(&req, &BTreeMap::new()),
            "PATCH&http%3A%2F%2Fa.test%2Fx&"
        );
    }

    #[test]
    fn test_signing_key() {
        let client = ClientCredentials::new("ck", "cs", "oob");
        let token = Credentials::new("tk", "ts");

        assert_eq!(signing_key(&client, Some(&token)).unwrap(), "cs&ts");
        assert_eq!(signing_key(&client, None).unwrap(), "cs&");

        let client = ClientCredentials::new("ck", "c&s", "oob");
        let token = Credentials::new("tk", "t s");
        assert_eq!(signing_key(&client, Some(&token)).unwrap(), "c%26s&t%20s");

        let client = ClientCredentials::new("ck", "", "oob");
        assert_eq!(signing_key(&client, None).unwrap(), "&");
    }

    #[test]
    fn test_signing_key_rejects_nested_secrets() {
        let client = ClientCredentials::new("ck", Credentials::new("pem", ""), "oob");
        let err = signing_key(&client, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);

        let client = ClientCredentials::new("ck", "cs", "oob");
        let token = Credentials::new("tk", Credentials::new("a", "b"));
        let err = signing_key(&client, Some(&token)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }
}

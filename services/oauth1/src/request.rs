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

use credsign_core::{Error, Result};
use http::uri::{Authority, Scheme};
use http::{Method, Uri};

/// Signing context for an OAuth1 request.
///
/// Holds everything the base string is built from: the method, the parts of
/// the base URI and the decoded request parameters.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, as it appears in the uri.
    pub path: String,
    /// Decoded query and form body parameters.
    pub params: Vec<(String, String)>,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &http::request::Parts) -> Result<Self> {
        Self::from_uri(parts.method.clone(), parts.uri.clone())
    }

    /// Build a signing context from a method and an uri string.
    pub fn new(method: Method, uri: &str) -> Result<Self> {
        let uri = uri
            .parse::<Uri>()
            .map_err(|e| Error::request_invalid(format!("invalid uri: {uri}")).with_source(e))?;

        Self::from_uri(method, uri)
    }

    fn from_uri(method: Method, uri: Uri) -> Result<Self> {
        let uri = uri.into_parts();
        let authority = uri.authority.ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
        })?;

        let (path, params) = match &uri.path_and_query {
            Some(paq) => (
                paq.path().to_string(),
                paq.query()
                    .map(|v| {
                        form_urlencoded::parse(v.as_bytes())
                            .map(|(k, v)| (k.into_owned(), v.into_owned()))
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
            None => ("/".to_string(), Vec::new()),
        };

        Ok(SigningRequest {
            method,
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority,
            path,
            params,
        })
    }

    /// Append the parameters of an `application/x-www-form-urlencoded` body.
    pub fn with_form_body(mut self, body: &[u8]) -> Self {
        self.params.extend(
            form_urlencoded::parse(body).map(|(k, v)| (k.into_owned(), v.into_owned())),
        );
        self
    }

    /// Push a new parameter into parameter list.
    #[inline]
    pub fn param_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// The base string uri: lowercase scheme and host, no default port, no
    /// query.
    pub fn base_uri(&self) -> String {
        let scheme = self.scheme.as_str().to_ascii_lowercase();
        let host = self.authority.host().to_ascii_lowercase();

        let mut s = String::with_capacity(scheme.len() + host.len() + self.path.len() + 8);
        s.push_str(&scheme);
        s.push_str("://");
        s.push_str(&host);

        if let Some(port) = self.authority.port_u16() {
            let default_port = match scheme.as_str() {
                "http" => Some(80),
                "https" => Some(443),
                _ => None,
            };
            if default_port != Some(port) {
                s.push(':');
                s.push_str(&port.to_string());
            }
        }

        if self.path.is_empty() {
            s.push('/');
        } else {
            s.push_str(&self.path);
        }

        s
    }
}

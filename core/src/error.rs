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

use std::fmt;
use thiserror::Error;

/// The error type for credsign operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Key material is absent, empty, of the wrong shape or fails to parse.
    InvalidKey,

    /// The cryptographic backend refused to produce a signature.
    SigningFailed,

    /// The verification primitive failed for a reason other than a mismatch.
    VerificationError,

    /// Input rejected at construction time (credentials, names, config).
    MalformedInput,

    /// Request cannot be viewed for signing (missing authority, etc.)
    RequestInvalid,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error was raised by the signing backend.
    ///
    /// Key problems are the caller's to fix, backend problems are not.
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::SigningFailed | ErrorKind::VerificationError
        )
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid key error
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidKey, message)
    }

    /// Create a signing failed error
    pub fn signing_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SigningFailed, message)
    }

    /// Create a verification error
    pub fn verification_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::VerificationError, message)
    }

    /// Create a malformed input error
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidKey => write!(f, "invalid key"),
            ErrorKind::SigningFailed => write!(f, "signing failed"),
            ErrorKind::VerificationError => write!(f, "verification error"),
            ErrorKind::MalformedInput => write!(f, "malformed input"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed_input(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

//! Utility functions and types.

use std::fmt::Debug;

use crate::Secret;

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// This design is to allow users to distinguish between different redacted strings but avoid
/// leaking sensitive information.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 || !self.0.is_char_boundary(3) || !self.0.is_char_boundary(length - 3)
        {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..3])?;
            f.write_str("***")?;
            f.write_str(&self.0[length - 3..])
        }
    }
}

/// Redacts a [`Secret`].
///
/// Raw secrets go through [`Redact`]. Nested secrets keep their shape, their
/// id is redacted too since it usually carries key material (a PEM for
/// example).
pub struct RedactSecret<'a>(&'a Secret);

impl<'a> From<&'a Secret> for RedactSecret<'a> {
    fn from(value: &'a Secret) -> Self {
        RedactSecret(value)
    }
}

impl Debug for RedactSecret<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Secret::Raw(v) => Redact::from(v).fmt(f),
            Secret::Nested(c) => f
                .debug_struct("Credentials")
                .field("id", &Redact::from(c.id()))
                .field("secret", &RedactSecret::from(c.secret()))
                .finish(),
        }
    }
}

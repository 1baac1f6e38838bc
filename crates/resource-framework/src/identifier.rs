//! # Resource Identifiers
//!
//! A resource identifier is a URI-shaped string: `scheme://segment/segment/...`.
//! It is split into its raw segments exactly once; templates then work on the
//! segment list instead of re-deriving anything from the string.

use crate::error::ParseError;
use std::fmt::{Display, Formatter};

/// An identifier split into its raw (still percent-encoded) segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentifier {
    raw: String,
    scheme: &'static str,
    segments: Vec<String>,
}

impl ResourceIdentifier {
    /// Splits `identifier` after the `scheme` prefix.
    ///
    /// Empty segments are kept (`systems/` yields `["systems", ""]`), so a trailing
    /// slash never silently collapses into a shorter identifier.
    pub fn parse(identifier: &str, scheme: &'static str) -> Result<Self, ParseError> {
        let rest = identifier
            .strip_prefix(scheme)
            .ok_or_else(|| ParseError::InvalidScheme {
                expected: scheme,
                identifier: identifier.to_string(),
            })?;

        Ok(Self {
            raw: identifier.to_string(),
            scheme,
            segments: rest.split('/').map(str::to_string).collect(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl Display for ResourceIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Percent-decodes one segment.
///
/// Returns `None` for malformed escapes (`%`, `%4`, `%ZZ`) and for byte sequences
/// that do not decode to UTF-8.
pub fn decode_segment(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    urlencoding::decode(raw).ok().map(|decoded| decoded.into_owned())
}

/// Percent-encodes one parameter value for use inside an identifier.
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

//! # Address Templates
//!
//! An [`AddressTemplate`] describes which identifiers a route accepts:
//!
//! ```text
//! spacetraders://systems/{systemSymbol}/waypoints/{waypointSymbol}/market
//!                ^^^^^^^ ^^^^^^^^^^^^^^ literal / placeholder segments
//! ```
//!
//! - `name` is a literal segment, compared byte for byte.
//! - `{name}` captures exactly one segment.
//! - `{name*}` (only as the last segment) captures one or more trailing segments,
//!   the "list" form. The captured value is the decoded segments joined by `/`.
//!
//! Matching runs in three passes so that a template either clearly does not
//! apply (shape mismatch) or clearly does and then fails on its values:
//!
//! 1. segment count against the template's minimum/maximum
//! 2. every literal segment
//! 3. every placeholder: non-empty, then percent-decoded

use crate::error::{DispatchError, ParseError, TemplateError};
use crate::identifier::{decode_segment, encode_segment, ResourceIdentifier};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter};

/// One segment descriptor of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    List(String),
}

/// A parsed, immutable address template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTemplate {
    source: String,
    scheme: &'static str,
    segments: Vec<Segment>,
    min_segments: usize,
    max_segments: Option<usize>,
}

impl AddressTemplate {
    /// Parses a template such as `spacetraders://ships/{shipSymbol}/cooldown`.
    pub fn parse(source: &str, scheme: &'static str) -> Result<Self, TemplateError> {
        let rest = source
            .strip_prefix(scheme)
            .ok_or_else(|| TemplateError::InvalidScheme {
                template: source.to_string(),
                expected: scheme,
            })?;

        let raw: Vec<&str> = rest.split('/').collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut seen = HashSet::new();

        for (index, part) in raw.iter().enumerate() {
            if part.is_empty() {
                return Err(TemplateError::EmptySegment {
                    template: source.to_string(),
                    index,
                });
            }

            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(inner) => {
                    let (name, is_list) = match inner.strip_suffix('*') {
                        Some(name) => (name, true),
                        None => (inner, false),
                    };
                    let valid = !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                    if !valid {
                        return Err(TemplateError::MalformedPlaceholder {
                            template: source.to_string(),
                            segment: part.to_string(),
                        });
                    }
                    if !seen.insert(name.to_string()) {
                        return Err(TemplateError::DuplicatePlaceholder {
                            template: source.to_string(),
                            name: name.to_string(),
                        });
                    }
                    if is_list {
                        if index + 1 != raw.len() {
                            return Err(TemplateError::MisplacedList {
                                template: source.to_string(),
                            });
                        }
                        Segment::List(name.to_string())
                    } else {
                        Segment::Param(name.to_string())
                    }
                }
                None if part.contains(['{', '}']) => {
                    return Err(TemplateError::MalformedPlaceholder {
                        template: source.to_string(),
                        segment: part.to_string(),
                    });
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }

        let has_list = matches!(segments.last(), Some(Segment::List(_)));
        let min_segments = segments.len();
        let max_segments = (!has_list).then_some(segments.len());

        Ok(Self {
            source: source.to_string(),
            scheme,
            segments,
            min_segments,
            max_segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn min_segments(&self) -> usize {
        self.min_segments
    }

    /// `None` for list templates, which accept any number of trailing segments.
    pub fn max_segments(&self) -> Option<usize> {
        self.max_segments
    }

    /// Placeholder names in declaration order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) | Segment::List(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Parses a raw identifier string against this template.
    pub fn parse_identifier(&self, identifier: &str) -> Result<ExtractedParameters, ParseError> {
        let identifier = ResourceIdentifier::parse(identifier, self.scheme)?;
        self.extract(&identifier)
    }

    /// Matches an already split identifier and extracts its parameters.
    pub fn extract(&self, identifier: &ResourceIdentifier) -> Result<ExtractedParameters, ParseError> {
        let found = identifier.segments();
        self.check_shape(found)?;

        let mut values = BTreeMap::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(_) => {}
                Segment::Param(name) => {
                    let value = decode_param(name, &found[index])?;
                    values.insert(name.clone(), value);
                }
                Segment::List(name) => {
                    let parts = found[index..]
                        .iter()
                        .map(|raw| decode_param(name, raw))
                        .collect::<Result<Vec<_>, _>>()?;
                    values.insert(name.clone(), parts.join("/"));
                }
            }
        }

        Ok(ExtractedParameters {
            template: self.source.clone(),
            values,
        })
    }

    /// True when both templates accept exactly the same identifiers: equal literals
    /// at equal positions, placeholders where the other has placeholders. Placeholder
    /// names do not count.
    pub fn same_shape(&self, other: &AddressTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|pair| match pair {
                (Segment::Literal(a), Segment::Literal(b)) => a == b,
                (Segment::Param(_), Segment::Param(_)) | (Segment::List(_), Segment::List(_)) => true,
                _ => false,
            })
    }

    fn check_shape(&self, found: &[String]) -> Result<(), ParseError> {
        let count_ok = found.len() >= self.min_segments
            && self.max_segments.map_or(true, |max| found.len() <= max);
        if !count_ok {
            let expected = match self.max_segments {
                Some(max) => max.to_string(),
                None => format!("at least {}", self.min_segments),
            };
            return Err(ParseError::SegmentCountMismatch {
                expected,
                found: found.len(),
            });
        }

        for (index, segment) in self.segments.iter().enumerate() {
            if let Segment::Literal(literal) = segment {
                if found[index] != *literal {
                    return Err(ParseError::LiteralMismatch {
                        index,
                        expected: literal.clone(),
                        found: found[index].clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Builds an identifier from parameter values, percent-encoding each one.
    ///
    /// Returns `None` when a placeholder has no value or an empty one.
    pub fn render(&self, params: &ExtractedParameters) -> Option<String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => parts.push(literal.clone()),
                Segment::Param(name) => {
                    let value = params.get(name).filter(|v| !v.is_empty())?;
                    parts.push(encode_segment(value));
                }
                Segment::List(name) => {
                    let value = params.get(name).filter(|v| !v.is_empty())?;
                    for piece in value.split('/') {
                        if piece.is_empty() {
                            return None;
                        }
                        parts.push(encode_segment(piece));
                    }
                }
            }
        }
        Some(format!("{}{}", self.scheme, parts.join("/")))
    }
}

impl Display for AddressTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn decode_param(name: &str, raw: &str) -> Result<String, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::EmptyParameter {
            name: name.to_string(),
        });
    }
    decode_segment(raw).ok_or_else(|| ParseError::InvalidEncoding {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Placeholder values produced by one successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedParameters {
    #[serde(skip)]
    template: String,
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl ExtractedParameters {
    /// Builds parameters by hand, mostly for rendering identifiers.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            template: String::new(),
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing value is a dispatch error naming the route.
    pub fn require(&self, name: &str) -> Result<&str, DispatchError> {
        self.get(name).ok_or_else(|| DispatchError::MissingParameter {
            route: self.template.clone(),
            name: name.to_string(),
        })
    }

    /// Source of the template that produced these values.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

//! Values stored in the puzzle structures.
//!
//! Players type values as free text, while tree levels are written with
//! numbers. Both go through [`Element::parse`] so that a catalog entry `"1"`
//! and a typed `1` are the same element.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A single value held by a structure.
///
/// Every `Int` orders before every `Text`. Ints compare numerically and text
/// compares lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Element {
    Int(i64),
    Text(String),
}

impl Element {
    /// Parse player input. Returns `None` for blank input.
    ///
    /// Only canonical integers become `Int`. Labels such as `007` or `+7`
    /// keep the text the player typed.
    pub fn parse(input: &str) -> Option<Element> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.parse::<i64>() {
            Ok(n) if n.to_string() == trimmed => Element::Int(n),
            _ => Element::Text(trimmed.to_string()),
        })
    }

    pub fn text(s: &str) -> Element {
        Element::Text(s.to_string())
    }
}

impl From<i64> for Element {
    fn from(n: i64) -> Self {
        Element::Int(n)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::parse(s).unwrap_or_else(|| Element::text(s))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Int(n) => write!(f, "{n}"),
            Element::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Raw JSON shape accepted for an element
#[derive(Deserialize)]
#[serde(untagged)]
enum RawElement {
    Int(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawElement::deserialize(deserializer)? {
            RawElement::Int(n) => Ok(Element::Int(n)),
            RawElement::Text(s) => {
                Element::parse(&s).ok_or_else(|| serde::de::Error::custom("blank element"))
            }
        }
    }
}

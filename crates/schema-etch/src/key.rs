//! Documentation keys
//!
//! A key names the place in a generated schema where a documentation text
//! attaches:
//!
//! ```text
//! Key      = TypeKey | TypeKey "|" Category "|" LocalName
//! TypeKey  = "{" Namespace "}" TypeName
//! Category = ELEMENT | ATTRIBUTE | ENUMERATION
//! ```
//!
//! The type key always carries its braces, so a type without namespace is
//! written `{}name`. None of `|`, `{` and `}` may occur in a name.

use crate::diagnostics::{EtchError, EtchResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Separator between the parts of a member key
pub const SEP: char = '|';

lazy_static! {
    static ref KEY_RE: Regex = Regex::new(
        r"^(?:\{(?P<ns>[^{}|]*)\})?(?P<ty>[^{}|]+)(?:\|(?P<cat>ELEMENT|ATTRIBUTE|ENUMERATION)\|(?P<local>[^{}|]+))?$"
    )
    .unwrap();
}

/// Kind of schema node a member key attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyCategory {
    Element,
    Attribute,
    Enumeration,
}

impl KeyCategory {
    /// Rendered form inside a key
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyCategory::Element => "ELEMENT",
            KeyCategory::Attribute => "ATTRIBUTE",
            KeyCategory::Enumeration => "ENUMERATION",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "ELEMENT" => Some(KeyCategory::Element),
            "ATTRIBUTE" => Some(KeyCategory::Attribute),
            "ENUMERATION" => Some(KeyCategory::Enumeration),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A documentation key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocKey(String);

/// The parts of a parsed key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyParts<'a> {
    pub namespace: &'a str,
    pub type_name: &'a str,
    pub member: Option<(KeyCategory, &'a str)>,
}

impl DocKey {
    /// Key of a type
    pub fn for_type(namespace: &str, name: &str) -> EtchResult<Self> {
        check_segment(namespace, "namespace", true)?;
        check_segment(name, "type name", false)?;
        Ok(DocKey(format!("{{{}}}{}", namespace, name)))
    }

    /// Key of a member below this key
    pub fn member(&self, category: KeyCategory, local: &str) -> EtchResult<Self> {
        check_segment(local, "member name", false)?;
        Ok(DocKey(format!(
            "{}{}{}{}{}",
            self.0, SEP, category, SEP, local
        )))
    }

    /// Parse and validate a key
    pub fn parse(s: &str) -> EtchResult<Self> {
        if KEY_RE.is_match(s) {
            Ok(DocKey(s.to_string()))
        } else {
            Err(EtchError::invalid_name(s, "not a documentation key"))
        }
    }

    /// Split the key into its parts
    pub fn parts(&self) -> Option<KeyParts<'_>> {
        let caps = KEY_RE.captures(&self.0)?;
        let namespace = caps.name("ns").map_or("", |m| m.as_str());
        let type_name = caps.name("ty")?.as_str();
        let member = match (caps.name("cat"), caps.name("local")) {
            (Some(cat), Some(local)) => Some((KeyCategory::from_str(cat.as_str())?, local.as_str())),
            _ => None,
        };
        Some(KeyParts {
            namespace,
            type_name,
            member,
        })
    }

    /// Whether the key names a type rather than a member
    pub fn is_type_key(&self) -> bool {
        !self.0.contains(SEP)
    }

    /// The rendered key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DocKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn check_segment(segment: &str, what: &str, may_be_empty: bool) -> EtchResult<()> {
    if segment.is_empty() && !may_be_empty {
        return Err(EtchError::invalid_name(segment, format!("empty {}", what)));
    }
    if let Some(c) = segment.chars().find(|c| matches!(c, '|' | '{' | '}')) {
        return Err(EtchError::invalid_name(
            segment,
            format!("{} contains reserved character '{}'", what, c),
        ));
    }
    Ok(())
}

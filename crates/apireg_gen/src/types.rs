use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualified name of a Go type: import path plus identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeName {
    pub package: String,
    pub name: String,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// A type as reported by the external parser.
///
/// Only the qualified name and the comment blocks are consumed here; the
/// comment blocks carry the markers the classifier looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedType {
    #[serde(flatten)]
    pub name: TypeName,
    /// Comment block directly above the declaration.
    #[serde(default)]
    pub comment_lines: Vec<String>,
    /// Comment block separated from the declaration by one blank line.
    #[serde(default)]
    pub second_closest_comment_lines: Vec<String>,
}

impl ParsedType {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: TypeName {
                package: package.into(),
                name: name.into(),
            },
            comment_lines: Vec::new(),
            second_closest_comment_lines: Vec::new(),
        }
    }

    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comment_lines.push(line.into());
        self
    }

    pub fn package(&self) -> &str {
        &self.name.package
    }

    pub fn type_name(&self) -> &str {
        &self.name.name
    }
}

/// Sort a universe by package path, then type name.
///
/// Descriptor order is a deterministic function of input order, so hosts
/// should call this before planning.
pub fn sort_universe(types: &mut [ParsedType]) {
    types.sort_by(|a, b| a.name.cmp(&b.name));
}

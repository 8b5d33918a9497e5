use crate::types::ParsedType;

/// Comment marker that flags a type as an API resource.
pub const DEFAULT_RESOURCE_MARKER: &str = "+resource";

/// Decides whether a parsed type is an API resource.
///
/// Implementations must be deterministic and total: the same type always
/// yields the same answer and no type makes them fail.
pub trait TypeClassifier {
    fn is_api_resource(&self, ty: &ParsedType) -> bool;
}

impl<F> TypeClassifier for F
where
    F: Fn(&ParsedType) -> bool,
{
    fn is_api_resource(&self, ty: &ParsedType) -> bool {
        self(ty)
    }
}

/// Classifies by a comment marker such as `// +resource:path=foos`.
///
/// Both the closest and the second-closest comment block are searched. A line
/// matches when, trimmed, it starts with the marker followed by the end of the
/// line, `:`, `=` or whitespace.
#[derive(Debug, Clone)]
pub struct MarkerClassifier {
    marker: String,
}

impl MarkerClassifier {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    fn line_matches(&self, line: &str) -> bool {
        let Some(rest) = line.trim().strip_prefix(self.marker.as_str()) else {
            return false;
        };
        match rest.chars().next() {
            None => true,
            Some(next) => next == ':' || next == '=' || next.is_whitespace(),
        }
    }
}

impl Default for MarkerClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE_MARKER)
    }
}

impl TypeClassifier for MarkerClassifier {
    fn is_api_resource(&self, ty: &ParsedType) -> bool {
        ty.comment_lines
            .iter()
            .chain(ty.second_closest_comment_lines.iter())
            .any(|line| self.line_matches(line))
    }
}

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Precedence policy for the versions of one API group.
pub trait VersionOrder {
    /// `Less` means `a` is listed before `b`.
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Kubernetes version priority: GA before beta before alpha, then higher
/// major first, then higher pre-release number first. Names that do not look
/// like `v<major>[alpha|beta<minor>]` sort after all others, lexically.
#[derive(Debug, Default, Clone, Copy)]
pub struct KubeVersionOrder;

/// Plain byte-wise ordering of version names.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalVersionOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stability {
    Ga,
    Beta,
    Alpha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KubeVersion {
    major: u32,
    stability: Stability,
    minor: u32,
}

impl KubeVersion {
    fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix('v')?;
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let major = rest[..digits].parse().ok()?;
        let suffix = &rest[digits..];
        if suffix.is_empty() {
            return Some(Self {
                major,
                stability: Stability::Ga,
                minor: 0,
            });
        }

        let (stability, minor) = if let Some(minor) = suffix.strip_prefix("beta") {
            (Stability::Beta, minor)
        } else if let Some(minor) = suffix.strip_prefix("alpha") {
            (Stability::Alpha, minor)
        } else {
            return None;
        };
        if minor.is_empty() || !minor.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            major,
            stability,
            minor: minor.parse().ok()?,
        })
    }
}

impl VersionOrder for KubeVersionOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (KubeVersion::parse(a), KubeVersion::parse(b)) {
            (Some(x), Some(y)) => x
                .stability
                .cmp(&y.stability)
                .then(y.major.cmp(&x.major))
                .then(y.minor.cmp(&x.minor)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

impl VersionOrder for LexicalVersionOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// Named version policies, as selected from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrdering {
    #[default]
    Kube,
    Lexical,
}

impl VersionOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionOrdering::Kube => "kube",
            VersionOrdering::Lexical => "lexical",
        }
    }
}

impl VersionOrder for VersionOrdering {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            VersionOrdering::Kube => KubeVersionOrder.compare(a, b),
            VersionOrdering::Lexical => LexicalVersionOrder.compare(a, b),
        }
    }
}

impl fmt::Display for VersionOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionOrdering {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "kube" | "kubernetes" => Ok(VersionOrdering::Kube),
            "lexical" => Ok(VersionOrdering::Lexical),
            other => Err(format!(
                "unknown version ordering '{other}' (expected 'kube' or 'lexical')"
            )),
        }
    }
}

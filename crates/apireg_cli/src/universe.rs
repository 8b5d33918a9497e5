use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use apireg_gen::{sort_universe, ParsedType};
use serde::Deserialize;

/// Type universe as written by the external parser.
#[derive(Debug, Default, Deserialize)]
pub struct UniverseDocument {
    #[serde(default)]
    pub types: Vec<ParsedType>,
}

/// Decode a universe document and sort it by package path, then type name.
pub fn parse_universe(text: &str) -> Result<Vec<ParsedType>, serde_json::Error> {
    let document: UniverseDocument = serde_json::from_str(text)?;
    let mut types = document.types;
    sort_universe(&mut types);
    Ok(types)
}

pub fn load_universe(path: &Path) -> Result<Vec<ParsedType>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read type universe '{}'", path.display()))?;
    parse_universe(&text)
        .with_context(|| format!("failed to decode type universe '{}'", path.display()))
}

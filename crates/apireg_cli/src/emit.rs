use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use apireg_gen::{PackagePlan, PackageRole, ParsedType};
use serde::Serialize;
use tracing::info;

/// Directory of an import path under `output_base`.
pub fn package_dir(output_base: &Path, package_path: &str) -> PathBuf {
    let mut dir = output_base.to_path_buf();
    dir.extend(
        package_path
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != "."),
    );
    dir
}

/// Render every package, then write them. Nothing is written if any package
/// fails to render or two packages target the same file.
pub fn emit(plan: &PackagePlan, universe: &[ParsedType], output_base: &Path) -> Result<Vec<PathBuf>> {
    let mut rendered = Vec::with_capacity(plan.packages.len());
    let mut owners: HashMap<PathBuf, PackageRole> = HashMap::new();
    for package in &plan.packages {
        let file = package_dir(output_base, package.path()).join(package.filename());
        if let Some(previous) = owners.insert(file.clone(), package.role()) {
            bail!(
                "{previous} and {} packages both write '{}'",
                package.role(),
                file.display()
            );
        }

        let contents = package
            .render(universe)
            .with_context(|| format!("failed to generate package '{}'", package.path()))?;
        rendered.push((file, contents));
    }

    let mut written = Vec::with_capacity(rendered.len());
    for (file, contents) in rendered {
        if let Some(dir) = file.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory '{}'", dir.display()))?;
        }
        fs::write(&file, contents)
            .with_context(|| format!("failed to write '{}'", file.display()))?;
        info!(file = %file.display(), "wrote generated file");
        written.push(file);
    }
    Ok(written)
}

/// One row of `apiregister-gen plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub role: PackageRole,
    pub path: String,
    pub name: String,
    pub file: String,
    pub members: usize,
}

pub fn plan_entries(plan: &PackagePlan, universe: &[ParsedType]) -> Vec<PlanEntry> {
    plan.packages
        .iter()
        .map(|package| PlanEntry {
            role: package.role(),
            path: package.path().to_string(),
            name: package.name().to_string(),
            file: package.filename(),
            members: package.select(universe).len(),
        })
        .collect()
}

pub fn render_plan_table(entries: &[PlanEntry]) -> String {
    if entries.is_empty() {
        return "no API resources found; nothing to generate\n".to_string();
    }

    let path_width = entries.iter().map(|e| e.path.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{:<17}  {:<path_width$}  {:<12}  {} type(s)\n",
            entry.role, entry.path, entry.name, entry.members
        ));
    }
    out
}

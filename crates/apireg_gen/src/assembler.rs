use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::GenerateError;
use crate::generator::{Generator, GeneratorArgs, GeneratorFactories};
use crate::model::ApiModel;
use crate::paths;
use crate::types::ParsedType;

/// What a generated package is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageRole {
    Versioned,
    Unversioned,
    Install,
    Apis,
    AdmissionInstall,
}

impl PackageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageRole::Versioned => "versioned",
            PackageRole::Unversioned => "unversioned",
            PackageRole::Install => "install",
            PackageRole::Apis => "apis",
            PackageRole::AdmissionInstall => "admission-install",
        }
    }
}

impl fmt::Display for PackageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A package to generate: where it goes, what it is called, which generator
/// renders it and which types it receives.
pub struct PackageDescriptor {
    role: PackageRole,
    path: String,
    name: String,
    header: Arc<[u8]>,
    generator: Box<dyn Generator>,
}

impl PackageDescriptor {
    pub fn new(
        role: PackageRole,
        path: impl Into<String>,
        header: Arc<[u8]>,
        generator: Box<dyn Generator>,
    ) -> Self {
        let path = path.into();
        Self {
            role,
            name: paths::package_name(&path),
            path,
            header,
            generator,
        }
    }

    pub fn role(&self) -> PackageRole {
        self.role
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn filename(&self) -> String {
        self.generator.filename()
    }

    /// Membership filter over the type universe.
    pub fn admits(&self, ty: &ParsedType) -> bool {
        self.generator.admits(ty, &self.path)
    }

    pub fn select<'u>(&self, universe: &'u [ParsedType]) -> Vec<&'u ParsedType> {
        universe.iter().filter(|ty| self.admits(ty)).collect()
    }

    /// Header followed by the generator output for the admitted types.
    pub fn render(&self, universe: &[ParsedType]) -> Result<Vec<u8>, GenerateError> {
        let members = self.select(universe);
        let body = self.generator.generate(&self.name, &members)?;

        let mut contents = Vec::with_capacity(self.header.len() + body.len());
        contents.extend_from_slice(&self.header);
        contents.extend_from_slice(body.as_bytes());
        Ok(contents)
    }
}

impl fmt::Debug for PackageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageDescriptor")
            .field("role", &self.role)
            .field("path", &self.path)
            .field("name", &self.name)
            .field("filename", &self.generator.filename())
            .finish_non_exhaustive()
    }
}

/// Binds every package of an [`ApiModel`] to a generator.
pub struct PackageAssembler<'f> {
    factories: &'f dyn GeneratorFactories,
    args: &'f GeneratorArgs,
    header: Arc<[u8]>,
}

impl<'f> PackageAssembler<'f> {
    pub fn new(
        factories: &'f dyn GeneratorFactories,
        args: &'f GeneratorArgs,
        header: Arc<[u8]>,
    ) -> Self {
        Self {
            factories,
            args,
            header,
        }
    }

    /// Per group: each version, then the group package, then its install
    /// package. After all groups: the apis package, then the admission
    /// installer under the project root. An empty model yields no packages.
    pub fn assemble(&self, model: &ApiModel) -> Vec<PackageDescriptor> {
        if model.is_empty() {
            return Vec::new();
        }

        let mut packages = Vec::new();
        for group in &model.groups {
            for version in &group.versions {
                let generator = self.factories.versioned(version, group, self.args);
                packages.push(self.package(PackageRole::Versioned, &version.path, generator));
            }

            let generator = self.factories.unversioned(group, self.args);
            packages.push(self.package(PackageRole::Unversioned, &group.path, generator));

            let generator = self.factories.install(group, self.args);
            let install_path = paths::join(&group.path, &["install"]);
            packages.push(self.package(PackageRole::Install, &install_path, generator));
        }

        let generator = self.factories.apis(model, self.args);
        packages.push(self.package(PackageRole::Apis, &model.path, generator));

        let project_root = model.project_root();
        let generator = self.factories.admission(model, &project_root, self.args);
        let admission_path = paths::join(&project_root, &["plugin", "admission", "install"]);
        packages.push(self.package(PackageRole::AdmissionInstall, &admission_path, generator));

        packages
    }

    fn package(
        &self,
        role: PackageRole,
        path: &str,
        generator: Box<dyn Generator>,
    ) -> PackageDescriptor {
        let descriptor = PackageDescriptor::new(role, path, Arc::clone(&self.header), generator);
        debug!(role = %role, path = %descriptor.path(), name = %descriptor.name(), "assembled package");
        descriptor
    }
}

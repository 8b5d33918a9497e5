//! Bundled generators that render minimal Go registration code for each
//! package role.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use apireg_gen::paths;
use apireg_gen::{
    ApiGroup, ApiModel, ApiVersion, GenerateError, Generator, GeneratorArgs, GeneratorFactories,
    ParsedType, TypeName,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrationStubs;

impl GeneratorFactories for RegistrationStubs {
    fn versioned(
        &self,
        version: &ApiVersion,
        group: &ApiGroup,
        args: &GeneratorArgs,
    ) -> Box<dyn Generator> {
        Box::new(VersionedRegistration {
            filename: go_file(args),
            group: group.name.clone(),
            version: version.name.clone(),
            resources: version.resources.iter().cloned().collect(),
        })
    }

    fn unversioned(&self, group: &ApiGroup, args: &GeneratorArgs) -> Box<dyn Generator> {
        Box::new(GroupVersions {
            filename: go_file(args),
            group: group.name.clone(),
            versions: group.versions.iter().map(|v| v.name.clone()).collect(),
        })
    }

    fn install(&self, group: &ApiGroup, args: &GeneratorArgs) -> Box<dyn Generator> {
        let imports = group
            .versions
            .iter()
            .map(|v| Import::new(format!("{}{}", group.name, paths::last_segment(&v.path)), &v.path))
            .collect();
        Box::new(Installer {
            filename: go_file(args),
            doc: format!("every version of the {} group", group.name),
            imports,
            call: "AddToScheme",
        })
    }

    fn apis(&self, apis: &ApiModel, args: &GeneratorArgs) -> Box<dyn Generator> {
        let imports = apis
            .groups
            .iter()
            .map(|g| Import::new(format!("{}install", g.name), &paths::join(&g.path, &["install"])))
            .collect();
        Box::new(AggregateInstaller {
            installer: Installer {
                filename: go_file(args),
                doc: "every API group".to_string(),
                imports,
                call: "Install",
            },
            resources: resource_names(apis),
        })
    }

    fn admission(
        &self,
        apis: &ApiModel,
        project_root: &str,
        args: &GeneratorArgs,
    ) -> Box<dyn Generator> {
        Box::new(AdmissionInstaller {
            filename: go_file(args),
            plugin_root: paths::join(project_root, &["plugin", "admission"]),
            output_base: PathBuf::from(&args.output_base),
            resources: resource_names(apis),
        })
    }
}

fn go_file(args: &GeneratorArgs) -> String {
    format!("{}.go", args.output_file_base_name)
}

fn resource_names(apis: &ApiModel) -> BTreeSet<TypeName> {
    apis.versions()
        .flat_map(|(_, version)| {
            version.resources.iter().map(|name| TypeName {
                package: version.path.clone(),
                name: name.clone(),
            })
        })
        .collect()
}

struct Import {
    alias: String,
    path: String,
}

impl Import {
    fn new(alias: String, path: &str) -> Self {
        Self {
            alias: alias.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
            path: path.to_string(),
        }
    }
}

struct VersionedRegistration {
    filename: String,
    group: String,
    version: String,
    resources: BTreeSet<String>,
}

impl Generator for VersionedRegistration {
    fn filename(&self) -> String {
        self.filename.clone()
    }

    fn generate(&self, package: &str, types: &[&ParsedType]) -> Result<String, GenerateError> {
        let mut out = String::new();
        writeln!(out, "package {package}\n")?;
        writeln!(out, "import (")?;
        writeln!(out, "\t\"k8s.io/apimachinery/pkg/runtime\"")?;
        writeln!(out, "\t\"k8s.io/apimachinery/pkg/runtime/schema\"")?;
        writeln!(out, ")\n")?;
        writeln!(out, "// SchemeGroupVersion identifies the types registered by this package.")?;
        writeln!(
            out,
            "var SchemeGroupVersion = schema.GroupVersion{{Group: \"{}\", Version: \"{}\"}}\n",
            self.group, self.version
        )?;
        writeln!(out, "// AddToScheme registers the {}/{} resources.", self.group, self.version)?;
        writeln!(out, "func AddToScheme(scheme *runtime.Scheme) error {{")?;
        writeln!(out, "\tscheme.AddKnownTypes(SchemeGroupVersion,")?;
        for ty in types.iter().filter(|t| self.resources.contains(t.type_name())) {
            writeln!(out, "\t\t&{}{{}},", ty.type_name())?;
        }
        writeln!(out, "\t)")?;
        writeln!(out, "\treturn nil")?;
        writeln!(out, "}}")?;
        Ok(out)
    }
}

struct GroupVersions {
    filename: String,
    group: String,
    versions: Vec<String>,
}

impl Generator for GroupVersions {
    fn filename(&self) -> String {
        self.filename.clone()
    }

    fn generate(&self, package: &str, _types: &[&ParsedType]) -> Result<String, GenerateError> {
        let mut out = String::new();
        writeln!(out, "package {package}\n")?;
        writeln!(
            out,
            "// Versions lists the served versions of the {} group, highest priority first.",
            self.group
        )?;
        writeln!(out, "var Versions = []string{{")?;
        for version in &self.versions {
            writeln!(out, "\t\"{version}\",")?;
        }
        writeln!(out, "}}")?;
        Ok(out)
    }
}

struct Installer {
    filename: String,
    doc: String,
    imports: Vec<Import>,
    call: &'static str,
}

impl Installer {
    fn render(&self, package: &str, out: &mut String) -> Result<(), GenerateError> {
        writeln!(out, "package {package}\n")?;
        writeln!(out, "import (")?;
        writeln!(out, "\t\"k8s.io/apimachinery/pkg/runtime\"")?;
        if !self.imports.is_empty() {
            writeln!(out)?;
        }
        for import in &self.imports {
            writeln!(out, "\t{} \"{}\"", import.alias, import.path)?;
        }
        writeln!(out, ")\n")?;
        writeln!(out, "// Install registers {} with the scheme.", self.doc)?;
        writeln!(out, "func Install(scheme *runtime.Scheme) error {{")?;
        writeln!(out, "\tfor _, install := range []func(*runtime.Scheme) error{{")?;
        for import in &self.imports {
            writeln!(out, "\t\t{}.{},", import.alias, self.call)?;
        }
        writeln!(out, "\t}} {{")?;
        writeln!(out, "\t\tif err := install(scheme); err != nil {{")?;
        writeln!(out, "\t\t\treturn err")?;
        writeln!(out, "\t\t}}")?;
        writeln!(out, "\t}}")?;
        writeln!(out, "\treturn nil")?;
        writeln!(out, "}}")?;
        Ok(())
    }
}

impl Generator for Installer {
    fn filename(&self) -> String {
        self.filename.clone()
    }

    fn generate(&self, package: &str, _types: &[&ParsedType]) -> Result<String, GenerateError> {
        let mut out = String::new();
        self.render(package, &mut out)?;
        Ok(out)
    }
}

/// The apis package sees every resource of every version.
struct AggregateInstaller {
    installer: Installer,
    resources: BTreeSet<TypeName>,
}

impl Generator for AggregateInstaller {
    fn filename(&self) -> String {
        self.installer.filename.clone()
    }

    fn admits(&self, ty: &ParsedType, _package_path: &str) -> bool {
        self.resources.contains(&ty.name)
    }

    fn generate(&self, package: &str, types: &[&ParsedType]) -> Result<String, GenerateError> {
        let mut out = String::new();
        self.installer.render(package, &mut out)?;
        writeln!(out, "\n// Resources lists every registered resource.")?;
        writeln!(out, "var Resources = []string{{")?;
        for ty in types {
            writeln!(out, "\t\"{}\",", ty.name)?;
        }
        writeln!(out, "}}")?;
        Ok(out)
    }
}

/// Imports the admission plugin of each resource that has one under
/// `<project root>/plugin/admission/<lowercase resource name>`.
struct AdmissionInstaller {
    filename: String,
    plugin_root: String,
    output_base: PathBuf,
    resources: BTreeSet<TypeName>,
}

impl AdmissionInstaller {
    fn plugin_exists(&self, import_path: &str) -> bool {
        let mut dir = self.output_base.clone();
        dir.extend(import_path.split('/').filter(|s| !s.is_empty() && *s != "."));
        dir.is_dir()
    }
}

impl Generator for AdmissionInstaller {
    fn filename(&self) -> String {
        self.filename.clone()
    }

    fn admits(&self, ty: &ParsedType, _package_path: &str) -> bool {
        self.resources.contains(&ty.name)
    }

    fn generate(&self, package: &str, types: &[&ParsedType]) -> Result<String, GenerateError> {
        let plugins: BTreeSet<String> = types
            .iter()
            .map(|ty| paths::join(&self.plugin_root, &[ty.type_name().to_ascii_lowercase().as_str()]))
            .filter(|import_path| self.plugin_exists(import_path))
            .collect();

        let mut out = String::new();
        writeln!(out, "package {package}")?;
        if plugins.is_empty() {
            writeln!(out, "\n// No admission plugins found under {}.", self.plugin_root)?;
            return Ok(out);
        }

        writeln!(out, "\nimport (")?;
        for plugin in &plugins {
            writeln!(out, "\t_ \"{plugin}\"")?;
        }
        writeln!(out, ")")?;
        Ok(out)
    }
}

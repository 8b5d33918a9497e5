use crate::error::GenerateError;
use crate::model::{ApiGroup, ApiModel, ApiVersion};
use crate::types::ParsedType;

pub const DEFAULT_OUTPUT_FILE_BASE_NAME: &str = "zz_generated.api.register";

/// Run-wide settings handed to every generator factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorArgs {
    /// File name, without extension, of every generated file.
    pub output_file_base_name: String,
    /// Directory the host writes package paths under.
    pub output_base: String,
}

impl Default for GeneratorArgs {
    fn default() -> Self {
        Self {
            output_file_base_name: DEFAULT_OUTPUT_FILE_BASE_NAME.to_string(),
            output_base: ".".to_string(),
        }
    }
}

/// Produces the body of one generated file.
///
/// Which types reach [`Generator::generate`] is decided by
/// [`Generator::admits`]; the default admits exactly the types declared in
/// the package being generated.
pub trait Generator: Send + Sync {
    fn filename(&self) -> String;

    fn admits(&self, ty: &ParsedType, package_path: &str) -> bool {
        ty.package() == package_path
    }

    fn generate(&self, package: &str, types: &[&ParsedType]) -> Result<String, GenerateError>;
}

/// One factory per package role.
pub trait GeneratorFactories {
    fn versioned(
        &self,
        version: &ApiVersion,
        group: &ApiGroup,
        args: &GeneratorArgs,
    ) -> Box<dyn Generator>;

    fn unversioned(&self, group: &ApiGroup, args: &GeneratorArgs) -> Box<dyn Generator>;

    fn install(&self, group: &ApiGroup, args: &GeneratorArgs) -> Box<dyn Generator>;

    fn apis(&self, apis: &ApiModel, args: &GeneratorArgs) -> Box<dyn Generator>;

    fn admission(
        &self,
        apis: &ApiModel,
        project_root: &str,
        args: &GeneratorArgs,
    ) -> Box<dyn Generator>;
}

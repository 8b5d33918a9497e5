// apireg_gen - Package topology planning for API registration code generation
//
// Pipeline: parsed type universe -> classifier -> topology resolver (path sets)
// -> api model (group/version tree) -> package assembler (one descriptor per
// generated package). Nothing in this crate touches the file system.
mod assembler;
mod boilerplate;
mod classifier;
mod error;
mod generator;
mod model;
mod order;
pub mod paths;
mod planner;
mod topology;
mod types;

pub use assembler::{PackageAssembler, PackageDescriptor, PackageRole};
pub use boilerplate::{load_or_fallback, BoilerplateLoader, FALLBACK_HEADER};
pub use classifier::{MarkerClassifier, TypeClassifier, DEFAULT_RESOURCE_MARKER};
pub use error::{BoilerplateError, GenerateError, TopologyError};
pub use generator::{Generator, GeneratorArgs, GeneratorFactories, DEFAULT_OUTPUT_FILE_BASE_NAME};
pub use model::{ApiGroup, ApiModel, ApiVersion};
pub use order::{KubeVersionOrder, LexicalVersionOrder, VersionOrder, VersionOrdering};
pub use planner::{PackagePlan, PackagePlanner};
pub use topology::{PathSets, TopologyResolver};
pub use types::{sort_universe, ParsedType, TypeName};

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::{Arc, Mutex};

use crate::error::GenerateError;
use crate::generator::{Generator, GeneratorArgs, GeneratorFactories};
use crate::model::{ApiGroup, ApiModel, ApiVersion};
use crate::types::ParsedType;

pub(crate) fn resource(package: &str, name: &str) -> ParsedType {
    ParsedType::new(package, name).with_comment("+resource")
}

/// Generator that renders the role tag and the member type names.
pub(crate) struct TagGenerator {
    pub(crate) tag: String,
    pub(crate) base_name: String,
}

impl Generator for TagGenerator {
    fn filename(&self) -> String {
        format!("{}.go", self.base_name)
    }

    fn generate(&self, package: &str, types: &[&ParsedType]) -> Result<String, GenerateError> {
        let names: Vec<&str> = types.iter().map(|t| t.type_name()).collect();
        Ok(format!("package {package} // {} [{}]\n", self.tag, names.join(",")))
    }
}

/// Factory set that records every call so tests can check invocation order.
#[derive(Default)]
pub(crate) struct RecordingFactories {
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingFactories {
    fn make(&self, tag: String, args: &GeneratorArgs) -> Box<dyn Generator> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(tag.clone());
        }
        Box::new(TagGenerator {
            tag,
            base_name: args.output_file_base_name.clone(),
        })
    }
}

impl GeneratorFactories for RecordingFactories {
    fn versioned(
        &self,
        version: &ApiVersion,
        group: &ApiGroup,
        args: &GeneratorArgs,
    ) -> Box<dyn Generator> {
        self.make(format!("versioned:{}/{}", group.name, version.name), args)
    }

    fn unversioned(&self, group: &ApiGroup, args: &GeneratorArgs) -> Box<dyn Generator> {
        self.make(format!("unversioned:{}", group.name), args)
    }

    fn install(&self, group: &ApiGroup, args: &GeneratorArgs) -> Box<dyn Generator> {
        self.make(format!("install:{}", group.name), args)
    }

    fn apis(&self, apis: &ApiModel, args: &GeneratorArgs) -> Box<dyn Generator> {
        self.make(format!("apis:{}", apis.groups.len()), args)
    }

    fn admission(
        &self,
        _apis: &ApiModel,
        project_root: &str,
        args: &GeneratorArgs,
    ) -> Box<dyn Generator> {
        self.make(format!("admission:{project_root}"), args)
    }
}

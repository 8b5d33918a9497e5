use std::sync::Arc;

use tracing::info;

use crate::assembler::{PackageAssembler, PackageDescriptor};
use crate::classifier::{MarkerClassifier, TypeClassifier};
use crate::error::TopologyError;
use crate::generator::{GeneratorArgs, GeneratorFactories};
use crate::model::ApiModel;
use crate::order::{KubeVersionOrder, VersionOrder};
use crate::topology::{PathSets, TopologyResolver};
use crate::types::ParsedType;

/// Everything derived from one type universe.
#[derive(Debug)]
pub struct PackagePlan {
    pub paths: PathSets,
    pub model: ApiModel,
    pub packages: Vec<PackageDescriptor>,
}

impl PackagePlan {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Runs resolve -> group -> assemble over a type universe.
///
/// The universe is expected to be sorted by package path then type name
/// (see [`crate::sort_universe`]); package order is a deterministic function
/// of that order.
pub struct PackagePlanner {
    classifier: Box<dyn TypeClassifier>,
    version_order: Box<dyn VersionOrder>,
    factories: Box<dyn GeneratorFactories>,
    args: GeneratorArgs,
}

impl PackagePlanner {
    pub fn new(factories: Box<dyn GeneratorFactories>) -> Self {
        Self {
            classifier: Box::new(MarkerClassifier::default()),
            version_order: Box::new(KubeVersionOrder),
            factories,
            args: GeneratorArgs::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn TypeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_version_order(mut self, order: Box<dyn VersionOrder>) -> Self {
        self.version_order = order;
        self
    }

    pub fn with_args(mut self, args: GeneratorArgs) -> Self {
        self.args = args;
        self
    }

    pub fn plan(
        &self,
        universe: &[ParsedType],
        header: Arc<[u8]>,
    ) -> Result<PackagePlan, TopologyError> {
        let paths = TopologyResolver::new(self.classifier.as_ref()).resolve(universe)?;
        let model = ApiModel::build(
            universe,
            &paths,
            self.classifier.as_ref(),
            self.version_order.as_ref(),
        );
        let packages =
            PackageAssembler::new(self.factories.as_ref(), &self.args, header).assemble(&model);

        info!(
            types = universe.len(),
            groups = model.groups.len(),
            packages = packages.len(),
            apis = %paths.apis,
            "planned generated packages"
        );

        Ok(PackagePlan {
            paths,
            model,
            packages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::LexicalVersionOrder;
    use crate::test_support::{resource, RecordingFactories};

    fn planner() -> PackagePlanner {
        PackagePlanner::new(Box::new(RecordingFactories::default()))
    }

    fn header() -> Arc<[u8]> {
        Arc::from(&b"// h\n"[..])
    }

    fn summary(plan: &PackagePlan) -> String {
        plan.packages
            .iter()
            .map(|p| format!("{:<17} {:<34} {}", p.role(), p.path(), p.name()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn plans_single_group_with_two_versions() {
        let universe = vec![
            resource("pkg/apis/mygroup/v1", "Foo"),
            resource("pkg/apis/mygroup/v1beta1", "Foo"),
        ];
        let plan = planner().plan(&universe, header()).unwrap();

        assert_eq!(plan.paths.apis, "pkg/apis");
        assert_eq!(plan.paths.main, "pkg");
        insta::assert_snapshot!(summary(&plan), @r"
        versioned         pkg/apis/mygroup/v1                v1
        versioned         pkg/apis/mygroup/v1beta1           v1beta1
        unversioned       pkg/apis/mygroup                   mygroup
        install           pkg/apis/mygroup/install           install
        apis              pkg/apis                           apis
        admission-install plugin/admission/install           install
        ");
    }

    #[test]
    fn conflicting_roots_stop_before_any_generator_is_built() {
        let factories = RecordingFactories::default();
        let calls = Arc::clone(&factories.calls);
        let universe = vec![
            resource("a/apis/g/v1", "Foo"),
            resource("b/apis/g/v1", "Foo"),
        ];

        let error = PackagePlanner::new(Box::new(factories))
            .plan(&universe, header())
            .unwrap_err();

        assert!(matches!(error, TopologyError::MultipleApisRoots { .. }));
        assert_eq!(error.to_string(), "found multiple apis directory paths: a/apis and b/apis");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn universe_without_resources_plans_nothing() {
        let universe = vec![ParsedType::new("pkg/apis/mygroup/v1", "Helper")];
        let plan = planner().plan(&universe, header()).unwrap();

        assert!(plan.is_empty());
        assert!(plan.paths.is_empty());
        assert!(plan.model.is_empty());
    }

    #[test]
    fn planning_twice_is_identical() {
        let universe = vec![
            resource("pkg/apis/a/v1", "Foo"),
            resource("pkg/apis/a/v2", "Foo"),
            resource("pkg/apis/b/v1beta1", "Bar"),
        ];
        let planner = planner();
        let first = planner.plan(&universe, header()).unwrap();
        let second = planner.plan(&universe, header()).unwrap();

        assert_eq!(summary(&first), summary(&second));
        assert_eq!(first.paths, second.paths);
        assert_eq!(first.model, second.model);
    }

    #[test]
    fn policies_are_pluggable() {
        let universe = vec![
            resource("pkg/apis/a/v2", "Foo"),
            resource("pkg/apis/a/v10", "Foo"),
            ParsedType::new("pkg/apis/c/v1", "Special"),
        ];
        let plan = planner()
            .with_version_order(Box::new(LexicalVersionOrder))
            .with_classifier(Box::new(|ty: &ParsedType| {
                ty.comment_lines.iter().any(|l| l == "+resource") || ty.type_name() == "Special"
            }))
            .plan(&universe, header())
            .unwrap();

        let versioned: Vec<&str> = plan.packages.iter().take(2).map(|p| p.path()).collect();
        assert_eq!(versioned, vec!["pkg/apis/a/v10", "pkg/apis/a/v2"]);
        assert!(plan.paths.versioned.contains("pkg/apis/c/v1"));
    }
}
